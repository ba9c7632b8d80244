pub mod types;
pub mod validation;

use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;

pub use types::{Args, CleanArgs};

/// Parse the command line and resolve defaults that depend on other flags.
/// Exits with a usage error if validation fails.
pub fn args_checks() -> CleanArgs {
    let args = Args::parse();
    match CleanArgs::try_from(args) {
        Ok(clean) => clean,
        Err(e) => Args::command().error(ErrorKind::ValueValidation, e).exit(),
    }
}
