use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::args::types::{Args, CleanArgs};

/// # Errors
///
/// Will return `Err` if the value is not an absolute http(s) url
pub fn check_http_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("'{value}' is not a valid url: {e}"))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        _ => Err(format!("'{value}' must be an http or https url.")),
    }
}

/// # Errors
///
/// Will return `Err` if the path is not a readable directory
pub fn check_readable_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match path.read_dir() {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("The static directory '{value}' is not readable: {e}")),
    }
}

impl TryFrom<Args> for CleanArgs {
    type Error = String;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let proxy_base = match args.proxy_base {
            Some(url) => url,
            None => check_http_url(&format!("http://127.0.0.1:{}", args.port))?,
        };

        Ok(CleanArgs {
            host: args.host,
            port: args.port,
            upstream_base: args.upstream_base,
            proxy_delay: Duration::from_millis(args.proxy_delay_ms),
            proxy_base,
            static_dir: args.static_dir,
        })
    }
}
