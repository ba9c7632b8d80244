use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare AtCoder rating histories", long_about = None)]
pub struct Args {
    /// Address to bind the web server to.
    #[arg(long, value_name = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value_t = 8081)]
    pub port: u16,
    /// Origin the proxy forwards contest-history requests to.
    #[arg(
        long,
        value_name = "URL",
        default_value = "https://atcoder.jp",
        value_parser = crate::args::validation::check_http_url
    )]
    pub upstream_base: Url,
    /// Pause before every outbound upstream call, in milliseconds.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 40)]
    pub proxy_delay_ms: u64,
    /// Origin the dashboard reaches the proxy through. Defaults to this server on loopback.
    #[arg(long, value_name = "URL", value_parser = crate::args::validation::check_http_url)]
    pub proxy_base: Option<Url>,
    #[arg(
        long,
        value_name = "DIR",
        default_value = "./static",
        value_parser = crate::args::validation::check_readable_dir
    )]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub host: String,
    pub port: u16,
    pub upstream_base: Url,
    pub proxy_delay: Duration,
    pub proxy_base: Url,
    pub static_dir: PathBuf,
}
