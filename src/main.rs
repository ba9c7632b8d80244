use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use atcoder_multi_charts::args;
use atcoder_multi_charts::configure_routes;
use atcoder_multi_charts::controller::history::{HistorySource, ProxyHistorySource};
use atcoder_multi_charts::controller::proxy::{ProxyConfig, UpstreamClient};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = args::args_checks();

    let upstream = Data::new(UpstreamClient::new(ProxyConfig {
        upstream_base: args.upstream_base.clone(),
        delay: args.proxy_delay,
    })?);
    let source: Arc<dyn HistorySource> = Arc::new(ProxyHistorySource::new(args.proxy_base.clone())?);
    let source = Data::from(source);
    let static_dir = args.static_dir.clone();

    info!(
        host = %args.host,
        port = args.port,
        upstream = %args.upstream_base,
        proxy = %args.proxy_base,
        "starting server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(upstream.clone())
            .app_data(source.clone())
            .configure(configure_routes)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}
