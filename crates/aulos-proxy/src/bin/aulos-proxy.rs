//! CORS reverse proxy for stream hosts.
//!
//! ```bash
//! cargo run -p aulos-proxy --features cli -- --port 3001 --target https://s3-store.flyooo.uk
//! # GET http://localhost:3001/proxy/videos/a/index.m3u8
//! #   -> https://s3-store.flyooo.uk/videos/a/index.m3u8
//! ```

use std::{net::IpAddr, process::ExitCode};

use aulos_proxy::{DEFAULT_PORT, DEFAULT_TARGET, ProxyConfig, ProxyResult, ProxyServer};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aulos-proxy", about = "CORS reverse proxy for stream URLs")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "AULOS_PROXY_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Upstream origin that `/proxy/{path}` is forwarded to
    #[arg(short, long, env = "AULOS_PROXY_TARGET", default_value = DEFAULT_TARGET)]
    target: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aulos_proxy=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = ProxyConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_target(args.target);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "proxy failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ProxyConfig) -> ProxyResult<()> {
    let server = ProxyServer::bind(&config).await?;
    info!(
        "CORS proxy listening on http://{}, forwarding to {}",
        server.local_addr(),
        config.target
    );

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            on_signal.cancel();
        }
    });

    server.serve(shutdown).await
}
