//! DevConnect API proxy.
//!
//! Serves the browser-facing API origin and forwards every call to the
//! backend origin.
//!
//! ```text
//!     Browser Request        ┌───────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ request id ─▶ catch-all route ─▶ upstream ───┼──▶ Backend
//!                            │                  (headers, cookies, body)     │
//!     Browser Response       │                                               │
//!     ◀──────────────────────┼── relay (status, Set-Cookie, content type) ◀──┼─── Backend
//!                            └───────────────────────────────────────────────┘
//! ```
//!
//! Configuration precedence: CLI flags, then `DEVCONNECT_API_URL`, then the
//! TOML file, then built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use devconnect_proxy::config::{self, ProxyConfig};
use devconnect_proxy::lifecycle::{wait_for_signal, Shutdown};
use devconnect_proxy::observability::{logging, metrics};
use devconnect_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "devconnect-proxy")]
#[command(about = "Same-origin API proxy for the DevConnect web client", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:3000.
    #[arg(short, long)]
    bind: Option<String>,

    /// Backend origin, e.g. http://localhost:8080.
    #[arg(long)]
    backend_url: Option<String>,
}

fn build_config(cli: Cli) -> Result<ProxyConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::read_config(path)?,
        None => ProxyConfig::default(),
    };

    config::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    config::finalize(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(Cli::parse())?;

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.base_url,
        path_prefix = %config.listener.path_prefix,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
