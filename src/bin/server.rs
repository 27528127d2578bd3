//! wirekv Server Binary
//!
//! Binds the requested transport and serves the key-value protocol forever.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wirekv::{Config, Server, TransportKind};

/// wirekv Server
#[derive(Parser, Debug)]
#[command(name = "wirekv-server")]
#[command(about = "Checksum-validated key-value store server")]
#[command(version)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Transport protocol (TCP or UDP)
    transport: TransportKind,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wirekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("wirekv server v{}", wirekv::VERSION);
    tracing::info!("starting {} server on {}:{}", args.transport, args.host, args.port);

    let config = Config::builder()
        .addr(format!("{}:{}", args.host, args.port))
        .transport(args.transport)
        .build();

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
