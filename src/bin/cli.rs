//! wirekv CLI Client
//!
//! Interactive client: reads `PUT key value` / `GET key` / `DELETE key`
//! lines from standard input and prints the server's response for each.
//! Malformed lines are rejected locally without contacting the server.

use std::io::{self, BufRead};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wirekv::protocol::Request;
use wirekv::{Client, Config, TcpTransport, Transport, TransportKind, UdpTransport, WireError};

/// wirekv CLI
#[derive(Parser, Debug)]
#[command(name = "wirekv-cli")]
#[command(about = "Interactive CLI for the wirekv key-value store")]
#[command(version)]
struct Args {
    /// Server host
    host: String,

    /// Server port
    port: u16,

    /// Transport protocol (TCP or UDP)
    transport: TransportKind,

    /// Response timeout in seconds
    #[arg(long, default_value = "60")]
    timeout_secs: u64,

    /// Seed the store with demo data before the interactive loop
    #[arg(long)]
    prepopulate: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wirekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .addr(format!("{}:{}", args.host, args.port))
        .transport(args.transport)
        .request_timeout_ms(args.timeout_secs * 1000)
        .build();

    let timeout = config.request_timeout();
    let transport: Box<dyn Transport> = match config.transport {
        TransportKind::Tcp => Box::new(TcpTransport::new(config.addr.as_str(), timeout)),
        TransportKind::Udp => Box::new(UdpTransport::new(config.addr.as_str(), timeout)),
    };

    let mut client = Client::new(transport);
    if let Err(e) = client.connect() {
        tracing::error!("failed to connect to {}: {}", config.addr, e);
        std::process::exit(1);
    }
    tracing::info!("connected to {} over {}", config.addr, config.transport);

    if args.prepopulate {
        if let Err(e) = prepopulate(&mut client) {
            tracing::error!("prepopulation failed: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = interactive_loop(&mut client) {
        tracing::error!("session ended with error: {}", e);
        std::process::exit(1);
    }
}

/// Seed the store with ten pairs, then run five PUT/GET/DELETE rounds
fn prepopulate<T: Transport>(client: &mut Client<T>) -> wirekv::Result<()> {
    tracing::info!("seeding the store with 10 key-value pairs");
    for i in 1..=10i64 {
        let response = client.put(&format!("key{}", i), i)?;
        tracing::info!("{}", response);
    }

    tracing::info!("running 5 PUT/GET/DELETE rounds");
    for i in 11..=15i64 {
        let key = format!("key{}", i);
        tracing::info!("{}", client.put(&key, i)?);
        tracing::info!("{}", client.get(&key)?);
        tracing::info!("{}", client.delete(&key)?);
    }
    Ok(())
}

/// Read-eval loop over standard input
fn interactive_loop<T: Transport>(client: &mut Client<T>) -> wirekv::Result<()> {
    println!("Enter PUT <key> <value>, GET <key> or DELETE <key> (Ctrl-D to exit):");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request = match parse_input(line) {
            Ok(request) => request,
            Err(message) => {
                // Malformed input never reaches the server
                println!("{}", message);
                continue;
            }
        };

        match client.send_with_timeout(&request) {
            Ok(response) => println!("{}", response),
            Err(WireError::Timeout) => {
                // A timed-out cycle leaves the transport disconnected; the
                // caller reconnects before issuing further requests
                println!("request timed out; reconnecting");
                client.connect()?;
            }
            Err(e) => return Err(e),
        }
    }

    client.disconnect()?;
    Ok(())
}

/// Validate the token count for the entered operation, then parse
fn parse_input(line: &str) -> std::result::Result<Request, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let count_ok = match tokens.first().copied() {
        Some("PUT") => tokens.len() == 3,
        Some("GET") | Some("DELETE") => tokens.len() == 2,
        _ => false,
    };
    if !count_ok {
        return Err(
            "invalid input, expected: PUT <key> <value>, GET <key> or DELETE <key>".to_string(),
        );
    }

    Request::parse(line).map_err(|e| e.to_string())
}
