//! # wirekv
//!
//! A minimal remote key-value store with:
//! - A line-oriented text protocol (`PUT key value` / `GET key` / `DELETE key`)
//! - CRC-32 integrity checksums on every request
//! - Interchangeable TCP (stream) and UDP (datagram) transports
//! - A blocking client with timeout-based failure detection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐ send  ┌──────────────┐        ┌──────────────────┐
//! │    Client    ├──────▶│  Transport   │═══════▶│  Server Dispatch │
//! │ (request /   │       │ (TCP stream  │        │ (per-connection  │
//! │  timeout)    │◀──────┤  or UDP      │◀═══════┤  or per-packet)  │
//! └──────────────┘ recv  │  datagram)   │        └────────┬─────────┘
//!                        └──────────────┘                 │
//!                                             checksum ▸ parse ▸ apply
//!                                                         │
//!                                                  ┌──────▼──────┐
//!                                                  │    Store    │
//!                                                  │ (Mutex map) │
//!                                                  └─────────────┘
//! ```
//!
//! Requests travel as checksum-framed UTF-8 text; responses come back as a
//! single human-readable line. Nothing is persisted: the store lives and
//! dies with the server process.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod protocol;
pub mod store;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{Result, WireError};
pub use network::{Client, Server};
pub use store::Store;
pub use transport::{TcpTransport, Transport, TransportKind, UdpTransport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of wirekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
