//! Transport Module
//!
//! Abstraction over how protocol frames reach the server: a long-lived TCP
//! connection or self-contained UDP packets. The client composes with any
//! implementation; the protocol logic is identical either way.

mod tcp;
mod udp;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::protocol::Request;

/// Polymorphic delivery of requests and responses.
///
/// `send`/`receive` return [`crate::WireError::NotConnected`] before
/// `connect` or after `disconnect`. Implementations surface transport-level
/// I/O failure as `Io`/`Timeout`, never as a protocol parse error.
pub trait Transport {
    /// Establish (TCP) or locally set up (UDP) the connection
    fn connect(&mut self) -> Result<()>;

    /// Tear down the connection and release the socket
    fn disconnect(&mut self) -> Result<()>;

    /// Send one request frame
    fn send(&mut self, request: &Request) -> Result<()>;

    /// Block for the next response, bounded by the configured read timeout
    fn receive(&mut self) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self) -> Result<()> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<()> {
        (**self).disconnect()
    }

    fn send(&mut self, request: &Request) -> Result<()> {
        (**self).send(request)
    }

    fn receive(&mut self) -> Result<String> {
        (**self).receive()
    }
}

/// Which transport carries the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection-oriented stream transport
    Tcp,

    /// Connectionless datagram transport
    Udp,
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Ok(TransportKind::Tcp),
            "UDP" => Ok(TransportKind::Udp),
            _ => Err(format!("invalid transport {:?}, expected TCP or UDP", s)),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Tcp => write!(f, "TCP"),
            TransportKind::Udp => write!(f, "UDP"),
        }
    }
}
