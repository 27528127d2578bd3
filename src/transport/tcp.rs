//! Stream transport
//!
//! One long-lived TCP connection per peer. Requests go out as
//! checksum-framed strings; responses come back length-prefixed.

use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use super::Transport;
use crate::error::{Result, WireError};
use crate::protocol::{read_response, write_request, Request};

/// Client-side TCP transport
pub struct TcpTransport {
    /// Server address, `host:port`
    addr: String,

    /// Read deadline applied to every `receive`
    timeout: Duration,

    /// Live connection, present between `connect` and `disconnect`
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Create a transport for the given server address and response deadline
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            stream: None,
        }
    }

    /// Whether the transport currently holds a live connection
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(&self.addr)?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(self.timeout))?;

        tracing::debug!("connected to server {}", self.addr);
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("disconnected from server {}", self.addr);
        }
        Ok(())
    }

    fn send(&mut self, request: &Request) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(WireError::NotConnected)?;
        write_request(stream, request)
    }

    fn receive(&mut self) -> Result<String> {
        let stream = self.stream.as_mut().ok_or(WireError::NotConnected)?;
        match read_response(stream) {
            Err(e) if e.is_timeout() => Err(WireError::Timeout),
            other => other,
        }
    }
}
