//! Datagram transport
//!
//! Connectionless: every request is one self-contained packet and every
//! response is the next packet back, capped at 1024 bytes. `connect` only
//! sets up the local socket; there is no peer session to tear down.

use std::net::UdpSocket;
use std::time::Duration;

use super::Transport;
use crate::error::{Result, WireError};
use crate::protocol::{
    decode_response_packet, encode_request_packet, Request, MAX_DATAGRAM_LEN,
};

/// Client-side UDP transport
pub struct UdpTransport {
    /// Server address, `host:port`
    addr: String,

    /// Read deadline applied to every `receive`
    timeout: Duration,

    /// Local socket, present between `connect` and `disconnect`
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Create a transport for the given server address and response deadline
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            socket: None,
        }
    }

    /// Whether the transport currently holds a local socket
    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }
}

impl Transport for UdpTransport {
    fn connect(&mut self) -> Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;

        // Fix the peer so `send`/`recv` target the server and stray packets
        // from other sources are filtered out
        socket.connect(&self.addr)?;
        socket.set_read_timeout(Some(self.timeout))?;

        tracing::debug!("datagram socket ready for server {}", self.addr);
        self.socket = Some(socket);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if self.socket.take().is_some() {
            tracing::debug!("datagram socket for {} closed", self.addr);
        }
        Ok(())
    }

    fn send(&mut self, request: &Request) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(WireError::NotConnected)?;
        let packet = encode_request_packet(request)?;
        socket.send(&packet)?;
        Ok(())
    }

    fn receive(&mut self) -> Result<String> {
        let socket = self.socket.as_mut().ok_or(WireError::NotConnected)?;

        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                return Err(WireError::Timeout);
            }
            Err(e) => return Err(e.into()),
        };

        decode_response_packet(&buf[..len])
    }
}
