//! Connection Handler
//!
//! Handles individual client connections on the stream transport.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;

use super::process_frame;
use crate::error::{Result, WireError};
use crate::protocol::{read_request, write_response};
use crate::store::Store;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared key-value store
    store: Arc<Store>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, store: Arc<Store>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            store,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads request frames in a loop and sends responses. Returns when the
    /// client disconnects or an I/O error ends the session; malformed
    /// requests are answered and the loop continues.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("connection established from {}", self.peer_addr);

        loop {
            let frame = match read_request(&mut self.reader) {
                Ok(frame) => frame,
                Err(WireError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    // Client disconnected gracefully
                    tracing::debug!("client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(WireError::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                    tracing::debug!("connection reset by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(WireError::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionAborted => {
                    tracing::debug!("connection aborted by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e @ WireError::MalformedRequest(_)) => {
                    // The frame was fully consumed but its payload was not
                    // decodable; answer and keep the session
                    tracing::error!("undecodable frame from {}: {}", self.peer_addr, e);
                    self.send_response(&format!("error: {}", e))?;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            tracing::trace!("received request from {}: {:?}", self.peer_addr, frame.text);

            let response = process_frame(&self.store, &frame);

            if let Err(e) = self.send_response(&response.message) {
                // If the client disconnected before we could send the
                // response, exit cleanly rather than report a server error
                if let WireError::Io(ref io_err) = e {
                    match io_err.kind() {
                        std::io::ErrorKind::ConnectionAborted
                        | std::io::ErrorKind::ConnectionReset
                        | std::io::ErrorKind::BrokenPipe => {
                            tracing::debug!(
                                "client {} disconnected before response could be sent: {}",
                                self.peer_addr,
                                e
                            );
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                tracing::warn!("error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Send a response frame to the client
    fn send_response(&mut self, message: &str) -> Result<()> {
        write_response(&mut self.writer, message)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
