//! Server dispatch loop
//!
//! Binds the configured transport and serves requests forever. The stream
//! path dedicates one thread to each accepted connection; the datagram path
//! handles every packet on the receive thread, replying to the packet's
//! source address.

use std::net::{SocketAddr, TcpListener, UdpSocket};
use std::sync::Arc;
use std::thread;

use super::{process_frame, Connection};
use crate::config::Config;
use crate::error::Result;
use crate::protocol::{decode_request_packet, encode_response_packet, MAX_DATAGRAM_LEN};
use crate::store::Store;
use crate::transport::TransportKind;

/// The bound server socket, one variant per transport
enum Binding {
    Tcp(TcpListener),
    Udp(UdpSocket),
}

/// A wirekv server: one store behind either transport
pub struct Server {
    store: Arc<Store>,
    binding: Binding,
}

impl Server {
    /// Bind the configured address.
    ///
    /// Failing to bind is the only fatal startup error; everything after
    /// `run` recovers per connection or per packet.
    pub fn bind(config: &Config) -> Result<Self> {
        let binding = match config.transport {
            TransportKind::Tcp => {
                let listener = TcpListener::bind(&config.addr)?;
                tracing::info!("TCP server listening on {}", listener.local_addr()?);
                Binding::Tcp(listener)
            }
            TransportKind::Udp => {
                let socket = UdpSocket::bind(&config.addr)?;
                tracing::info!("UDP server listening on {}", socket.local_addr()?);
                Binding::Udp(socket)
            }
        };

        Ok(Self {
            store: Arc::new(Store::new()),
            binding,
        })
    }

    /// The address the server actually bound (port 0 resolves here)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        let addr = match &self.binding {
            Binding::Tcp(listener) => listener.local_addr()?,
            Binding::Udp(socket) => socket.local_addr()?,
        };
        Ok(addr)
    }

    /// Serve requests until a fatal socket failure (blocking)
    pub fn run(&self) -> Result<()> {
        match &self.binding {
            Binding::Tcp(listener) => Self::serve_stream(listener, &self.store),
            Binding::Udp(socket) => Self::serve_datagram(socket, &self.store),
        }
    }

    /// Accept loop: one handler thread per connection
    fn serve_stream(listener: &TcpListener, store: &Arc<Store>) -> Result<()> {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    // A failed accept affects only that connection attempt
                    tracing::warn!("failed to accept connection: {}", e);
                    continue;
                }
            };

            let store = Arc::clone(store);
            thread::spawn(move || match Connection::new(stream, store) {
                Ok(mut connection) => {
                    if let Err(e) = connection.handle() {
                        tracing::warn!(
                            "connection from {} ended with error: {}",
                            connection.peer_addr(),
                            e
                        );
                    }
                }
                Err(e) => tracing::warn!("failed to set up connection: {}", e),
            });
        }
        Ok(())
    }

    /// Packet loop: validate, dispatch and answer each datagram in turn
    fn serve_datagram(socket: &UdpSocket, store: &Arc<Store>) -> Result<()> {
        let mut buf = [0u8; MAX_DATAGRAM_LEN];

        loop {
            // A receive failure here is fatal to the loop; per-packet
            // problems below are answered or logged and skipped
            let (len, src) = socket.recv_from(&mut buf)?;
            tracing::debug!("received {} byte packet from {}", len, src);

            let message = match decode_request_packet(&buf[..len]) {
                Ok(frame) => process_frame(store, &frame).message,
                Err(e) => {
                    tracing::error!("undecodable packet from {}: {}", src, e);
                    format!("error: {}", e)
                }
            };

            match encode_response_packet(&message) {
                Ok(packet) => {
                    if let Err(e) = socket.send_to(&packet, src) {
                        tracing::warn!("failed to send response to {}: {}", src, e);
                    }
                }
                Err(e) => tracing::warn!("response to {} dropped: {}", src, e),
            }
        }
    }
}
