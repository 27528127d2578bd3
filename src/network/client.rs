//! Client request cycle
//!
//! Synchronous request/response against a server, composed with any
//! [`Transport`]. A request either gets its response within the transport's
//! deadline or the cycle fails, the transport is disconnected, and the
//! caller must reconnect before trying again. Nothing is retried.

use crate::error::{Result, WireError};
use crate::protocol::Request;
use crate::transport::Transport;

/// Client for the key-value protocol over an injected transport
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Create a client over the given (not yet connected) transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Connect the underlying transport
    pub fn connect(&mut self) -> Result<()> {
        self.transport.connect()
    }

    /// Disconnect the underlying transport
    pub fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect()
    }

    /// Store a key-value pair
    pub fn put(&mut self, key: &str, value: i64) -> Result<String> {
        self.send_with_timeout(&Request::Put {
            key: key.to_string(),
            value,
        })
    }

    /// Fetch the server's report for a key
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.send_with_timeout(&Request::Get {
            key: key.to_string(),
        })
    }

    /// Delete a key
    pub fn delete(&mut self, key: &str) -> Result<String> {
        self.send_with_timeout(&Request::Delete {
            key: key.to_string(),
        })
    }

    /// Send one request and block for its response.
    ///
    /// On timeout the pending cycle is abandoned and the transport
    /// disconnected; subsequent requests fail with `NotConnected` until the
    /// caller reconnects. Transport errors end the cycle the same way.
    pub fn send_with_timeout(&mut self, request: &Request) -> Result<String> {
        if let Err(e) = self.transport.send(request) {
            tracing::error!("failed to send {} request: {}", request.operation(), e);
            let _ = self.transport.disconnect();
            return Err(e);
        }
        tracing::debug!("{} request sent for key {}", request.operation(), request.key());

        match self.transport.receive() {
            Ok(message) => {
                tracing::debug!("response received: {}", message);
                Ok(message)
            }
            Err(WireError::Timeout) => {
                tracing::error!("server response timed out");
                let _ = self.transport.disconnect();
                Err(WireError::Timeout)
            }
            Err(e) => {
                tracing::error!("error receiving response: {}", e);
                let _ = self.transport.disconnect();
                Err(e)
            }
        }
    }
}
