//! Network Module
//!
//! Server dispatch loop and client request cycle.
//!
//! ## Architecture
//! - Stream transport: single acceptor, one handler thread per connection
//! - Datagram transport: single receive loop, one packet at a time
//! - Both funnel through the same validate → parse → apply → respond path

mod client;
mod connection;
mod server;

pub use client::Client;
pub use connection::Connection;
pub use server::Server;

use crate::protocol::{Frame, Request, Response};
use crate::store::Store;

/// Process one received request frame into its response.
///
/// A checksum mismatch is logged but the request is still applied; corrupted
/// requests are detected, not rejected. Parse failures come back as textual
/// error responses so the connection or packet loop can keep serving.
pub(crate) fn process_frame(store: &Store, frame: &Frame) -> Response {
    if let Err(e) = frame.verify() {
        tracing::warn!("{}; processing request anyway", e);
    }

    match Request::parse(&frame.text) {
        Ok(request) => {
            let response = store.apply(&request);
            tracing::info!("{} {}: {}", request.operation(), request.key(), response.message);
            response
        }
        Err(e) => {
            tracing::error!("rejected request {:?}: {}", frame.text, e);
            Response::err(format!("error: {}", e))
        }
    }
}
