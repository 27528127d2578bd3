//! Error types for wirekv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for wirekv operations
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport is not connected")]
    NotConnected,

    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("checksum mismatch: header {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { expected: u64, computed: u64 },

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("timed out waiting for server response")]
    Timeout,
}

impl WireError {
    /// Whether this error is a read deadline expiring rather than a hard fault.
    ///
    /// `WouldBlock` and `TimedOut` both appear for an expired socket read
    /// timeout depending on platform.
    pub fn is_timeout(&self) -> bool {
        match self {
            WireError::Timeout => true,
            WireError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}
