//! Response definitions
//!
//! Only the message string travels on the wire; the success flag is a local
//! convenience for callers that want to branch without string matching.

/// Outcome of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Human-readable status/result line
    pub message: String,

    /// Whether the request was applied
    pub success: bool,
}

impl Response {
    /// Create a success response
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create an error response
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}
