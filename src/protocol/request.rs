//! Request definitions
//!
//! A request is one store operation in its canonical text form:
//! `OPERATION KEY [VALUE]`, single-space separated, case-sensitive verbs.

use crate::error::{Result, WireError};

/// A parsed store request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Insert or overwrite a key-value pair
    Put { key: String, value: i64 },

    /// Look up the value for a key
    Get { key: String },

    /// Remove a key (no-op if absent)
    Delete { key: String },
}

impl Request {
    /// The operation verb as it appears on the wire
    pub fn operation(&self) -> &'static str {
        match self {
            Request::Put { .. } => "PUT",
            Request::Get { .. } => "GET",
            Request::Delete { .. } => "DELETE",
        }
    }

    /// The key this request operates on
    pub fn key(&self) -> &str {
        match self {
            Request::Put { key, .. } => key,
            Request::Get { key } => key,
            Request::Delete { key } => key,
        }
    }

    /// Encode to the canonical text form: `OPERATION KEY [VALUE]`.
    ///
    /// The checksum is computed over exactly this string, so the encoding
    /// must stay byte-for-byte stable: single spaces, no trailing
    /// whitespace.
    pub fn encode(&self) -> String {
        match self {
            Request::Put { key, value } => format!("PUT {} {}", key, value),
            Request::Get { key } => format!("GET {}", key),
            Request::Delete { key } => format!("DELETE {}", key),
        }
    }

    /// Parse a received text line into a request.
    ///
    /// Token 0 is the operation (exact match), token 1 the key, token 2 the
    /// value for PUT. Tokens past the ones an operation needs are ignored:
    /// older clients appended the integrity checksum as a trailing text
    /// token, and those lines should still parse.
    pub fn parse(line: &str) -> Result<Request> {
        let mut tokens = line.trim().split_whitespace();

        let operation = tokens
            .next()
            .ok_or_else(|| WireError::MalformedRequest("empty request".to_string()))?;

        let key = tokens
            .next()
            .ok_or_else(|| {
                WireError::MalformedRequest(format!("{} request is missing a key", operation))
            })?
            .to_string();

        match operation {
            "PUT" => {
                let token = tokens.next().ok_or_else(|| {
                    WireError::MalformedRequest("PUT request is missing a value".to_string())
                })?;
                let value = token.parse::<i64>().map_err(|_| {
                    WireError::MalformedRequest(format!(
                        "PUT value must be a signed integer, got {:?}",
                        token
                    ))
                })?;
                Ok(Request::Put { key, value })
            }
            "GET" => Ok(Request::Get { key }),
            "DELETE" => Ok(Request::Delete { key }),
            _ => Err(WireError::MalformedRequest(format!(
                "unknown operation {:?}, must be one of PUT, GET, DELETE",
                operation
            ))),
        }
    }
}
