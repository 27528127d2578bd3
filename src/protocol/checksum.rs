//! Request integrity checksum
//!
//! CRC-32 (IEEE polynomial) over the UTF-8 bytes of a request's canonical
//! text form. Both sides must compute the checksum over the exact same byte
//! sequence, so callers always pass the output of [`Request::encode`].
//!
//! [`Request::encode`]: super::Request::encode

use crc32fast::Hasher;

/// Compute the CRC-32 checksum of a request's text form.
///
/// Pure and deterministic: identical input text always yields an identical
/// checksum, and any token change yields a different one with overwhelming
/// probability.
pub fn checksum(text: &str) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    hasher.finalize()
}

/// The checksum widened to the 8-byte header field carried on the wire.
pub fn checksum_header(text: &str) -> u64 {
    u64::from(checksum(text))
}
