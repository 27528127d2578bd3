//! Protocol codec
//!
//! Framing for requests and responses on both transports.
//!
//! ## Wire Format
//!
//! ### Stream request frame
//! ```text
//! ┌───────────────┬──────────┬─────────────────────────┐
//! │ Checksum (8)  │ Len (2)  │   Request text (UTF-8)  │
//! └───────────────┴──────────┴─────────────────────────┘
//! ```
//!
//! ### Stream response frame
//! ```text
//! ┌──────────┬─────────────────────────┐
//! │ Len (2)  │  Response text (UTF-8)  │
//! └──────────┴─────────────────────────┘
//! ```
//!
//! ### Datagram request packet
//! Checksum (8) followed by the raw request text; the packet boundary is the
//! message boundary, so there is no length prefix. Response packets are the
//! raw response text. Both directions are capped at 1024 bytes.
//!
//! All integers are big-endian. The checksum field is the CRC-32 of the text
//! that follows, widened to 8 bytes; responses carry no checksum.

use std::io::{Read, Write};

use bytes::{BufMut, BytesMut};

use super::checksum::checksum_header;
use super::request::Request;
use crate::error::{Result, WireError};

/// Checksum header size in bytes
pub const CHECKSUM_LEN: usize = 8;

/// Length prefix size in bytes
pub const LEN_PREFIX: usize = 2;

/// Maximum request/response text length the stream framing can carry
pub const MAX_TEXT_LEN: usize = u16::MAX as usize;

/// Maximum datagram packet size, either direction
pub const MAX_DATAGRAM_LEN: usize = 1024;

/// A received request frame: the checksum header plus the text it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Checksum header as received (CRC-32 widened to 8 bytes)
    pub checksum: u64,

    /// The request text the checksum was computed over
    pub text: String,
}

impl Frame {
    /// Build the frame a well-behaved sender produces for `request`
    pub fn for_request(request: &Request) -> Self {
        let text = request.encode();
        Self {
            checksum: checksum_header(&text),
            text,
        }
    }

    /// The checksum recomputed over the received text
    pub fn computed_checksum(&self) -> u64 {
        checksum_header(&self.text)
    }

    /// Whether the checksum header matches the received text
    pub fn checksum_ok(&self) -> bool {
        self.checksum == self.computed_checksum()
    }

    /// Check the checksum header against the received text
    pub fn verify(&self) -> Result<()> {
        let computed = self.computed_checksum();
        if self.checksum == computed {
            Ok(())
        } else {
            Err(WireError::ChecksumMismatch {
                expected: self.checksum,
                computed,
            })
        }
    }
}

// =============================================================================
// Stream framing
// =============================================================================

/// Write a request frame to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let frame = Frame::for_request(request);
    let text = frame.text.as_bytes();

    if text.len() > MAX_TEXT_LEN {
        return Err(WireError::FrameTooLarge {
            len: text.len(),
            max: MAX_TEXT_LEN,
        });
    }

    let mut buf = BytesMut::with_capacity(CHECKSUM_LEN + LEN_PREFIX + text.len());
    buf.put_u64(frame.checksum);
    buf.put_u16(text.len() as u16);
    buf.put_slice(text);

    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete request frame from a stream
///
/// Blocks until the frame is fully read or an error occurs. The checksum is
/// returned alongside the text, not verified here; the dispatch path decides
/// what to do with a mismatch.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Frame> {
    let mut header = [0u8; CHECKSUM_LEN];
    reader.read_exact(&mut header)?;
    let checksum = u64::from_be_bytes(header);

    let text = read_text(reader)?;
    Ok(Frame { checksum, text })
}

/// Write a response frame to a stream
pub fn write_response<W: Write>(writer: &mut W, message: &str) -> Result<()> {
    let bytes = message.as_bytes();

    if bytes.len() > MAX_TEXT_LEN {
        return Err(WireError::FrameTooLarge {
            len: bytes.len(),
            max: MAX_TEXT_LEN,
        });
    }

    let mut buf = BytesMut::with_capacity(LEN_PREFIX + bytes.len());
    buf.put_u16(bytes.len() as u16);
    buf.put_slice(bytes);

    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response frame from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<String> {
    read_text(reader)
}

/// Read one length-prefixed UTF-8 string
fn read_text<R: Read>(reader: &mut R) -> Result<String> {
    let mut prefix = [0u8; LEN_PREFIX];
    reader.read_exact(&mut prefix)?;
    let len = u16::from_be_bytes(prefix) as usize;

    let mut payload = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut payload)?;
    }

    String::from_utf8(payload)
        .map_err(|_| WireError::MalformedRequest("frame payload is not valid UTF-8".to_string()))
}

// =============================================================================
// Datagram framing
// =============================================================================

/// Encode a request into a single self-contained packet
pub fn encode_request_packet(request: &Request) -> Result<Vec<u8>> {
    let frame = Frame::for_request(request);
    let text = frame.text.as_bytes();

    let len = CHECKSUM_LEN + text.len();
    if len > MAX_DATAGRAM_LEN {
        return Err(WireError::FrameTooLarge {
            len,
            max: MAX_DATAGRAM_LEN,
        });
    }

    let mut buf = BytesMut::with_capacity(len);
    buf.put_u64(frame.checksum);
    buf.put_slice(text);
    Ok(buf.to_vec())
}

/// Decode one received request packet
pub fn decode_request_packet(packet: &[u8]) -> Result<Frame> {
    if packet.len() < CHECKSUM_LEN {
        return Err(WireError::MalformedRequest(format!(
            "datagram too short for checksum header: {} bytes",
            packet.len()
        )));
    }

    let mut header = [0u8; CHECKSUM_LEN];
    header.copy_from_slice(&packet[..CHECKSUM_LEN]);
    let checksum = u64::from_be_bytes(header);

    let text = std::str::from_utf8(&packet[CHECKSUM_LEN..])
        .map_err(|_| WireError::MalformedRequest("datagram payload is not valid UTF-8".to_string()))?
        .to_string();

    Ok(Frame { checksum, text })
}

/// Encode a response into a single self-contained packet
pub fn encode_response_packet(message: &str) -> Result<Vec<u8>> {
    let bytes = message.as_bytes();
    if bytes.len() > MAX_DATAGRAM_LEN {
        return Err(WireError::FrameTooLarge {
            len: bytes.len(),
            max: MAX_DATAGRAM_LEN,
        });
    }
    Ok(bytes.to_vec())
}

/// Decode one received response packet
pub fn decode_response_packet(packet: &[u8]) -> Result<String> {
    std::str::from_utf8(packet)
        .map(str::to_string)
        .map_err(|_| WireError::MalformedRequest("datagram payload is not valid UTF-8".to_string()))
}
