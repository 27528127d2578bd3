//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (line-oriented text + CRC-32)
//!
//! ### Request text
//! ```text
//! PUT <key> <value>      value is a base-10 signed integer
//! GET <key>
//! DELETE <key>
//! ```
//!
//! ### Stream framing (TCP)
//! ```text
//! ┌───────────────┬──────────┬─────────────────────────┐
//! │ Checksum (8)  │ Len (2)  │   Request text (UTF-8)  │
//! └───────────────┴──────────┴─────────────────────────┘
//! ```
//! Responses are the same length-prefixed string without the checksum field.
//!
//! ### Datagram framing (UDP)
//! One packet per message, max 1024 bytes: checksum header + raw request
//! text outbound, raw response text inbound.
//!
//! The checksum is the CRC-32 (IEEE) of the request text and always travels
//! as a header field, never as a text token. The parser still tolerates a
//! trailing token so lines from clients that appended the checksum in text
//! form remain readable.

mod checksum;
mod codec;
mod request;
mod response;

pub use checksum::{checksum, checksum_header};
pub use codec::{
    decode_request_packet, decode_response_packet, encode_request_packet, encode_response_packet,
    read_request, read_response, write_request, write_response, Frame, CHECKSUM_LEN,
    MAX_DATAGRAM_LEN, MAX_TEXT_LEN,
};
pub use request::Request;
pub use response::Response;
