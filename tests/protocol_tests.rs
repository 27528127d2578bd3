//! Protocol Tests
//!
//! Tests for the checksum codec, request parsing, and frame codec.

use std::io::Cursor;

use wirekv::protocol::{
    checksum, checksum_header, decode_request_packet, decode_response_packet,
    encode_request_packet, encode_response_packet, read_request, read_response, write_request,
    write_response, Frame, Request, CHECKSUM_LEN, MAX_DATAGRAM_LEN,
};

// =============================================================================
// Checksum Tests
// =============================================================================

#[test]
fn test_checksum_deterministic() {
    let a = checksum("PUT key1 42");
    let b = checksum("PUT key1 42");
    assert_eq!(a, b);
}

#[test]
fn test_checksum_known_vector() {
    // Standard CRC-32 (IEEE) check value
    assert_eq!(checksum("123456789"), 0xCBF4_3926);
}

#[test]
fn test_checksum_sensitive_to_token_changes() {
    let base = checksum("PUT key1 42");
    assert_ne!(base, checksum("PUT key1 43"));
    assert_ne!(base, checksum("PUT key2 42"));
    assert_ne!(base, checksum("GET key1 42"));
    assert_ne!(base, checksum("PUT key1  42")); // whitespace matters
}

#[test]
fn test_checksum_header_widens_to_u64() {
    let text = "DELETE key1";
    assert_eq!(checksum_header(text), u64::from(checksum(text)));
}

// =============================================================================
// Request Encoding/Parsing Tests
// =============================================================================

#[test]
fn test_encode_canonical_forms() {
    let put = Request::Put {
        key: "key1".to_string(),
        value: 42,
    };
    assert_eq!(put.encode(), "PUT key1 42");

    let get = Request::Get {
        key: "key1".to_string(),
    };
    assert_eq!(get.encode(), "GET key1");

    let delete = Request::Delete {
        key: "key1".to_string(),
    };
    assert_eq!(delete.encode(), "DELETE key1");
}

#[test]
fn test_parse_roundtrip() {
    let requests = vec![
        Request::Put {
            key: "key1".to_string(),
            value: 42,
        },
        Request::Put {
            key: "neg".to_string(),
            value: -7,
        },
        Request::Get {
            key: "some-key".to_string(),
        },
        Request::Delete {
            key: "key1".to_string(),
        },
    ];

    for request in requests {
        let decoded = Request::parse(&request.encode()).unwrap();
        assert_eq!(decoded, request);
    }
}

#[test]
fn test_parse_ignores_trailing_tokens() {
    // Legacy clients appended the checksum as a trailing text token
    let decoded = Request::parse("GET key1 2931756089").unwrap();
    assert_eq!(
        decoded,
        Request::Get {
            key: "key1".to_string()
        }
    );

    let decoded = Request::parse("DELETE key1 12345").unwrap();
    assert_eq!(
        decoded,
        Request::Delete {
            key: "key1".to_string()
        }
    );
}

#[test]
fn test_parse_unknown_operation() {
    let err = Request::parse("FOO a b").unwrap_err();
    assert!(err.to_string().contains("unknown operation"));
}

#[test]
fn test_parse_operation_is_case_sensitive() {
    let err = Request::parse("put a 1").unwrap_err();
    assert!(err.to_string().contains("unknown operation"));
}

#[test]
fn test_parse_put_value_not_an_integer() {
    let err = Request::parse("PUT a notanumber").unwrap_err();
    assert!(err.to_string().contains("signed integer"));
}

#[test]
fn test_parse_put_missing_value() {
    let err = Request::parse("PUT a").unwrap_err();
    assert!(err.to_string().contains("missing a value"));
}

#[test]
fn test_parse_missing_key() {
    let err = Request::parse("GET").unwrap_err();
    assert!(err.to_string().contains("missing a key"));
}

#[test]
fn test_parse_empty_line() {
    let err = Request::parse("").unwrap_err();
    assert!(err.to_string().contains("empty request"));

    let err = Request::parse("   ").unwrap_err();
    assert!(err.to_string().contains("empty request"));
}

// =============================================================================
// Stream Framing Tests
// =============================================================================

#[test]
fn test_stream_request_roundtrip() {
    let request = Request::Put {
        key: "key1".to_string(),
        value: 42,
    };

    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();

    let frame = read_request(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(frame.text, "PUT key1 42");
    assert!(frame.checksum_ok());
    assert_eq!(Request::parse(&frame.text).unwrap(), request);
}

#[test]
fn test_stream_request_wire_format() {
    let request = Request::Get {
        key: "test".to_string(),
    };

    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();

    // Expected: [checksum u64 BE][len u16 BE][text]
    let expected_checksum = checksum_header("GET test");
    assert_eq!(&buffer[..8], &expected_checksum.to_be_bytes());
    assert_eq!(&buffer[8..10], &8u16.to_be_bytes()); // "GET test" is 8 bytes
    assert_eq!(&buffer[10..], b"GET test");
}

#[test]
fn test_stream_multiple_requests() {
    let requests = vec![
        Request::Put {
            key: "k1".to_string(),
            value: 1,
        },
        Request::Get {
            key: "k1".to_string(),
        },
        Request::Delete {
            key: "k1".to_string(),
        },
    ];

    let mut buffer = Vec::new();
    for request in &requests {
        write_request(&mut buffer, request).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &requests {
        let frame = read_request(&mut cursor).unwrap();
        assert!(frame.checksum_ok());
        assert_eq!(&Request::parse(&frame.text).unwrap(), expected);
    }
}

#[test]
fn test_stream_response_roundtrip() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, "stored key1 = 42").unwrap();

    let message = read_response(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(message, "stored key1 = 42");
}

#[test]
fn test_stream_response_wire_format() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, "hi").unwrap();

    // Expected: [len u16 BE][text], no checksum field on responses
    assert_eq!(&buffer[..2], &2u16.to_be_bytes());
    assert_eq!(&buffer[2..], b"hi");
}

#[test]
fn test_stream_truncated_frame() {
    // Checksum header only, no length prefix
    let buffer = vec![0u8; CHECKSUM_LEN];
    let result = read_request(&mut Cursor::new(buffer));
    assert!(result.is_err());
}

#[test]
fn test_stream_invalid_utf8_payload() {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&0u64.to_be_bytes());
    buffer.extend_from_slice(&2u16.to_be_bytes());
    buffer.extend_from_slice(&[0xFF, 0xFE]);

    let err = read_request(&mut Cursor::new(buffer)).unwrap_err();
    assert!(err.to_string().contains("UTF-8"));
}

// =============================================================================
// Datagram Framing Tests
// =============================================================================

#[test]
fn test_datagram_request_roundtrip() {
    let request = Request::Put {
        key: "key1".to_string(),
        value: 42,
    };

    let packet = encode_request_packet(&request).unwrap();
    let frame = decode_request_packet(&packet).unwrap();

    assert_eq!(frame.text, "PUT key1 42");
    assert!(frame.checksum_ok());
}

#[test]
fn test_datagram_request_wire_format() {
    let request = Request::Delete {
        key: "key1".to_string(),
    };

    let packet = encode_request_packet(&request).unwrap();
    assert_eq!(&packet[..8], &checksum_header("DELETE key1").to_be_bytes());
    assert_eq!(&packet[8..], b"DELETE key1");
}

#[test]
fn test_datagram_too_short() {
    let err = decode_request_packet(&[0x01, 0x02, 0x03]).unwrap_err();
    assert!(err.to_string().contains("too short"));
}

#[test]
fn test_datagram_oversize_request_refused() {
    let request = Request::Get {
        key: "k".repeat(MAX_DATAGRAM_LEN),
    };
    let err = encode_request_packet(&request).unwrap_err();
    assert!(err.to_string().contains("frame too large"));
}

#[test]
fn test_datagram_response_roundtrip() {
    let packet = encode_response_packet("key1 = 42").unwrap();
    assert_eq!(packet, b"key1 = 42");
    assert_eq!(decode_response_packet(&packet).unwrap(), "key1 = 42");
}

#[test]
fn test_datagram_oversize_response_refused() {
    let message = "x".repeat(MAX_DATAGRAM_LEN + 1);
    let err = encode_response_packet(&message).unwrap_err();
    assert!(err.to_string().contains("frame too large"));
}

// =============================================================================
// Frame Tests
// =============================================================================

#[test]
fn test_frame_checksum_mismatch_detected() {
    let request = Request::Put {
        key: "key1".to_string(),
        value: 42,
    };
    let mut frame = Frame::for_request(&request);
    assert!(frame.checksum_ok());
    assert!(frame.verify().is_ok());

    frame.checksum ^= 1;
    assert!(!frame.checksum_ok());
    let err = frame.verify().unwrap_err();
    assert!(err.to_string().contains("checksum mismatch"));
}
