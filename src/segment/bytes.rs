//! # Byte Mode
//!
//! Raw bytes, 8 bits each. The mode itself carries no charset; outside an
//! ECI context the decoder presents the payload as UTF-8 when it parses,
//! and as a byte-per-code-point passthrough otherwise.

use crate::bits::BitBuffer;

/// Append the payload bytes.
pub fn write(data: &[u8], bits: &mut BitBuffer) {
    for &b in data {
        bits.put(u32::from(b), 8);
    }
}

/// Read `count` bytes back out of the bit stream.
pub fn decode(bits: &mut BitBuffer, count: usize) -> Result<Vec<u8>, crate::error::QrError> {
    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        data.push(bits.read(8)? as u8);
    }
    Ok(data)
}

/// Present decoded bytes with no ECI context in effect: UTF-8 when valid,
/// byte-per-code-point otherwise.
pub fn to_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => data.iter().map(|&b| char::from(b)).collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let payload = b"Hello, \xe4\xb8\x96\xe7\x95\x8c";
        let mut bits = BitBuffer::new();
        write(payload, &mut bits);
        assert_eq!(bits.len(), payload.len() * 8);
        assert_eq!(decode(&mut bits, payload.len()).unwrap(), payload);
    }

    #[test]
    fn test_to_text_utf8() {
        assert_eq!(to_text("Hello, 世界".as_bytes()), "Hello, 世界");
    }

    #[test]
    fn test_to_text_binary_passthrough() {
        let text = to_text(&[0x00, 0x80, 0xFF]);
        assert_eq!(
            text.chars().map(|c| c as u32).collect::<Vec<_>>(),
            vec![0x00, 0x80, 0xFF]
        );
    }

    #[test]
    fn test_decode_truncated() {
        let mut bits = BitBuffer::new();
        bits.put(0xAB, 8);
        assert!(decode(&mut bits, 2).is_err());
    }
}
