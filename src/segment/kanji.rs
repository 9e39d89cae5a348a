//! # Kanji Mode
//!
//! Double-byte Shift-JIS characters in the ranges 0x8140-0x9FFC and
//! 0xE040-0xEBBF, packed into 13 bits each:
//!
//! ```text
//! 0x8140-0x9FFC:  cp -= 0x8140          0xE040-0xEBBF:  cp -= 0xC140
//! value = (cp >> 8)·0xC0 + (cp & 0xFF)
//! ```
//!
//! Input is ordinary UTF-8 text; transcoding to Shift-JIS goes through
//! encoding_rs. Characters that do not land in the double-byte ranges
//! (including plain ASCII, which Shift-JIS encodes as one byte) are
//! rejected as [`QrError::IllegalCharacter`].

use crate::bits::BitBuffer;
use crate::error::QrError;

/// Shift-JIS code point of a single character, if it lands in the
/// packable double-byte ranges.
fn code_point(c: char) -> Result<u16, QrError> {
    let mut buf = [0u8; 4];
    let s: &str = c.encode_utf8(&mut buf);
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(s);
    if had_errors || bytes.len() != 2 {
        return Err(QrError::IllegalCharacter {
            mode: "Kanji",
            what: c.to_string(),
        });
    }
    let cp = u16::from(bytes[0]) << 8 | u16::from(bytes[1]);
    if (0x8140..=0x9FFC).contains(&cp) || (0xE040..=0xEBBF).contains(&cp) {
        Ok(cp)
    } else {
        Err(QrError::IllegalCharacter {
            mode: "Kanji",
            what: c.to_string(),
        })
    }
}

/// Check that every character maps into the packable Shift-JIS ranges.
pub fn validate(text: &str) -> Result<(), QrError> {
    text.chars().try_for_each(|c| code_point(c).map(|_| ()))
}

/// Append `text` as 13-bit packed Shift-JIS values.
pub fn write(text: &str, bits: &mut BitBuffer) -> Result<(), QrError> {
    for c in text.chars() {
        let cp = code_point(c)?;
        let shifted = if cp <= 0x9FFC { cp - 0x8140 } else { cp - 0xC140 };
        let value = u32::from(shifted >> 8) * 0xC0 + u32::from(shifted & 0xFF);
        bits.put(value, 13);
    }
    Ok(())
}

/// Read `count` packed characters back into text.
pub fn decode(bits: &mut BitBuffer, count: usize) -> Result<String, QrError> {
    let mut sjis = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let value = bits.read(13)?;
        let mut cp = (value / 0xC0) << 8 | (value % 0xC0);
        cp += if cp < 0x1F00 { 0x8140 } else { 0xC140 };
        sjis.push((cp >> 8) as u8);
        sjis.push((cp & 0xFF) as u8);
    }
    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&sjis);
    if had_errors {
        return Err(QrError::IllegalCharacter {
            mode: "Kanji",
            what: "undecodable Shift-JIS sequence".to_string(),
        });
    }
    Ok(text.into_owned())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(validate("点茗").is_ok());
        // ASCII is single-byte in Shift-JIS, so it cannot ride Kanji mode.
        assert!(matches!(
            validate("a"),
            Err(QrError::IllegalCharacter { mode: "Kanji", .. })
        ));
    }

    #[test]
    fn test_reference_packing() {
        // 点 is 0x935F in Shift-JIS: (0x935F - 0x8140) = 0x121F,
        // 0x12·0xC0 + 0x1F = 3487.
        let mut bits = BitBuffer::new();
        write("点", &mut bits).unwrap();
        assert_eq!(bits.len(), 13);
        assert_eq!(bits.read(13).unwrap(), 3487);
    }

    #[test]
    fn test_roundtrip() {
        for text in ["点", "点茗", "漢字テスト"] {
            let mut bits = BitBuffer::new();
            write(text, &mut bits).unwrap();
            assert_eq!(bits.len(), 13 * text.chars().count());
            assert_eq!(decode(&mut bits, text.chars().count()).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_truncated() {
        let mut bits = BitBuffer::new();
        bits.put(3487, 13);
        assert!(matches!(
            decode(&mut bits, 2),
            Err(QrError::NotEnoughBits { .. })
        ));
    }
}
