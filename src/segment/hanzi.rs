//! # Hanzi Mode
//!
//! Double-byte GB2312 characters per GB/T 18284. The segment body opens
//! with a 4-bit subset indicator (0b0001 = GB2312, the only assigned
//! value), then packs each character into 13 bits:
//!
//! ```text
//! 0xA1A1-0xAAFE:  cp -= 0xA1A1          0xB0A1-0xFAFE:  cp -= 0xA6A1
//! value = (cp >> 8)·0x60 + (cp & 0xFF)
//! ```
//!
//! Input is UTF-8 text; transcoding goes through encoding_rs (GBK, of which
//! GB2312 is the double-byte subset these ranges cover).

use crate::bits::BitBuffer;
use crate::error::QrError;

/// The GB2312 subset indicator.
const SUBSET_GB2312: u32 = 0b0001;

/// GB code point of a single character, if it lands in the packable
/// double-byte ranges.
fn code_point(c: char) -> Result<u16, QrError> {
    let mut buf = [0u8; 4];
    let s: &str = c.encode_utf8(&mut buf);
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(s);
    if had_errors || bytes.len() != 2 {
        return Err(QrError::IllegalCharacter {
            mode: "Hanzi",
            what: c.to_string(),
        });
    }
    let cp = u16::from(bytes[0]) << 8 | u16::from(bytes[1]);
    if (0xA1A1..=0xAAFE).contains(&cp) || (0xB0A1..=0xFAFE).contains(&cp) {
        Ok(cp)
    } else {
        Err(QrError::IllegalCharacter {
            mode: "Hanzi",
            what: c.to_string(),
        })
    }
}

/// Check that every character maps into the packable GB2312 ranges.
pub fn validate(text: &str) -> Result<(), QrError> {
    text.chars().try_for_each(|c| code_point(c).map(|_| ()))
}

/// Append the subset indicator. Written between the mode indicator and the
/// character count.
pub fn write_subset(bits: &mut BitBuffer) {
    bits.put(SUBSET_GB2312, 4);
}

/// Read and check the subset indicator.
pub fn decode_subset(bits: &mut BitBuffer) -> Result<(), QrError> {
    let subset = bits.read(4)?;
    if subset != SUBSET_GB2312 {
        return Err(QrError::InvalidSubset(subset));
    }
    Ok(())
}

/// Append `text` as 13-bit packed GB2312 values.
pub fn write(text: &str, bits: &mut BitBuffer) -> Result<(), QrError> {
    for c in text.chars() {
        let cp = code_point(c)?;
        let shifted = if cp <= 0xAAFE { cp - 0xA1A1 } else { cp - 0xA6A1 };
        let value = u32::from(shifted >> 8) * 0x60 + u32::from(shifted & 0xFF);
        bits.put(value, 13);
    }
    Ok(())
}

/// Read `count` packed characters back into text.
pub fn decode(bits: &mut BitBuffer, count: usize) -> Result<String, QrError> {
    let mut gb = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let value = bits.read(13)?;
        let mut cp = (value / 0x60) << 8 | (value % 0x60);
        cp += if cp < 0x0A00 { 0xA1A1 } else { 0xA6A1 };
        gb.push((cp >> 8) as u8);
        gb.push((cp & 0xFF) as u8);
    }
    let (text, _, had_errors) = encoding_rs::GBK.decode(&gb);
    if had_errors {
        return Err(QrError::IllegalCharacter {
            mode: "Hanzi",
            what: "undecodable GB2312 sequence".to_string(),
        });
    }
    Ok(text.into_owned())
}

// ============================================================================
// TESTS
// ============================================================================
