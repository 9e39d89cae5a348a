//! # Numeric Mode
//!
//! Digits 0-9, packed three at a time: each full group of three digits
//! becomes a 10-bit value, a trailing pair 7 bits, a trailing single digit
//! 4 bits.

use crate::bits::BitBuffer;
use crate::error::QrError;

/// Check that every character is a decimal digit.
pub fn validate(text: &str) -> Result<(), QrError> {
    match text.chars().find(|c| !c.is_ascii_digit()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: "Numeric",
            what: c.to_string(),
        }),
    }
}

/// Payload bits for `len` digits: 10 per full group of 3, then 7 or 4 for
/// the remainder.
pub fn payload_bits(len: usize) -> usize {
    10 * (len / 3) + [0, 4, 7][len % 3]
}

/// Append the digit groups of `text`.
pub fn write(text: &str, bits: &mut BitBuffer) -> Result<(), QrError> {
    validate(text)?;
    for group in text.as_bytes().chunks(3) {
        let value = group
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
        bits.put(value, group.len() * 3 + 1);
    }
    Ok(())
}

/// Read `count` digits back out of the bit stream.
pub fn decode(bits: &mut BitBuffer, count: usize) -> Result<String, QrError> {
    let mut text = String::with_capacity(count);
    let mut remaining = count;
    while remaining >= 3 {
        let value = bits.read(10)?;
        if value > 999 {
            return Err(QrError::IllegalCharacter {
                mode: "Numeric",
                what: format!("group value {value}"),
            });
        }
        text.push_str(&format!("{value:03}"));
        remaining -= 3;
    }
    match remaining {
        2 => {
            let value = bits.read(7)?;
            if value > 99 {
                return Err(QrError::IllegalCharacter {
                    mode: "Numeric",
                    what: format!("group value {value}"),
                });
            }
            text.push_str(&format!("{value:02}"));
        }
        1 => {
            let value = bits.read(4)?;
            if value > 9 {
                return Err(QrError::IllegalCharacter {
                    mode: "Numeric",
                    what: format!("group value {value}"),
                });
            }
            text.push_str(&format!("{value}"));
        }
        _ => {}
    }
    Ok(text)
}

// ============================================================================
// TESTS
// ============================================================================
