//! # Alphanumeric Mode
//!
//! The 45-character alphabet `0-9`, `A-Z`, space, `$ % * + - . / :`.
//! Character pairs pack into 11 bits (`first·45 + second`); a trailing
//! single character takes 6 bits.

use crate::bits::BitBuffer;
use crate::error::QrError;

/// The alphabet, index = character value (ISO/IEC 18004 Table 5).
pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Value of a character in the alphabet, if present.
fn char_value(c: char) -> Option<u32> {
    ALPHABET.find(c).map(|i| i as u32)
}

/// Check that every character is in the alphabet.
pub fn validate(text: &str) -> Result<(), QrError> {
    match text.chars().find(|&c| char_value(c).is_none()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: "Alphanumeric",
            what: c.to_string(),
        }),
    }
}

/// Payload bits for `len` characters: 11 per pair plus 6 for a leftover.
pub fn payload_bits(len: usize) -> usize {
    11 * (len / 2) + 6 * (len % 2)
}

/// Append the character pairs of `text`.
pub fn write(text: &str, bits: &mut BitBuffer) -> Result<(), QrError> {
    validate(text)?;
    let values: Vec<u32> = text.chars().filter_map(char_value).collect();
    for pair in values.chunks(2) {
        match pair {
            [a, b] => bits.put(a * 45 + b, 11),
            [a] => bits.put(*a, 6),
            _ => unreachable!(),
        };
    }
    Ok(())
}

/// Read `count` characters back out of the bit stream.
pub fn decode(bits: &mut BitBuffer, count: usize) -> Result<String, QrError> {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let lookup = |value: u32| -> Result<char, QrError> {
        alphabet
            .get(value as usize)
            .copied()
            .ok_or(QrError::IllegalCharacter {
                mode: "Alphanumeric",
                what: format!("value {value}"),
            })
    };

    let mut text = String::with_capacity(count);
    let mut remaining = count;
    while remaining >= 2 {
        let value = bits.read(11)?;
        text.push(lookup(value / 45)?);
        text.push(lookup(value % 45)?);
        remaining -= 2;
    }
    if remaining == 1 {
        let value = bits.read(6)?;
        text.push(lookup(value)?);
    }
    Ok(text)
}

// ============================================================================
// TESTS
// ============================================================================
