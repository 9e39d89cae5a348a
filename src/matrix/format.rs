//! # Format and Version Information
//!
//! Two small BCH-protected words ride alongside the data:
//!
//! - **Format information** (15 bits): 2 EC-level bits and 3 mask bits,
//!   extended by a BCH(15,5) remainder (generator 0b10100110111) and XOR-ed
//!   with 0x5412 so an all-zero payload never produces an all-zero word.
//! - **Version information** (18 bits, versions 7-40 only): the 6-bit
//!   version number extended by a BCH(18,6) remainder (generator
//!   0b1111100100101), no XOR mask.
//!
//! Both words appear twice in the symbol. Decoding reads both copies and
//! accepts the valid codeword within Hamming distance 3 of either; with 32
//! (resp. 34) valid codewords at minimum distance 7 (resp. 8), that choice
//! is unambiguous.

use crate::error::QrError;
use crate::matrix::mask::MaskPattern;
use crate::version::{EccLevel, Version};

/// BCH(15,5) generator for format information.
const FORMAT_GENERATOR: u32 = 0b101_0011_0111;

/// XOR mask applied to the complete 15-bit format word.
const FORMAT_XOR: u32 = 0x5412;

/// BCH(18,6) generator for version information.
const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

/// The 15-bit format word for an EC level and mask pattern.
pub fn format_bits(level: EccLevel, mask: MaskPattern) -> u32 {
    let data = level.format_bits() << 3 | u32::from(mask.value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    (data << 10 | rem) ^ FORMAT_XOR
}

/// The 18-bit version word for a version (meaningful for 7..=40).
pub fn version_bits(version: Version) -> u32 {
    let data = version.number();
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    data << 12 | rem
}

fn hamming(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Recover EC level and mask pattern from the two format-word copies.
///
/// Each copy is matched against all 32 valid words; the closest within
/// distance 3 wins. Fails with [`QrError::InvalidFormatInformation`] when
/// neither copy comes close enough.
pub fn decode_format(copies: [u32; 2]) -> Result<(EccLevel, MaskPattern), QrError> {
    let mut best: Option<(u32, EccLevel, MaskPattern)> = None;
    for level in [EccLevel::L, EccLevel::M, EccLevel::Q, EccLevel::H] {
        for mask in 0..8u32 {
            let mask = MaskPattern::new(mask).expect("mask index in range");
            let word = format_bits(level, mask);
            let distance = copies.iter().map(|&c| hamming(c, word)).min().unwrap();
            if best.is_none_or(|(d, _, _)| distance < d) {
                best = Some((distance, level, mask));
            }
        }
    }
    match best {
        Some((distance, level, mask)) if distance <= 3 => Ok((level, mask)),
        _ => Err(QrError::InvalidFormatInformation),
    }
}

/// Recover the version from the two version-word copies (7..=40).
pub fn decode_version(copies: [u32; 2]) -> Result<Version, QrError> {
    let mut best: Option<(u32, Version)> = None;
    for number in 7..=40 {
        let version = Version::new(number).expect("version in range");
        let word = version_bits(version);
        let distance = copies.iter().map(|&c| hamming(c, word)).min().unwrap();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, version));
        }
    }
    match best {
        Some((distance, version)) if distance <= 3 => Ok(version),
        _ => Err(QrError::InvalidVersionInformation),
    }
}

// ============================================================================
// TESTS
// ============================================================================
