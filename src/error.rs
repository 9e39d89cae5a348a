//! # Error Types
//!
//! This module defines error types used throughout the trama library.

use thiserror::Error;

/// Main error type for trama operations
#[derive(Debug, Error)]
pub enum QrError {
    /// Payload exceeds the capacity of version 40 at the requested EC level
    #[error("Data overflow: {0} bits do not fit any version up to 40 at the requested EC level")]
    DataOverflow(usize),

    /// Version outside 1..=40
    #[error("Invalid version: {0} (expected 1..=40)")]
    InvalidVersion(u32),

    /// Unrecognized error correction level
    #[error("Invalid EC level: {0}")]
    InvalidEccLevel(String),

    /// Mask pattern outside 0..=7
    #[error("Invalid mask pattern: {0} (expected 0..=7)")]
    InvalidMaskPattern(u32),

    /// Quiet zone size outside 0..=75
    #[error("Invalid quiet zone size: {0} (expected 0..=75)")]
    InvalidQuietZoneSize(usize),

    /// ECI designator outside 0..=999999
    #[error("Invalid ECI designator: {0} (expected 0..=999999)")]
    InvalidEciDesignator(u32),

    /// Character outside the segment mode's alphabet
    #[error("Illegal character for {mode} mode: {what}")]
    IllegalCharacter {
        /// Mode whose alphabet was violated
        mode: &'static str,
        /// Offending character or byte value
        what: String,
    },

    /// Hanzi subset indicator other than GB2312
    #[error("Invalid Hanzi subset indicator: {0} (only GB2312 = 1 is supported)")]
    InvalidSubset(u32),

    /// Bit stream exhausted mid-read
    #[error("Not enough bits: requested {requested}, {available} available")]
    NotEnoughBits {
        /// Bits the reader asked for
        requested: usize,
        /// Bits left in the buffer
        available: usize,
    },

    /// Unrecognized 4-bit mode indicator in the decoder
    #[error("Unknown mode indicator: 0b{0:04b}")]
    UnknownMode(u32),

    /// An ECI segment must be immediately followed by a Byte segment
    #[error("ECI designator followed by {0} segment (expected Byte)")]
    EciFollowedByInvalidMode(&'static str),

    /// Uncorrectable Reed-Solomon codeword block
    #[error("Reed-Solomon failure: {0}")]
    ReedSolomonFailure(&'static str),

    /// Neither format information copy could be corrected
    #[error("Invalid format information")]
    InvalidFormatInformation,

    /// Version information unreadable or disagreeing with the matrix size
    #[error("Invalid version information")]
    InvalidVersionInformation,

    /// Data placement disagrees with the function-pattern layout.
    /// Indicates an encoder bug, not bad input.
    #[error("Matrix invariant violation: {0}")]
    MatrixInvariantViolation(String),

    /// Unreadable or undecodable image input for a luminance source
    #[error("Cannot read image: {0}")]
    CannotReadImage(String),

    /// I/O failure in the file-write helper
    #[error("Cannot write file {path}: {source}")]
    CannotWriteFile {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
