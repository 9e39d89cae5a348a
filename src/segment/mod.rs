//! # Segments and Encoding Modes
//!
//! A QR payload is a sequence of segments, each encoded in one of six modes.
//! Every segment writes the same frame: a 4-bit mode indicator, a character
//! count whose width depends on the version, then the mode's payload bits.
//! The terminator and padding belong to the orchestrator, not the segment.
//!
//! ## Modes
//!
//! | Mode | Indicator | Alphabet | Density |
//! |------|-----------|----------|---------|
//! | Numeric | 0b0001 | 0-9 | 3 digits / 10 bits |
//! | Alphanumeric | 0b0010 | 0-9 A-Z ` $%*+-./:` | 2 chars / 11 bits |
//! | Byte | 0b0100 | any byte | 8 bits each |
//! | Kanji | 0b1000 | Shift-JIS double-byte | 13 bits each |
//! | Hanzi | 0b1101 | GB2312 double-byte | 13 bits each |
//! | ECI | 0b0111 | designator 0..=999999 | 1-3 bytes |
//!
//! ## Module Structure
//!
//! - [`numeric`], [`alphanumeric`], [`bytes`], [`kanji`], [`hanzi`], [`eci`]:
//!   per-mode validation, bit packing and decoding
//! - [`Mode`], [`Segment`]: the tagged types the orchestrator and decoder
//!   dispatch on

pub mod alphanumeric;
pub mod bytes;
pub mod eci;
pub mod hanzi;
pub mod kanji;
pub mod numeric;

use crate::bits::BitBuffer;
use crate::error::QrError;
use crate::version::Version;

/// A segment's encoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits 0-9
    Numeric,
    /// The 45-character alphanumeric alphabet
    Alphanumeric,
    /// Raw bytes
    Byte,
    /// Shift-JIS double-byte characters
    Kanji,
    /// GB2312 double-byte characters
    Hanzi,
    /// Extended Channel Interpretation designator
    Eci,
}

impl Mode {
    /// The 4-bit mode indicator.
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Hanzi => 0b1101,
            Mode::Eci => 0b0111,
        }
    }

    /// Look up a mode from its 4-bit indicator.
    pub fn from_indicator(bits: u32) -> Result<Self, QrError> {
        match bits {
            0b0001 => Ok(Mode::Numeric),
            0b0010 => Ok(Mode::Alphanumeric),
            0b0100 => Ok(Mode::Byte),
            0b1000 => Ok(Mode::Kanji),
            0b1101 => Ok(Mode::Hanzi),
            0b0111 => Ok(Mode::Eci),
            other => Err(QrError::UnknownMode(other)),
        }
    }

    /// Width of the character-count indicator for this mode at the given
    /// version (ISO/IEC 18004 Table 3; version ranges 1-9, 10-26, 27-40).
    pub fn length_bits(self, version: Version) -> usize {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Hanzi => [8, 10, 12],
            Mode::Eci => [0, 0, 0],
        };
        widths[version.range_index()]
    }

    /// Mode name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "Numeric",
            Mode::Alphanumeric => "Alphanumeric",
            Mode::Byte => "Byte",
            Mode::Kanji => "Kanji",
            Mode::Hanzi => "Hanzi",
            Mode::Eci => "ECI",
        }
    }

    /// Decode one segment body (indicator already consumed): read the
    /// character count and payload, returning the decoded text.
    ///
    /// ECI has no standalone body; the decoder loop handles the designator
    /// and its mandatory Byte follower.
    pub fn decode_segment(self, bits: &mut BitBuffer, version: Version) -> Result<String, QrError> {
        match self {
            Mode::Numeric => {
                let count = bits.read(self.length_bits(version))? as usize;
                numeric::decode(bits, count)
            }
            Mode::Alphanumeric => {
                let count = bits.read(self.length_bits(version))? as usize;
                alphanumeric::decode(bits, count)
            }
            Mode::Byte => {
                let count = bits.read(self.length_bits(version))? as usize;
                let payload = bytes::decode(bits, count)?;
                Ok(bytes::to_text(&payload))
            }
            Mode::Kanji => {
                let count = bits.read(self.length_bits(version))? as usize;
                kanji::decode(bits, count)
            }
            Mode::Hanzi => {
                hanzi::decode_subset(bits)?;
                let count = bits.read(self.length_bits(version))? as usize;
                hanzi::decode(bits, count)
            }
            Mode::Eci => Err(QrError::UnknownMode(self.indicator())),
        }
    }
}

/// One validated unit of payload data.
///
/// Constructors validate against the mode's alphabet up front, so an
/// instance can always be written. `write` re-checks while transcoding, so
/// hand-built variants still fail cleanly instead of emitting garbage bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Digits 0-9
    Numeric(String),
    /// The 45-character alphanumeric alphabet
    Alphanumeric(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Text encodable as Shift-JIS double-byte characters
    Kanji(String),
    /// Text encodable as GB2312 double-byte characters
    Hanzi(String),
    /// An ECI designator switching the charset of following Byte segments
    Eci(u32),
}

impl Segment {
    /// Build a numeric segment, rejecting non-digits.
    pub fn numeric(text: &str) -> Result<Self, QrError> {
        numeric::validate(text)?;
        Ok(Segment::Numeric(text.to_string()))
    }

    /// Build an alphanumeric segment, rejecting characters outside the
    /// 45-character alphabet.
    pub fn alphanumeric(text: &str) -> Result<Self, QrError> {
        alphanumeric::validate(text)?;
        Ok(Segment::Alphanumeric(text.to_string()))
    }

    /// Build a byte segment. All byte slices are acceptable.
    pub fn bytes(data: &[u8]) -> Self {
        Segment::Bytes(data.to_vec())
    }

    /// Build a Kanji segment, rejecting text that does not map into the
    /// Shift-JIS double-byte ranges.
    pub fn kanji(text: &str) -> Result<Self, QrError> {
        kanji::validate(text)?;
        Ok(Segment::Kanji(text.to_string()))
    }

    /// Build a Hanzi segment, rejecting text that does not map into the
    /// GB2312 double-byte ranges.
    pub fn hanzi(text: &str) -> Result<Self, QrError> {
        hanzi::validate(text)?;
        Ok(Segment::Hanzi(text.to_string()))
    }

    /// Build an ECI segment, rejecting designators above 999999.
    pub fn eci(id: u32) -> Result<Self, QrError> {
        eci::validate(id)?;
        Ok(Segment::Eci(id))
    }

    /// Pick the densest single mode that covers the whole payload:
    /// numeric, then alphanumeric, then byte.
    pub fn auto(payload: &str) -> Self {
        if numeric::validate(payload).is_ok() {
            Segment::Numeric(payload.to_string())
        } else if alphanumeric::validate(payload).is_ok() {
            Segment::Alphanumeric(payload.to_string())
        } else {
            Segment::Bytes(payload.as_bytes().to_vec())
        }
    }

    /// This segment's mode tag.
    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Bytes(_) => Mode::Byte,
            Segment::Kanji(_) => Mode::Kanji,
            Segment::Hanzi(_) => Mode::Hanzi,
            Segment::Eci(_) => Mode::Eci,
        }
    }

    /// The value written into the character-count field.
    pub fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(text) | Segment::Alphanumeric(text) => text.len(),
            Segment::Bytes(data) => data.len(),
            Segment::Kanji(text) | Segment::Hanzi(text) => text.chars().count(),
            Segment::Eci(_) => 0,
        }
    }

    /// Payload bits only (no mode indicator, no count field).
    pub fn length_in_bits(&self) -> usize {
        match self {
            Segment::Numeric(text) => numeric::payload_bits(text.len()),
            Segment::Alphanumeric(text) => alphanumeric::payload_bits(text.len()),
            Segment::Bytes(data) => data.len() * 8,
            Segment::Kanji(text) => 13 * text.chars().count(),
            // Subset indicator plus 13 bits per character.
            Segment::Hanzi(text) => 4 + 13 * text.chars().count(),
            Segment::Eci(id) => eci::designator_bits(*id),
        }
    }

    /// Complete bit cost at a version: indicator + count field + payload.
    pub fn total_bits(&self, version: Version) -> usize {
        4 + self.mode().length_bits(version) + self.length_in_bits()
    }

    /// Serialize this segment: mode indicator, character count, payload.
    pub fn write(&self, bits: &mut BitBuffer, version: Version) -> Result<(), QrError> {
        let mode = self.mode();
        bits.put(mode.indicator(), 4);
        match self {
            Segment::Numeric(text) => {
                bits.put(text.len() as u32, mode.length_bits(version));
                numeric::write(text, bits)
            }
            Segment::Alphanumeric(text) => {
                bits.put(text.len() as u32, mode.length_bits(version));
                alphanumeric::write(text, bits)
            }
            Segment::Bytes(data) => {
                bits.put(data.len() as u32, mode.length_bits(version));
                bytes::write(data, bits);
                Ok(())
            }
            Segment::Kanji(text) => {
                bits.put(text.chars().count() as u32, mode.length_bits(version));
                kanji::write(text, bits)
            }
            Segment::Hanzi(text) => {
                hanzi::write_subset(bits);
                bits.put(text.chars().count() as u32, mode.length_bits(version));
                hanzi::write(text, bits)
            }
            Segment::Eci(id) => eci::write_designator(*id, bits),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
