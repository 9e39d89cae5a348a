//! # Decoder Pipeline
//!
//! Turns a tagged module matrix back into the payload string:
//!
//! ```text
//! format info (both copies) → version check → unmask → zig-zag read
//! → de-interleave → Reed-Solomon correct → bit-stream parse → string
//! ```
//!
//! Geometry is assumed resolved: the input matrix carries its version and
//! function tags (see [`QrMatrix::from_modules`] for bridging from a raw
//! dark/light grid). Everything after that happens here: mask recovery,
//! error correction, segment parsing and ECI charset switching.
//!
//! ## Example
//!
//! ```
//! use trama::{QrOptions, decode, encode};
//!
//! let matrix = encode("01234567", &QrOptions::new()).unwrap();
//! assert_eq!(decode(&matrix).unwrap(), "01234567");
//! ```

use crate::bits::BitBuffer;
use crate::charset;
use crate::data;
use crate::error::QrError;
use crate::matrix::{QrMatrix, format};
use crate::segment::{Mode, bytes, eci};
use crate::version::Version;

/// Decode a module matrix into its payload string.
///
/// Fails with the first unrecoverable condition: unreadable format or
/// version information, an uncorrectable codeword block, an unknown mode
/// indicator, or a malformed segment.
pub fn decode(matrix: &QrMatrix) -> Result<String, QrError> {
    let (level, mask) = format::decode_format(matrix.read_format_words())?;

    if matrix.version().number() >= 7 {
        let version = format::decode_version(matrix.read_version_words())?;
        if version != matrix.version() {
            return Err(QrError::InvalidVersionInformation);
        }
    }

    let mut unmasked = matrix.clone();
    unmasked.apply_mask(mask);
    let codewords = unmasked.read_codewords();
    let data = data::deinterleave(&codewords, matrix.version(), level)?;
    parse_bitstream(data, matrix.version())
}

/// Parse the corrected data codewords: a run of segments closed by the
/// `0000` terminator (or by the stream simply running out of header bits).
fn parse_bitstream(data: Vec<u8>, version: Version) -> Result<String, QrError> {
    let mut bits = BitBuffer::from_bytes(data);
    let mut output = String::new();

    loop {
        if bits.available() < 4 {
            break;
        }
        let indicator = bits.read(4)?;
        if indicator == 0b0000 {
            break;
        }
        match Mode::from_indicator(indicator)? {
            Mode::Eci => {
                let designator = eci::decode_designator(&mut bits)?;
                output.push_str(&decode_eci_payload(&mut bits, version, designator)?);
            }
            mode => output.push_str(&mode.decode_segment(&mut bits, version)?),
        }
    }
    Ok(output)
}

/// An ECI designator binds to exactly the next segment, which must be a
/// Byte segment; its payload is transcoded through the charset table.
fn decode_eci_payload(
    bits: &mut BitBuffer,
    version: Version,
    designator: u32,
) -> Result<String, QrError> {
    if bits.available() < 4 {
        return Err(QrError::EciFollowedByInvalidMode("Terminator"));
    }
    let indicator = bits.read(4)?;
    if indicator == 0b0000 {
        return Err(QrError::EciFollowedByInvalidMode("Terminator"));
    }
    let follower = Mode::from_indicator(indicator)?;
    if follower != Mode::Byte {
        return Err(QrError::EciFollowedByInvalidMode(follower.name()));
    }
    let count = bits.read(Mode::Byte.length_bits(version))? as usize;
    let payload = bytes::decode(bits, count)?;
    Ok(charset::decode_bytes(designator, &payload))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::QrOptions;
    use crate::segment::Segment;
    use crate::version::EccLevel;
    use crate::{encode, encode_multi};

    fn bare() -> QrOptions {
        QrOptions::new().without_quiet_zone()
    }

    #[test]
    fn test_roundtrip_simple() {
        for payload in ["01234567", "HELLO WORLD", "mixed Case payload 123!"] {
            let matrix = encode(payload, &bare()).unwrap();
            assert_eq!(decode(&matrix).unwrap(), payload, "payload {payload:?}");
        }
    }

    #[test]
    fn test_roundtrip_with_quiet_zone() {
        let matrix = encode("QUIET", &QrOptions::new()).unwrap();
        assert_eq!(decode(&matrix).unwrap(), "QUIET");
    }

    #[test]
    fn test_roundtrip_multi_segment() {
        let segments = [
            Segment::numeric("0123456789").unwrap(),
            Segment::alphanumeric(" MIXED/MODES:").unwrap(),
            Segment::bytes("tail".as_bytes()),
        ];
        let matrix = encode_multi(&segments, &bare()).unwrap();
        assert_eq!(decode(&matrix).unwrap(), "0123456789 MIXED/MODES:tail");
    }

    #[test]
    fn test_eci_must_precede_byte() {
        // ECI followed by a numeric segment is malformed.
        let segments = [
            Segment::eci(26).unwrap(),
            Segment::numeric("42").unwrap(),
        ];
        let matrix = encode_multi(&segments, &bare()).unwrap();
        assert!(matches!(
            decode(&matrix),
            Err(QrError::EciFollowedByInvalidMode("Numeric"))
        ));
    }

    #[test]
    fn test_eci_terminator_is_invalid_follower() {
        let segments = [Segment::eci(26).unwrap()];
        let matrix = encode_multi(&segments, &bare()).unwrap();
        assert!(matches!(
            decode(&matrix),
            Err(QrError::EciFollowedByInvalidMode("Terminator"))
        ));
    }

    #[test]
    fn test_decode_survives_module_damage() {
        // Flip a sprinkling of data modules; level H absorbs them.
        let matrix = encode("DAMAGE TEST", &bare().with_ec_level(EccLevel::H)).unwrap();
        let mut grid: Vec<Vec<bool>> = (0..matrix.size())
            .map(|y| (0..matrix.size()).map(|x| matrix.is_dark(x, y)).collect())
            .collect();
        for (x, y) in [(12, 12), (13, 12), (18, 9), (9, 18), (15, 15)] {
            grid[y][x] = !grid[y][x];
        }
        let damaged = QrMatrix::from_modules(&grid).unwrap();
        assert_eq!(decode(&damaged).unwrap(), "DAMAGE TEST");
    }

    #[test]
    fn test_decode_reports_uncorrectable_blocks() {
        let matrix = encode("UNFIXABLE", &bare().with_ec_level(EccLevel::L)).unwrap();
        let mut grid: Vec<Vec<bool>> = (0..matrix.size())
            .map(|y| (0..matrix.size()).map(|x| matrix.is_dark(x, y)).collect())
            .collect();
        // Trash a wide band of data modules, far beyond level L's budget.
        for y in 9..13 {
            for x in 9..matrix.size() - 1 {
                grid[y][x] = !grid[y][x];
            }
        }
        let damaged = QrMatrix::from_modules(&grid).unwrap();
        assert!(matches!(
            decode(&damaged),
            Err(QrError::ReedSolomonFailure(_))
        ));
    }
}
