//! # Encoder Entry Points
//!
//! The public face of the encoding pipeline:
//!
//! ```text
//! payload → segments → codeword stream → matrix placement
//!         → mask selection → format/version info → post-processing
//! ```
//!
//! [`encode`] covers the common case of one text payload; [`encode_binary`]
//! forces byte mode for raw data; [`encode_multi`] takes a hand-built
//! segment list for mode switching and ECI prefixes.
//!
//! ## Example
//!
//! ```
//! use trama::{QrOptions, encode};
//!
//! let options = QrOptions::new();
//! let matrix = encode("HELLO WORLD", &options).unwrap();
//! assert_eq!(matrix.version().number(), 1);
//! ```

use crate::data;
use crate::error::QrError;
use crate::matrix::QrMatrix;
use crate::matrix::mask;
use crate::options::{MaskChoice, ModeChoice, QrOptions, VersionChoice};
use crate::segment::Segment;
use crate::version::EccLevel;

/// Encode a text payload into a finished matrix.
///
/// The segment mode follows `options.mode()`: automatic selection picks the
/// densest single mode covering the payload; a forced mode validates the
/// payload against that mode's alphabet.
pub fn encode(payload: &str, options: &QrOptions) -> Result<QrMatrix, QrError> {
    let segment = match options.mode() {
        ModeChoice::Auto => Segment::auto(payload),
        ModeChoice::Numeric => Segment::numeric(payload)?,
        ModeChoice::Alphanumeric => Segment::alphanumeric(payload)?,
        ModeChoice::Byte => Segment::bytes(payload.as_bytes()),
        ModeChoice::Kanji => Segment::kanji(payload)?,
        ModeChoice::Hanzi => Segment::hanzi(payload)?,
    };
    encode_multi(&[segment], options)
}

/// Encode raw bytes in byte mode.
pub fn encode_binary(payload: &[u8], options: &QrOptions) -> Result<QrMatrix, QrError> {
    encode_multi(&[Segment::bytes(payload)], options)
}

/// Encode a caller-built segment list into a finished matrix.
pub fn encode_multi(segments: &[Segment], options: &QrOptions) -> Result<QrMatrix, QrError> {
    let level = options.ec_level();
    if options.logo_space().is_some() && level != EccLevel::H {
        return Err(QrError::InvalidEccLevel(format!(
            "logo space requires level H, got {level}"
        )));
    }

    let fixed = match options.version() {
        VersionChoice::Auto => None,
        VersionChoice::Fixed(version) => Some(version),
    };
    let encoded = data::assemble(segments, fixed, options.min_version(), level)?;

    let mut matrix = QrMatrix::new(encoded.version);
    matrix.place_function_patterns();
    matrix.reserve_format_info();
    matrix.reserve_version_info();
    matrix.write_codewords(&encoded.codewords)?;

    let pattern = match options.mask_pattern() {
        MaskChoice::Fixed(pattern) => pattern,
        MaskChoice::Auto => mask::select(&matrix, encoded.ec_level),
    };
    matrix.apply_mask(pattern);
    matrix.set_format_info(encoded.ec_level, pattern);
    matrix.set_version_info();

    if let Some((width, height)) = options.logo_space() {
        matrix.set_logo_space(width, height);
    }
    if options.invert_matrix() {
        matrix.invert();
    }
    if options.add_quiet_zone() {
        matrix.add_quiet_zone(options.quiet_zone_size());
    }
    Ok(matrix)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ModuleKind;
    use crate::matrix::format;
    use crate::matrix::mask::MaskPattern;

    fn bare() -> QrOptions {
        QrOptions::new().without_quiet_zone()
    }

    #[test]
    fn test_encode_resolves_smallest_version() {
        let matrix = encode("HELLO WORLD", &bare().with_ec_level(EccLevel::Q)).unwrap();
        assert_eq!(matrix.version().number(), 1);
        assert_eq!(matrix.size(), 21);
    }

    #[test]
    fn test_forced_mode_validates() {
        let options = bare().with_mode(ModeChoice::Numeric);
        assert!(matches!(
            encode("12a", &options),
            Err(QrError::IllegalCharacter { .. })
        ));
        assert!(encode("123", &options).is_ok());
    }

    #[test]
    fn test_fixed_mask_is_used() {
        let options = bare().with_version(1).unwrap().with_mask(2).unwrap();
        let matrix = encode("01234567", &options.with_ec_level(EccLevel::M)).unwrap();
        let (level, pattern) = format::decode_format(matrix.read_format_words()).unwrap();
        assert_eq!(level, EccLevel::M);
        assert_eq!(pattern, MaskPattern::new(2).unwrap());
    }

    #[test]
    fn test_auto_mask_matches_sequential_evaluation() {
        // The rayon fan-out must agree with a sequential argmin.
        let options = bare().with_ec_level(EccLevel::M);
        let matrix = encode("DETERMINISM CHECK 123", &options).unwrap();
        let (_, chosen) = format::decode_format(matrix.read_format_words()).unwrap();

        let mut unmasked = matrix.clone();
        unmasked.apply_mask(chosen);
        let mut best = None;
        for index in 0..8 {
            let pattern = MaskPattern::new(index).unwrap();
            let mut trial = unmasked.clone();
            trial.apply_mask(pattern);
            trial.set_format_info(EccLevel::M, pattern);
            let score = mask::penalty(&trial);
            if best.is_none_or(|(s, _)| (score, index) < s) {
                best = Some(((score, index), pattern));
            }
        }
        assert_eq!(best.unwrap().1, chosen);
    }

    #[test]
    fn test_quiet_zone_and_invert() {
        let options = QrOptions::new()
            .with_quiet_zone(4)
            .unwrap()
            .with_invert_matrix(true);
        let matrix = encode("QZ", &options).unwrap();
        assert_eq!(matrix.full_size(), matrix.size() + 8);
        // Inverted quiet zone reads dark.
        assert!(matrix.module_at_full(0, 0).dark);
        assert_eq!(matrix.module_at_full(0, 0).kind, ModuleKind::QuietZone);
    }

    #[test]
    fn test_logo_space_requires_level_h() {
        let options = bare().with_logo_space(9, 9);
        assert!(matches!(
            encode("LOGO", &options),
            Err(QrError::InvalidEccLevel(_))
        ));
        let matrix = encode("LOGO", &bare().with_ec_level(EccLevel::H).with_logo_space(9, 9)).unwrap();
        let n = matrix.size();
        assert_eq!(matrix.kind(n / 2, n / 2), ModuleKind::Logo);
    }

    #[test]
    fn test_version_info_present_from_v7() {
        let options = bare().with_version(7).unwrap();
        let matrix = encode("V7", &options).unwrap();
        assert_eq!(
            format::decode_version(matrix.read_version_words()).unwrap(),
            matrix.version()
        );
    }
}
