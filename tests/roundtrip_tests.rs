//! # Round-Trip Tests
//!
//! End-to-end coverage of the encode → decode pipeline, anchored on the
//! ISO/IEC 18004 worked example and exercising every segment mode, the ECI
//! charset switch, and the failure paths a caller can reach.
//!
//! Unit-level invariants (bit packing, tables, Reed-Solomon algebra, mask
//! involution) live next to their modules; these tests only go through the
//! public API.

use pretty_assertions::assert_eq;
use trama::{
    EccLevel, MaskPattern, ModeChoice, QrError, QrOptions, Segment, decode, encode, encode_binary,
    encode_multi,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Options without the default quiet zone, so module coordinates in
/// assertions match the symbol proper.
fn bare() -> QrOptions {
    QrOptions::new().without_quiet_zone()
}

/// Encode, decode, and require the payload back unchanged.
fn roundtrip(payload: &str, options: &QrOptions) {
    let matrix = encode(payload, options).expect("encode failed");
    assert_eq!(decode(&matrix).expect("decode failed"), payload);
}

// ============================================================================
// REFERENCE SCENARIOS
// ============================================================================

#[test]
fn iso_reference_symbol_1m_mask2() {
    // The ISO/IEC 18004 Annex worked example: "01234567", version 1-M,
    // mask pattern 2.
    let options = bare()
        .with_version(1)
        .unwrap()
        .with_ec_level(EccLevel::M)
        .with_mask(2)
        .unwrap();
    let matrix = encode("01234567", &options).unwrap();

    assert_eq!(matrix.version().number(), 1);
    assert_eq!(matrix.size(), 21);

    // The interleaved stream starts with the reference data codewords and
    // ends with the reference EC codewords.
    assert_eq!(
        matrix.read_codewords(),
        vec![
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11, 0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55,
        ]
    );

    // Format information carries (M, 2) in both copies.
    let words = matrix.read_format_words();
    assert_eq!(words[0], 0b101_1110_0111_1100);
    assert_eq!(words[0], words[1]);

    assert_eq!(decode(&matrix).unwrap(), "01234567");
}

#[test]
fn hello_world_alphanumeric_q() {
    let options = bare().with_ec_level(EccLevel::Q);
    let matrix = encode("HELLO WORLD", &options).unwrap();
    assert_eq!(matrix.version().number(), 1);
    assert_eq!(decode(&matrix).unwrap(), "HELLO WORLD");
}

#[test]
fn byte_mode_utf8_auto_version() {
    let payload = "Hello, 世界";
    let options = bare().with_ec_level(EccLevel::L).with_mode(ModeChoice::Byte);
    let matrix = encode(payload, &options).unwrap();
    assert_eq!(decode(&matrix).unwrap(), payload);
}

#[test]
fn eci_utf8_greek() {
    // ECI 26 (UTF-8) followed by the byte payload, at version 5.
    let payload = "Γειά";
    let segments = [
        Segment::eci(26).unwrap(),
        Segment::bytes(payload.as_bytes()),
    ];
    let options = bare().with_version(5).unwrap();
    let matrix = encode_multi(&segments, &options).unwrap();
    assert_eq!(matrix.size(), 37);
    assert_eq!(decode(&matrix).unwrap(), payload);
}

#[test]
fn hanzi_across_versions() {
    let payload = "无可奈何燃花作香";
    for version in [7u32, 15, 30] {
        let options = bare()
            .with_version(version)
            .unwrap()
            .with_mode(ModeChoice::Hanzi);
        let matrix = encode(payload, &options).unwrap();
        assert_eq!(matrix.version().number(), version);
        assert_eq!(decode(&matrix).unwrap(), payload, "version {version}");
    }
}

#[test]
fn oversized_payload_overflows() {
    // 2954 bytes cannot fit any version at level H.
    let payload = vec![0x5A; 2954];
    let result = encode_binary(&payload, &bare().with_ec_level(EccLevel::H));
    assert!(matches!(result, Err(QrError::DataOverflow(_))));
}

// ============================================================================
// BROADER ROUND-TRIP COVERAGE
// ============================================================================

#[test]
fn roundtrip_every_level() {
    for level in [EccLevel::L, EccLevel::M, EccLevel::Q, EccLevel::H] {
        roundtrip(
            "Turn data into modules and back again.",
            &bare().with_ec_level(level),
        );
    }
}

#[test]
fn roundtrip_sampled_versions() {
    // One payload pinned at a spread of versions, including multi-block
    // interleaving (v5+) and version-information territory (v7+).
    for version in [1u32, 4, 7, 11, 18, 26, 27, 33, 40] {
        let options = bare()
            .with_version(version)
            .unwrap()
            .with_ec_level(EccLevel::Q);
        roundtrip("SAMPLED VERSION ROUND TRIP 0123456789", &options);
    }
}

#[test]
fn roundtrip_kanji_mode() {
    let options = bare().with_mode(ModeChoice::Kanji);
    roundtrip("漢字モード", &options);
}

#[test]
fn roundtrip_every_mask() {
    for index in 0..8 {
        let options = bare().with_mask(index).unwrap();
        roundtrip("MASK PATTERN CHECK", &options);
    }
}

#[test]
fn roundtrip_multi_segment_mode_switching() {
    let segments = [
        Segment::numeric("314159265358979323846").unwrap(),
        Segment::alphanumeric(" AND THEN ").unwrap(),
        Segment::bytes("lowercase utf-8 ¶".as_bytes()),
        Segment::kanji("点").unwrap(),
    ];
    let matrix = encode_multi(&segments, &bare()).unwrap();
    assert_eq!(
        decode(&matrix).unwrap(),
        "314159265358979323846 AND THEN lowercase utf-8 ¶点"
    );
}

#[test]
fn eci_passthrough_preserves_bytes() {
    // ECI 0 (CP437) has no registered transcoding: the decoder passes the
    // payload through byte-per-code-point.
    let payload: Vec<u8> = vec![0x01, 0x48, 0x80, 0xFE];
    let segments = [Segment::eci(0).unwrap(), Segment::bytes(&payload)];
    let matrix = encode_multi(&segments, &bare()).unwrap();
    let text = decode(&matrix).unwrap();
    let recovered: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
    assert_eq!(recovered, payload);
}

#[test]
fn eci_shift_jis_transcodes() {
    // ECI 20 marks the byte payload as Shift-JIS.
    let segments = [
        Segment::eci(20).unwrap(),
        Segment::bytes(&[0x93, 0x5F]), // 点
    ];
    let matrix = encode_multi(&segments, &bare()).unwrap();
    assert_eq!(decode(&matrix).unwrap(), "点");
}

// ============================================================================
// OPTION INTERACTIONS
// ============================================================================

#[test]
fn forced_version_equals_auto_floor() {
    // min_version lifts the automatic search without pinning it.
    let options = bare().with_min_version(10).unwrap();
    let matrix = encode("FLOOR", &options).unwrap();
    assert_eq!(matrix.version().number(), 10);
    assert_eq!(decode(&matrix).unwrap(), "FLOOR");
}

#[test]
fn fixed_mask_skips_evaluation() {
    for index in 0..8u32 {
        let options = bare().with_mask(index).unwrap();
        let matrix = encode("FIXED MASK", &options).unwrap();
        let (_, pattern) =
            trama::matrix::format::decode_format(matrix.read_format_words()).unwrap();
        assert_eq!(pattern, MaskPattern::new(index).unwrap());
    }
}

#[test]
fn logo_space_still_decodes_at_level_h() {
    let options = bare().with_ec_level(EccLevel::H).with_logo_space(7, 7);
    let matrix = encode("LOGO OVERLAY", &options).unwrap();
    assert_eq!(decode(&matrix).unwrap(), "LOGO OVERLAY");
}
