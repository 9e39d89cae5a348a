//! # ECI Charset Table
//!
//! Maps ECI designators (the integers carried by ECI segments) to character
//! sets and transcodes Byte-segment payloads on decode.
//!
//! ## Designator Assignments
//!
//! | ECI id | Charset |
//! |--------|---------|
//! | 0, 2 | Code page 437 |
//! | 1, 3 | ISO-8859-1 (id 1 carries the legacy GLI interpretation) |
//! | 4-18 | ISO-8859-2 .. ISO-8859-16 |
//! | 20 | Shift-JIS |
//! | 21-24 | Windows-1250, -1251, -1252, -1256 |
//! | 25 | UTF-16BE |
//! | 26 | UTF-8 |
//! | 27 | US-ASCII |
//! | 28 | Big5 |
//! | 29 | GB18030 |
//! | 30 | EUC-KR |
//!
//! ## Passthrough
//!
//! Designators without a registered byte transcoding (CP437, the GLI
//! interpretations, and anything unassigned) pass the payload through
//! unchanged: each byte becomes the code point of the same value, so the
//! original bytes remain recoverable from the output string. A warning is
//! printed to stderr, matching how other unmappable input is reported
//! elsewhere in the library.

use encoding_rs::Encoding;

/// A character set reachable through an ECI designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EciCharset {
    /// Code page 437 (ids 0 and 2). No registered transcoding; bytes pass
    /// through unchanged.
    Cp437,
    /// ISO-8859-1 under the legacy Global Language Interpretation (id 1).
    /// Treated as unregistered; bytes pass through unchanged.
    Iso8859_1Gli,
    /// ISO-8859-1 (id 3)
    Iso8859_1,
    /// ISO-8859-2 (id 4)
    Iso8859_2,
    /// ISO-8859-3 (id 5)
    Iso8859_3,
    /// ISO-8859-4 (id 6)
    Iso8859_4,
    /// ISO-8859-5 (id 7)
    Iso8859_5,
    /// ISO-8859-6 (id 8)
    Iso8859_6,
    /// ISO-8859-7 (id 9)
    Iso8859_7,
    /// ISO-8859-8 (id 10)
    Iso8859_8,
    /// ISO-8859-9 (id 11)
    Iso8859_9,
    /// ISO-8859-10 (id 12)
    Iso8859_10,
    /// ISO-8859-11 (id 13)
    Iso8859_11,
    /// ISO-8859-13 (id 15)
    Iso8859_13,
    /// ISO-8859-14 (id 16)
    Iso8859_14,
    /// ISO-8859-15 (id 17)
    Iso8859_15,
    /// ISO-8859-16 (id 18)
    Iso8859_16,
    /// Shift-JIS (id 20)
    ShiftJis,
    /// Windows-1250 (id 21)
    Windows1250,
    /// Windows-1251 (id 22)
    Windows1251,
    /// Windows-1252 (id 23)
    Windows1252,
    /// Windows-1256 (id 24)
    Windows1256,
    /// UTF-16 big-endian (id 25)
    Utf16Be,
    /// UTF-8 (id 26)
    Utf8,
    /// US-ASCII (id 27)
    Ascii,
    /// Big5 (id 28)
    Big5,
    /// GB18030 (id 29)
    Gb18030,
    /// EUC-KR (id 30)
    EucKr,
}

impl EciCharset {
    /// Look up the charset assigned to a designator.
    pub fn from_id(id: u32) -> Option<Self> {
        use EciCharset::*;
        match id {
            0 | 2 => Some(Cp437),
            1 => Some(Iso8859_1Gli),
            3 => Some(Iso8859_1),
            4 => Some(Iso8859_2),
            5 => Some(Iso8859_3),
            6 => Some(Iso8859_4),
            7 => Some(Iso8859_5),
            8 => Some(Iso8859_6),
            9 => Some(Iso8859_7),
            10 => Some(Iso8859_8),
            11 => Some(Iso8859_9),
            12 => Some(Iso8859_10),
            13 => Some(Iso8859_11),
            15 => Some(Iso8859_13),
            16 => Some(Iso8859_14),
            17 => Some(Iso8859_15),
            18 => Some(Iso8859_16),
            20 => Some(ShiftJis),
            21 => Some(Windows1250),
            22 => Some(Windows1251),
            23 => Some(Windows1252),
            24 => Some(Windows1256),
            25 => Some(Utf16Be),
            26 => Some(Utf8),
            27 => Some(Ascii),
            28 => Some(Big5),
            29 => Some(Gb18030),
            30 => Some(EucKr),
            _ => None,
        }
    }

    /// The canonical designator for this charset.
    pub fn id(self) -> u32 {
        use EciCharset::*;
        match self {
            Cp437 => 0,
            Iso8859_1Gli => 1,
            Iso8859_1 => 3,
            Iso8859_2 => 4,
            Iso8859_3 => 5,
            Iso8859_4 => 6,
            Iso8859_5 => 7,
            Iso8859_6 => 8,
            Iso8859_7 => 9,
            Iso8859_8 => 10,
            Iso8859_9 => 11,
            Iso8859_10 => 12,
            Iso8859_11 => 13,
            Iso8859_13 => 15,
            Iso8859_14 => 16,
            Iso8859_15 => 17,
            Iso8859_16 => 18,
            ShiftJis => 20,
            Windows1250 => 21,
            Windows1251 => 22,
            Windows1252 => 23,
            Windows1256 => 24,
            Utf16Be => 25,
            Utf8 => 26,
            Ascii => 27,
            Big5 => 28,
            Gb18030 => 29,
            EucKr => 30,
        }
    }

    /// The registered byte transcoding, if one exists.
    ///
    /// ISO-8859-1 is handled separately (encoding_rs folds latin1 into
    /// windows-1252, which differs in 0x80-0x9F); ISO-8859-9 and -11 use
    /// their windows supersets.
    fn encoding(self) -> Option<&'static Encoding> {
        use EciCharset::*;
        match self {
            Cp437 | Iso8859_1Gli | Iso8859_1 => None,
            Iso8859_2 => Some(encoding_rs::ISO_8859_2),
            Iso8859_3 => Some(encoding_rs::ISO_8859_3),
            Iso8859_4 => Some(encoding_rs::ISO_8859_4),
            Iso8859_5 => Some(encoding_rs::ISO_8859_5),
            Iso8859_6 => Some(encoding_rs::ISO_8859_6),
            Iso8859_7 => Some(encoding_rs::ISO_8859_7),
            Iso8859_8 => Some(encoding_rs::ISO_8859_8),
            Iso8859_9 => Some(encoding_rs::WINDOWS_1254),
            Iso8859_10 => Some(encoding_rs::ISO_8859_10),
            Iso8859_11 => Some(encoding_rs::WINDOWS_874),
            Iso8859_13 => Some(encoding_rs::ISO_8859_13),
            Iso8859_14 => Some(encoding_rs::ISO_8859_14),
            Iso8859_15 => Some(encoding_rs::ISO_8859_15),
            Iso8859_16 => Some(encoding_rs::ISO_8859_16),
            ShiftJis => Some(encoding_rs::SHIFT_JIS),
            Windows1250 => Some(encoding_rs::WINDOWS_1250),
            Windows1251 => Some(encoding_rs::WINDOWS_1251),
            Windows1252 => Some(encoding_rs::WINDOWS_1252),
            Windows1256 => Some(encoding_rs::WINDOWS_1256),
            Utf16Be => Some(encoding_rs::UTF_16BE),
            Utf8 | Ascii => Some(encoding_rs::UTF_8),
            Big5 => Some(encoding_rs::BIG5),
            Gb18030 => Some(encoding_rs::GB18030),
            EucKr => Some(encoding_rs::EUC_KR),
        }
    }
}

/// Transcode a Byte-segment payload under the given ECI designator.
///
/// Falls back to byte passthrough when the designator has no registered
/// transcoding (see module docs).
pub fn decode_bytes(eci_id: u32, bytes: &[u8]) -> String {
    match EciCharset::from_id(eci_id) {
        Some(EciCharset::Iso8859_1) => latin1(bytes),
        Some(charset) => match charset.encoding() {
            Some(encoding) => {
                let (text, _, _) = encoding.decode(bytes);
                text.into_owned()
            }
            None => passthrough(eci_id, bytes),
        },
        None => passthrough(eci_id, bytes),
    }
}

/// Byte-per-code-point view, used both for ISO-8859-1 and as the
/// passthrough representation.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn passthrough(eci_id: u32, bytes: &[u8]) -> String {
    eprintln!("charset: no transcoding registered for ECI {eci_id}, passing {} bytes through", bytes.len());
    latin1(bytes)
}

// ============================================================================
// TESTS
// ============================================================================
