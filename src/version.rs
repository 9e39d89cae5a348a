//! # Versions, EC Levels and Capacity Tables
//!
//! A QR symbol's geometry and capacity are fully determined by its version
//! (1..=40) and error correction level. This module holds both types and the
//! tables derived from ISO/IEC 18004:
//!
//! | Quantity | Source |
//! |---|---|
//! | Module count | `17 + 4·version` |
//! | Alignment-pattern centers | closed-form step rule (matches Annex E) |
//! | Raw codeword capacity | module count minus function patterns |
//! | EC codewords per block, block count | Table 13-22 constants |
//!
//! The EC block layout is exposed as `(block_count, data_codewords_per_block,
//! ec_codewords_per_block)` groups with the shorter blocks first, which is
//! the order both the interleaver and de-interleaver walk them in.

use crate::error::QrError;

/// The error correction level in a QR Code symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EccLevel {
    /// Recovers from about 7% erroneous codewords
    L,
    /// Recovers from about 15% erroneous codewords
    M,
    /// Recovers from about 25% erroneous codewords
    Q,
    /// Recovers from about 30% erroneous codewords
    H,
}

impl EccLevel {
    /// Row index into the capacity tables (L=0, M=1, Q=2, H=3).
    pub(crate) fn ordinal(self) -> usize {
        match self {
            EccLevel::L => 0,
            EccLevel::M => 1,
            EccLevel::Q => 2,
            EccLevel::H => 3,
        }
    }

    /// The 2-bit codepoint used in format information.
    ///
    /// Note this is not the table ordinal: L=0b01, M=0b00, Q=0b11, H=0b10.
    pub fn format_bits(self) -> u32 {
        match self {
            EccLevel::L => 0b01,
            EccLevel::M => 0b00,
            EccLevel::Q => 0b11,
            EccLevel::H => 0b10,
        }
    }

    /// Inverse of [`format_bits`](Self::format_bits).
    pub fn from_format_bits(bits: u32) -> Result<Self, QrError> {
        match bits {
            0b01 => Ok(EccLevel::L),
            0b00 => Ok(EccLevel::M),
            0b11 => Ok(EccLevel::Q),
            0b10 => Ok(EccLevel::H),
            other => Err(QrError::InvalidEccLevel(format!("0b{other:02b}"))),
        }
    }

    /// Parse a level from its letter (either case).
    pub fn parse(s: &str) -> Result<Self, QrError> {
        match s.trim() {
            "L" | "l" => Ok(EccLevel::L),
            "M" | "m" => Ok(EccLevel::M),
            "Q" | "q" => Ok(EccLevel::Q),
            "H" | "h" => Ok(EccLevel::H),
            other => Err(QrError::InvalidEccLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for EccLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            EccLevel::L => "L",
            EccLevel::M => "M",
            EccLevel::Q => "Q",
            EccLevel::H => "H",
        };
        write!(f, "{letter}")
    }
}

/// A QR version number between 1 and 40 (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version in the Model 2 standard.
    pub const MIN: Version = Version(1);

    /// Largest version in the Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1..=40.
    pub fn new(number: u32) -> Result<Self, QrError> {
        if (1..=40).contains(&number) {
            Ok(Version(number as u8))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    /// The version number, in 1..=40.
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Modules per side: `17 + 4·version`.
    pub fn modules(self) -> usize {
        17 + 4 * usize::from(self.0)
    }

    /// Derive a version from a matrix side length, if it matches one.
    pub fn from_modules(modules: usize) -> Result<Self, QrError> {
        if modules >= 21 && modules <= 177 && (modules - 17) % 4 == 0 {
            Version::new(((modules - 17) / 4) as u32)
        } else {
            Err(QrError::InvalidVersion(modules as u32))
        }
    }

    /// Index into the three character-count ranges: 1-9, 10-26, 27-40.
    pub(crate) fn range_index(self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Center coordinates of the alignment patterns, ascending.
    ///
    /// Version 1 has none. The corner positions overlapping finder patterns
    /// are still listed; placement skips them.
    pub fn alignment_centers(self) -> Vec<usize> {
        let ver = usize::from(self.0);
        if ver == 1 {
            return Vec::new();
        }
        let count = ver / 7 + 2;
        let step = (ver * 8 + count * 3 + 5) / (count * 4 - 4) * 2;
        let mut centers: Vec<usize> = (0..count - 1)
            .map(|i| self.modules() - 7 - i * step)
            .collect();
        centers.push(6);
        centers.reverse();
        centers
    }

    /// Total codeword capacity (data + EC) of the symbol.
    pub fn raw_codewords(self) -> usize {
        let ver = usize::from(self.0);
        let mut bits = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let align = ver / 7 + 2;
            bits -= (25 * align - 10) * align - 55;
            if ver >= 7 {
                bits -= 36;
            }
        }
        bits / 8
    }

    /// Number of data codewords at the given EC level.
    pub fn data_codewords(self, level: EccLevel) -> usize {
        self.raw_codewords() - self.ec_codewords_per_block(level) * self.block_count(level)
    }

    /// Data capacity in bits at the given EC level.
    pub fn data_capacity_bits(self, level: EccLevel) -> usize {
        self.data_codewords(level) * 8
    }

    /// EC codewords per block at the given EC level.
    pub fn ec_codewords_per_block(self, level: EccLevel) -> usize {
        usize::from(ECC_CODEWORDS_PER_BLOCK[level.ordinal()][usize::from(self.0)])
    }

    /// Number of Reed-Solomon blocks at the given EC level.
    pub fn block_count(self, level: EccLevel) -> usize {
        usize::from(NUM_ERROR_CORRECTION_BLOCKS[level.ordinal()][usize::from(self.0)])
    }

    /// The EC block layout as `(block_count, data_codewords_per_block,
    /// ec_codewords_per_block)` groups, shorter blocks first.
    pub fn ec_block_layout(self, level: EccLevel) -> Vec<(usize, usize, usize)> {
        let blocks = self.block_count(level);
        let ec_len = self.ec_codewords_per_block(level);
        let raw = self.raw_codewords();
        let short_total = raw / blocks;
        let short_count = blocks - raw % blocks;
        let short_data = short_total - ec_len;

        let mut layout = vec![(short_count, short_data, ec_len)];
        if short_count < blocks {
            layout.push((blocks - short_count, short_data + 1, ec_len));
        }
        layout
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EC codewords per block, indexed `[level ordinal][version]`.
/// Entry 0 is a filler; versions start at 1. ISO/IEC 18004 Table 13-22.
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    // L
    [0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // M
    [0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28],
    // Q
    [0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // H
    [0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
];

/// Reed-Solomon block count, indexed `[level ordinal][version]`.
static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    // L
    [0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25],
    // M
    [0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49],
    // Q
    [0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68],
    // H
    [0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81],
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_range() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(Version::new(1).unwrap(), Version::MIN);
        assert_eq!(Version::new(40).unwrap(), Version::MAX);
    }

    #[test]
    fn test_module_count() {
        for v in 1..=40 {
            let version = Version::new(v).unwrap();
            assert_eq!(version.modules(), 17 + 4 * v as usize);
            assert_eq!(Version::from_modules(version.modules()).unwrap(), version);
        }
        assert!(Version::from_modules(20).is_err());
        assert!(Version::from_modules(181).is_err());
    }

    #[test]
    fn test_alignment_centers_reference_rows() {
        // Spot checks against ISO/IEC 18004 Annex E.
        assert_eq!(Version::new(1).unwrap().alignment_centers(), Vec::<usize>::new());
        assert_eq!(Version::new(2).unwrap().alignment_centers(), vec![6, 18]);
        assert_eq!(Version::new(7).unwrap().alignment_centers(), vec![6, 22, 38]);
        assert_eq!(
            Version::new(32).unwrap().alignment_centers(),
            vec![6, 34, 60, 86, 112, 138]
        );
        assert_eq!(
            Version::new(40).unwrap().alignment_centers(),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_raw_codewords_reference_values() {
        assert_eq!(Version::new(1).unwrap().raw_codewords(), 26);
        assert_eq!(Version::new(2).unwrap().raw_codewords(), 44);
        assert_eq!(Version::new(7).unwrap().raw_codewords(), 196);
        assert_eq!(Version::new(40).unwrap().raw_codewords(), 3706);
    }

    #[test]
    fn test_data_codeword_reference_values() {
        let cases = [
            (1, EccLevel::L, 19),
            (1, EccLevel::M, 16),
            (1, EccLevel::Q, 13),
            (1, EccLevel::H, 9),
            (5, EccLevel::Q, 62),
            (40, EccLevel::L, 2956),
            (40, EccLevel::H, 1276),
        ];
        for (v, level, expected) in cases {
            assert_eq!(
                Version::new(v).unwrap().data_codewords(level),
                expected,
                "version {v}-{level}"
            );
        }
    }

    #[test]
    fn test_layout_sums_match_capacities() {
        // For every (version, level): Σ count·data = data codewords and
        // Σ count·(data + ec) = raw codewords.
        for v in 1..=40 {
            let version = Version::new(v).unwrap();
            for level in [EccLevel::L, EccLevel::M, EccLevel::Q, EccLevel::H] {
                let layout = version.ec_block_layout(level);
                let data: usize = layout.iter().map(|&(n, d, _)| n * d).sum();
                let total: usize = layout.iter().map(|&(n, d, e)| n * (d + e)).sum();
                assert_eq!(data, version.data_codewords(level), "{v}-{level} data");
                assert_eq!(total, version.raw_codewords(), "{v}-{level} total");
                let blocks: usize = layout.iter().map(|&(n, _, _)| n).sum();
                assert_eq!(blocks, version.block_count(level), "{v}-{level} blocks");
            }
        }
    }

    #[test]
    fn test_layout_short_blocks_first() {
        // 5-Q: 2 blocks of 15 + 2 blocks of 16 data codewords, 18 EC each.
        let layout = Version::new(5).unwrap().ec_block_layout(EccLevel::Q);
        assert_eq!(layout, vec![(2, 15, 18), (2, 16, 18)]);
    }

    #[test]
    fn test_format_bits_roundtrip() {
        for level in [EccLevel::L, EccLevel::M, EccLevel::Q, EccLevel::H] {
            assert_eq!(EccLevel::from_format_bits(level.format_bits()).unwrap(), level);
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(EccLevel::parse("q").unwrap(), EccLevel::Q);
        assert!(EccLevel::parse("X").is_err());
    }
}
