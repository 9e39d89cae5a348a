//! # Bitstream Orchestration
//!
//! The stage between segments and the module matrix. Encoding:
//!
//! ```text
//! segments → bit stream (+ terminator + padding) → data codewords
//!          → per-block EC codewords → interleaved codeword stream
//! ```
//!
//! Decoding runs the inverse: the interleaved stream read off the matrix is
//! de-interleaved into blocks, each block Reed-Solomon corrected, and the
//! surviving data codewords concatenated back into a bit stream.
//!
//! ## Version Selection
//!
//! With no fixed version, the smallest version from `min_version` upward
//! whose data capacity holds the total bit count is chosen; the character
//! count fields widen at versions 10 and 27, so the total is re-evaluated
//! per candidate. [`QrError::DataOverflow`] reports the bit count that did
//! not fit version 40.
//!
//! ## Padding
//!
//! After the last segment: up to four zero terminator bits (fewer if
//! capacity is tight), zero bits to the next byte boundary, then alternating
//! pad codewords 0xEC / 0x11 up to the data capacity.

use crate::bits::BitBuffer;
use crate::error::QrError;
use crate::gf256::ReedSolomonCoder;
use crate::segment::Segment;
use crate::version::{EccLevel, Version};

/// The encoder's output for one symbol: the resolved geometry and the
/// interleaved codeword stream, ready for matrix placement.
#[derive(Debug, Clone)]
pub struct EncodedData {
    /// Resolved version (smallest fitting one under auto selection).
    pub version: Version,
    /// Error correction level.
    pub ec_level: EccLevel,
    /// Interleaved data + EC codewords; length is the version's raw
    /// codeword capacity.
    pub codewords: Vec<u8>,
}

/// Total bit cost of the segment list at a version.
fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|s| s.total_bits(version)).sum()
}

/// Find the smallest version from `min_version` upward that fits, or check
/// a caller-fixed version.
fn select_version(
    segments: &[Segment],
    fixed: Option<Version>,
    min_version: Version,
    level: EccLevel,
) -> Result<Version, QrError> {
    if let Some(version) = fixed {
        let needed = total_bits(segments, version);
        if needed > version.data_capacity_bits(level) {
            return Err(QrError::DataOverflow(needed));
        }
        return Ok(version);
    }
    let mut number = min_version.number();
    loop {
        let version = Version::new(number)?;
        let needed = total_bits(segments, version);
        if needed <= version.data_capacity_bits(level) {
            return Ok(version);
        }
        if number == 40 {
            return Err(QrError::DataOverflow(needed));
        }
        number += 1;
    }
}

/// Assemble segments into the final interleaved codeword stream.
///
/// `fixed` pins the version; `None` scans from `min_version`. The segment
/// list must not be empty of bits at version-40 capacity, or
/// [`QrError::DataOverflow`] is returned.
pub fn assemble(
    segments: &[Segment],
    fixed: Option<Version>,
    min_version: Version,
    level: EccLevel,
) -> Result<EncodedData, QrError> {
    let version = select_version(segments, fixed, min_version, level)?;
    let capacity_bits = version.data_capacity_bits(level);

    let mut bits = BitBuffer::new();
    for segment in segments {
        segment.write(&mut bits, version)?;
    }

    // Terminator, then zero-fill to the byte boundary.
    let terminator = (capacity_bits - bits.len()).min(4);
    if terminator > 0 {
        bits.put(0, terminator);
    }
    let boundary = (8 - bits.len() % 8) % 8;
    if boundary > 0 {
        bits.put(0, boundary);
    }

    // Alternating pad codewords up to capacity.
    for pad in [0xEC, 0x11].into_iter().cycle() {
        if bits.len() >= capacity_bits {
            break;
        }
        bits.put(pad, 8);
    }

    let data = bits.into_bytes();
    debug_assert_eq!(data.len(), version.data_codewords(level));
    Ok(EncodedData {
        version,
        ec_level: level,
        codewords: interleave(&data, version, level),
    })
}

/// Split data codewords into blocks, append per-block EC codewords, and
/// interleave both column-wise (data columns first, then EC columns).
/// Shorter blocks sit first; their absent final data column is skipped.
fn interleave(data: &[u8], version: Version, level: EccLevel) -> Vec<u8> {
    let layout = version.ec_block_layout(level);
    let ec_len = version.ec_codewords_per_block(level);
    let coder = ReedSolomonCoder::new(ec_len);

    let mut blocks: Vec<&[u8]> = Vec::new();
    let mut ec_blocks: Vec<Vec<u8>> = Vec::new();
    let mut offset = 0;
    for &(count, data_len, _) in &layout {
        for _ in 0..count {
            let block = &data[offset..offset + data_len];
            offset += data_len;
            blocks.push(block);
            ec_blocks.push(coder.encode(block));
        }
    }
    debug_assert_eq!(offset, data.len());

    let longest = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(version.raw_codewords());
    for column in 0..longest {
        for block in &blocks {
            if let Some(&codeword) = block.get(column) {
                out.push(codeword);
            }
        }
    }
    for column in 0..ec_len {
        for ec in &ec_blocks {
            out.push(ec[column]);
        }
    }
    out
}

/// Reverse the interleave, correct every block, and return the data
/// codewords in block order. The decoder feeds these straight into a
/// [`BitBuffer`].
pub fn deinterleave(
    codewords: &[u8],
    version: Version,
    level: EccLevel,
) -> Result<Vec<u8>, QrError> {
    assert_eq!(
        codewords.len(),
        version.raw_codewords(),
        "codeword stream length disagrees with the version capacity"
    );
    let layout = version.ec_block_layout(level);
    let ec_len = version.ec_codewords_per_block(level);

    let data_lens: Vec<usize> = layout
        .iter()
        .flat_map(|&(count, data_len, _)| std::iter::repeat_n(data_len, count))
        .collect();
    let longest = *data_lens.last().unwrap_or(&0);

    let mut blocks: Vec<Vec<u8>> = data_lens
        .iter()
        .map(|&len| Vec::with_capacity(len + ec_len))
        .collect();
    let mut cursor = codewords.iter();
    for column in 0..longest {
        for (block, &len) in blocks.iter_mut().zip(&data_lens) {
            if column < len {
                block.push(*cursor.next().unwrap());
            }
        }
    }
    for _ in 0..ec_len {
        for block in blocks.iter_mut() {
            block.push(*cursor.next().unwrap());
        }
    }

    let coder = ReedSolomonCoder::new(ec_len);
    let mut data = Vec::with_capacity(version.data_codewords(level));
    for (block, &len) in blocks.iter_mut().zip(&data_lens) {
        coder.decode(block)?;
        data.extend_from_slice(&block[..len]);
    }
    Ok(data)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(n: u32) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_iso_reference_codewords() {
        // "01234567" at 1-M: the ISO/IEC 18004 worked example's data and EC
        // codewords, single block.
        let segments = [Segment::numeric("01234567").unwrap()];
        let encoded = assemble(&segments, Some(v(1)), Version::MIN, EccLevel::M).unwrap();
        assert_eq!(encoded.version, v(1));
        assert_eq!(
            encoded.codewords,
            vec![
                0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
                0x11, 0xEC, 0x11, // 16 data codewords
                0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55, // 10 EC codewords
            ]
        );
    }

    #[test]
    fn test_auto_version_selection() {
        let segments = [Segment::alphanumeric("HELLO WORLD").unwrap()];
        let encoded = assemble(&segments, None, Version::MIN, EccLevel::Q).unwrap();
        assert_eq!(encoded.version, v(1));

        // 100 bytes need more than version 1 at level L (17 byte capacity).
        let segments = [Segment::bytes(&[0xAB; 100])];
        let encoded = assemble(&segments, None, Version::MIN, EccLevel::L).unwrap();
        assert_eq!(encoded.version, v(5));
    }

    #[test]
    fn test_min_version_floor() {
        let segments = [Segment::numeric("1").unwrap()];
        let encoded = assemble(&segments, None, v(7), EccLevel::M).unwrap();
        assert_eq!(encoded.version, v(7));
    }

    #[test]
    fn test_data_overflow() {
        // 2954 bytes exceed the 2953-byte capacity of 40-L, the largest there is.
        let segments = [Segment::bytes(&vec![0u8; 2954])];
        assert!(matches!(
            assemble(&segments, None, Version::MIN, EccLevel::L),
            Err(QrError::DataOverflow(_))
        ));
        // A fixed version that is too small fails the same way.
        let segments = [Segment::bytes(&[0u8; 20])];
        assert!(matches!(
            assemble(&segments, Some(v(1)), Version::MIN, EccLevel::L),
            Err(QrError::DataOverflow(_))
        ));
    }

    #[test]
    fn test_terminator_and_padding() {
        // One digit at 1-M: 4 + 10 + 4 = 18 payload bits, 4 terminator bits,
        // 2 boundary bits, then padding from codeword 3 on.
        let segments = [Segment::numeric("5").unwrap()];
        let encoded = assemble(&segments, Some(v(1)), Version::MIN, EccLevel::M).unwrap();
        let data = &encoded.codewords[..16];
        assert_eq!(&data[3..8], &[0xEC, 0x11, 0xEC, 0x11, 0xEC]);
    }

    #[test]
    fn test_interleave_multi_block() {
        // 5-Q: blocks of 15, 15, 16, 16 data codewords, 18 EC each.
        // Use distinct values so positions are checkable.
        let data: Vec<u8> = (0..62).collect();
        let interleaved = interleave(&data, v(5), EccLevel::Q);
        assert_eq!(interleaved.len(), v(5).raw_codewords());
        // First column: first codeword of each block.
        assert_eq!(&interleaved[..4], &[0, 15, 30, 46]);
        // Column 15 exists only in the two long blocks.
        let column_15 = &interleaved[15 * 4..15 * 4 + 2];
        assert_eq!(column_15, &[45, 61]);
    }

    #[test]
    fn test_deinterleave_inverts_interleave() {
        for (version, level) in [(v(1), EccLevel::M), (v(5), EccLevel::Q), (v(13), EccLevel::H)] {
            let data: Vec<u8> = (0..version.data_codewords(level))
                .map(|i| (i * 7 % 251) as u8)
                .collect();
            let interleaved = interleave(&data, version, level);
            assert_eq!(deinterleave(&interleaved, version, level).unwrap(), data);
        }
    }

    #[test]
    fn test_deinterleave_corrects_block_errors() {
        let data: Vec<u8> = (0..v(5).data_codewords(EccLevel::Q))
            .map(|i| i as u8)
            .collect();
        let mut interleaved = interleave(&data, v(5), EccLevel::Q);
        // 18 EC codewords per block correct up to 9 errors; hit a few spread
        // positions, which land in different blocks thanks to interleaving.
        for pos in [0usize, 1, 2, 3, 40, 80] {
            interleaved[pos] ^= 0x5A;
        }
        assert_eq!(deinterleave(&interleaved, v(5), EccLevel::Q).unwrap(), data);
    }
}
