//! # Module Matrix
//!
//! The two-dimensional symbol: a square grid of modules, each carrying a
//! function tag and a dark/light bit. Tags make the function-vs-data
//! query O(1), which the zig-zag placement, masking and decoding all rely
//! on.
//!
//! ## Construction Order
//!
//! ```text
//! new → finders → separators → timing → alignment → dark module
//!     → reserve format/version areas → write_codewords → apply_mask
//!     → set_format_info → (set_version_info) → add_quiet_zone
//! ```
//!
//! Function modules are placed first and are never overwritten by data
//! placement; [`QrMatrix::write_codewords`] verifies the bit count it
//! placed and reports [`QrError::MatrixInvariantViolation`] on any
//! disagreement.
//!
//! ## Submodules
//!
//! - [`format`]: BCH words for format and version information
//! - [`mask`]: the eight mask predicates and penalty scoring

pub mod format;
pub mod mask;

use crate::error::QrError;
use crate::version::{EccLevel, Version};
use mask::MaskPattern;

/// Function tag of a module.
///
/// Ordering is derived so collected layers come out in a stable tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleKind {
    /// Payload and EC codeword bits
    Data,
    /// One of the three 7×7 finder patterns
    Finder,
    /// The light border around a finder
    Separator,
    /// A 5×5 alignment pattern
    Alignment,
    /// The alternating row/column 6
    Timing,
    /// Format information
    Format,
    /// Version information (versions 7+)
    Version,
    /// The fixed dark module at (8, 4v + 9)
    DarkModule,
    /// Quiet-zone padding added around the symbol
    QuietZone,
    /// Area cleared for a logo overlay
    Logo,
}

impl ModuleKind {
    /// Whether data placement must leave this module alone.
    pub fn is_function(self) -> bool {
        !matches!(self, ModuleKind::Data)
    }
}

/// One cell of the matrix: function tag plus dark/light bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    /// Function tag
    pub kind: ModuleKind,
    /// true = dark, false = light
    pub dark: bool,
}

impl Module {
    fn light(kind: ModuleKind) -> Self {
        Module { kind, dark: false }
    }

    /// The (tag, dark) pair renderers key their layers on.
    pub fn layer(self) -> (ModuleKind, bool) {
        (self.kind, self.dark)
    }
}

/// A square module grid for one QR symbol, with optional quiet zone.
///
/// Coordinates are symbol-relative: (0, 0) is the top-left module of the
/// symbol proper, regardless of any quiet zone added around it. The quiet
/// zone is only visible through [`full_size`](Self::full_size) and
/// [`module_at_full`](Self::module_at_full).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    version: Version,
    quiet_zone: usize,
    modules: Vec<Module>,
}

impl QrMatrix {
    /// A blank matrix for the version: every module light, tagged DATA.
    pub fn new(version: Version) -> Self {
        let n = version.modules();
        QrMatrix {
            version,
            quiet_zone: 0,
            modules: vec![Module::light(ModuleKind::Data); n * n],
        }
    }

    /// Rebuild a tagged matrix from a raw dark/light grid (no quiet zone),
    /// e.g. the output of a binarizer. Function tags are derived from the
    /// geometry; dark bits are taken from the grid everywhere.
    pub fn from_modules(grid: &[Vec<bool>]) -> Result<Self, QrError> {
        let version = Version::from_modules(grid.len())?;
        let n = version.modules();
        if grid.iter().any(|row| row.len() != n) {
            return Err(QrError::InvalidVersion(grid.len() as u32));
        }
        let mut matrix = QrMatrix::new(version);
        matrix.place_function_patterns();
        matrix.reserve_format_info();
        matrix.reserve_version_info();
        for (y, row) in grid.iter().enumerate() {
            for (x, &dark) in row.iter().enumerate() {
                let i = matrix.index(x, y);
                matrix.modules[i].dark = dark;
            }
        }
        Ok(matrix)
    }

    /// The symbol's version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Modules per side of the symbol proper (`17 + 4·version`).
    pub fn size(&self) -> usize {
        self.version.modules()
    }

    /// Modules per side including the quiet zone.
    pub fn full_size(&self) -> usize {
        self.size() + 2 * self.quiet_zone
    }

    /// Quiet-zone width on each side.
    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size() && y < self.size());
        (y + self.quiet_zone) * self.full_size() + (x + self.quiet_zone)
    }

    /// The module at symbol coordinates (x, y).
    pub fn module_at(&self, x: usize, y: usize) -> Module {
        self.modules[self.index(x, y)]
    }

    /// The module at full-grid coordinates, quiet zone included.
    pub fn module_at_full(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.full_size() + x]
    }

    /// Function tag at (x, y).
    pub fn kind(&self, x: usize, y: usize) -> ModuleKind {
        self.module_at(x, y).kind
    }

    /// Dark/light bit at (x, y).
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.module_at(x, y).dark
    }

    fn set(&mut self, x: usize, y: usize, kind: ModuleKind, dark: bool) {
        let i = self.index(x, y);
        self.modules[i] = Module { kind, dark };
    }

    // ------------------------------------------------------------------
    // Function patterns
    // ------------------------------------------------------------------

    /// Place every fixed pattern: finders, separators, timing, alignment
    /// and the dark module.
    pub fn place_function_patterns(&mut self) {
        self.set_finder_patterns();
        self.set_separators();
        self.set_timing_pattern();
        self.set_alignment_patterns();
        self.set_dark_module();
    }

    /// Three 7×7 finder patterns in the top-left, top-right and
    /// bottom-left corners.
    pub fn set_finder_patterns(&mut self) {
        let n = self.size();
        for (cx, cy) in [(3, 3), (n - 4, 3), (3, n - 4)] {
            for dy in -3i32..=3 {
                for dx in -3i32..=3 {
                    let dist = dx.abs().max(dy.abs());
                    let x = (cx as i32 + dx) as usize;
                    let y = (cy as i32 + dy) as usize;
                    self.set(x, y, ModuleKind::Finder, dist != 2);
                }
            }
        }
    }

    /// One-module light border around each finder pattern.
    pub fn set_separators(&mut self) {
        let n = self.size();
        for i in 0..8 {
            // Top-left corner
            self.set(i, 7, ModuleKind::Separator, false);
            self.set(7, i, ModuleKind::Separator, false);
            // Top-right corner
            self.set(n - 1 - i, 7, ModuleKind::Separator, false);
            self.set(n - 8, i, ModuleKind::Separator, false);
            // Bottom-left corner
            self.set(i, n - 8, ModuleKind::Separator, false);
            self.set(7, n - 1 - i, ModuleKind::Separator, false);
        }
    }

    /// Alternating dark/light line along row 6 and column 6.
    pub fn set_timing_pattern(&mut self) {
        let n = self.size();
        for i in 0..n {
            if !self.kind(i, 6).is_function() {
                self.set(i, 6, ModuleKind::Timing, i % 2 == 0);
            }
            if !self.kind(6, i).is_function() {
                self.set(6, i, ModuleKind::Timing, i % 2 == 0);
            }
        }
    }

    /// 5×5 alignment patterns at the version's center grid, skipping the
    /// three corners occupied by finder patterns.
    pub fn set_alignment_patterns(&mut self) {
        let centers = self.version.alignment_centers();
        let last = centers.len().wrapping_sub(1);
        for (i, &cy) in centers.iter().enumerate() {
            for (j, &cx) in centers.iter().enumerate() {
                let overlaps_finder =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if overlaps_finder {
                    continue;
                }
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let dist = dx.abs().max(dy.abs());
                        let x = (cx as i32 + dx) as usize;
                        let y = (cy as i32 + dy) as usize;
                        self.set(x, y, ModuleKind::Alignment, dist != 1);
                    }
                }
            }
        }
    }

    /// The always-dark module at (8, 4·version + 9).
    pub fn set_dark_module(&mut self) {
        let y = self.size() - 8;
        self.set(8, y, ModuleKind::DarkModule, true);
    }

    // ------------------------------------------------------------------
    // Format and version information
    // ------------------------------------------------------------------

    /// Bit positions of the first format-info copy, by bit index 0..15.
    fn format_position_copy1(&self, i: usize) -> (usize, usize) {
        match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        }
    }

    /// Bit positions of the second format-info copy, by bit index 0..15.
    fn format_position_copy2(&self, i: usize) -> (usize, usize) {
        let n = self.size();
        if i < 8 { (n - 1 - i, 8) } else { (8, n - 15 + i) }
    }

    /// Tag the format-information positions before data placement. The
    /// actual bits arrive with [`set_format_info`](Self::set_format_info)
    /// once the mask is known.
    pub fn reserve_format_info(&mut self) {
        for i in 0..15 {
            let (x, y) = self.format_position_copy1(i);
            self.set(x, y, ModuleKind::Format, false);
            let (x, y) = self.format_position_copy2(i);
            self.set(x, y, ModuleKind::Format, false);
        }
    }

    /// Write both copies of the 15-bit format word.
    pub fn set_format_info(&mut self, level: EccLevel, mask: MaskPattern) {
        let word = format::format_bits(level, mask);
        for i in 0..15 {
            let dark = (word >> i) & 1 == 1;
            let (x, y) = self.format_position_copy1(i);
            self.set(x, y, ModuleKind::Format, dark);
            let (x, y) = self.format_position_copy2(i);
            self.set(x, y, ModuleKind::Format, dark);
        }
    }

    /// Read both format-word copies back out of the matrix.
    pub fn read_format_words(&self) -> [u32; 2] {
        let mut words = [0u32; 2];
        for i in 0..15 {
            let (x, y) = self.format_position_copy1(i);
            words[0] |= u32::from(self.is_dark(x, y)) << i;
            let (x, y) = self.format_position_copy2(i);
            words[1] |= u32::from(self.is_dark(x, y)) << i;
        }
        words
    }

    /// Tag the version-information areas (versions 7+) before data
    /// placement.
    pub fn reserve_version_info(&mut self) {
        if self.version.number() < 7 {
            return;
        }
        let n = self.size();
        for i in 0..18 {
            let a = n - 11 + i % 3;
            let b = i / 3;
            self.set(a, b, ModuleKind::Version, false);
            self.set(b, a, ModuleKind::Version, false);
        }
    }

    /// Write both copies of the 18-bit version word (versions 7+; a no-op
    /// below that).
    pub fn set_version_info(&mut self) {
        if self.version.number() < 7 {
            return;
        }
        let word = format::version_bits(self.version);
        let n = self.size();
        for i in 0..18 {
            let dark = (word >> i) & 1 == 1;
            let a = n - 11 + i % 3;
            let b = i / 3;
            self.set(a, b, ModuleKind::Version, dark);
            self.set(b, a, ModuleKind::Version, dark);
        }
    }

    /// Read both version-word copies back out of the matrix.
    pub fn read_version_words(&self) -> [u32; 2] {
        let n = self.size();
        let mut words = [0u32; 2];
        for i in 0..18 {
            let a = n - 11 + i % 3;
            let b = i / 3;
            words[0] |= u32::from(self.is_dark(a, b)) << i;
            words[1] |= u32::from(self.is_dark(b, a)) << i;
        }
        words
    }

    // ------------------------------------------------------------------
    // Data placement
    // ------------------------------------------------------------------

    /// Every data position in zig-zag placement order: two-column pairs
    /// from the right edge, alternating upward and downward, with column 6
    /// skipped entirely. LOGO modules sit on data positions (they blank out
    /// already-placed bits), so they stay in the traversal and reading a
    /// logo-bearing symbol keeps its codeword alignment.
    fn zigzag_positions(&self) -> Vec<(usize, usize)> {
        let n = self.size();
        let mut positions = Vec::new();
        let mut right = n as i32 - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..n {
                for j in 0..2 {
                    let x = (right - j) as usize;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { n - 1 - vert } else { vert };
                    if matches!(self.kind(x, y), ModuleKind::Data | ModuleKind::Logo) {
                        positions.push((x, y));
                    }
                }
            }
            right -= 2;
        }
        positions
    }

    /// Place the interleaved codewords, MSB of each codeword first.
    ///
    /// Function modules are skipped by tag; the count of placed bits must
    /// equal the codeword bit count (up to 7 remainder modules stay light),
    /// otherwise the layout is broken and
    /// [`QrError::MatrixInvariantViolation`] is returned.
    pub fn write_codewords(&mut self, codewords: &[u8]) -> Result<(), QrError> {
        let total_bits = codewords.len() * 8;
        let positions = self.zigzag_positions();
        if positions.len() < total_bits || positions.len() - total_bits > 7 {
            return Err(QrError::MatrixInvariantViolation(format!(
                "{} codeword bits for {} data modules",
                total_bits,
                positions.len()
            )));
        }
        for (i, &(x, y)) in positions.iter().take(total_bits).enumerate() {
            let dark = (codewords[i / 8] >> (7 - i % 8)) & 1 == 1;
            self.set(x, y, ModuleKind::Data, dark);
        }
        Ok(())
    }

    /// Read the codeword stream back in placement order, dropping the
    /// remainder bits.
    pub fn read_codewords(&self) -> Vec<u8> {
        let total = self.version.raw_codewords();
        let mut codewords = vec![0u8; total];
        for (i, &(x, y)) in self.zigzag_positions().iter().take(total * 8).enumerate() {
            if self.is_dark(x, y) {
                codewords[i / 8] |= 1 << (7 - i % 8);
            }
        }
        codewords
    }

    /// XOR every DATA module with the mask predicate. Applying the same
    /// mask twice restores the original.
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let n = self.size();
        for y in 0..n {
            for x in 0..n {
                if self.kind(x, y) == ModuleKind::Data && mask.invert_at(x, y) {
                    let i = self.index(x, y);
                    self.modules[i].dark ^= true;
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Post-processing
    // ------------------------------------------------------------------

    /// Expand the grid outward by `size` light modules on every side,
    /// tagged QUIETZONE.
    pub fn add_quiet_zone(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        let old_full = self.full_size();
        let new_full = old_full + 2 * size;
        let mut grid = vec![Module::light(ModuleKind::QuietZone); new_full * new_full];
        for y in 0..old_full {
            for x in 0..old_full {
                grid[(y + size) * new_full + (x + size)] = self.modules[y * old_full + x];
            }
        }
        self.modules = grid;
        self.quiet_zone += size;
    }

    /// Flip every module's dark/light bit, preserving its tag.
    pub fn invert(&mut self) {
        for module in &mut self.modules {
            module.dark = !module.dark;
        }
    }

    /// Clear a centered `width` × `height` module area and tag it LOGO so a
    /// renderer can overlay artwork. The sacrificed data modules are what
    /// EC level H exists for; the caller enforces that choice.
    ///
    /// Only DATA modules are cleared. Function patterns inside the area keep
    /// their tags and bits, so the zig-zag traversal (and with it decoding)
    /// stays aligned.
    pub fn set_logo_space(&mut self, width: usize, height: usize) {
        let n = self.size();
        let width = width.min(n);
        let height = height.min(n);
        let x0 = (n - width) / 2;
        let y0 = (n - height) / 2;
        for y in y0..y0 + height {
            for x in x0..x0 + width {
                if self.kind(x, y) == ModuleKind::Data {
                    self.set(x, y, ModuleKind::Logo, false);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
