//! # Encoder Options
//!
//! [`QrOptions`] collects every knob the encoder and the output contract
//! recognize. Settings influence encoder choices (version search floor,
//! EC level, mask) and output collection (path connection, inversion,
//! quiet zone) but never the symbol geometry, which is always derived from
//! the resolved version.
//!
//! Setters validate their ranges and reject anything out of bounds, so a
//! constructed options value is always internally consistent.
//!
//! ## Example
//!
//! ```
//! use trama::{EccLevel, QrOptions};
//!
//! let options = QrOptions::new()
//!     .with_ec_level(EccLevel::Q)
//!     .with_min_version(2).unwrap()
//!     .with_quiet_zone(2).unwrap();
//! assert_eq!(options.quiet_zone_size(), 2);
//! ```

use std::collections::BTreeSet;

use crate::error::QrError;
use crate::matrix::ModuleKind;
use crate::matrix::mask::MaskPattern;
use crate::version::{EccLevel, Version};

/// Version selection: automatic (smallest fitting) or caller-pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionChoice {
    /// Scan from `min_version` upward for the smallest fitting version.
    #[default]
    Auto,
    /// Use exactly this version; overflow fails instead of growing.
    Fixed(Version),
}

/// Mask selection: automatic (lowest penalty) or caller-pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskChoice {
    /// Evaluate all eight patterns and keep the lowest penalty.
    #[default]
    Auto,
    /// Use exactly this pattern, skipping evaluation.
    Fixed(MaskPattern),
}

/// Payload mode selection for [`encode`](crate::encode()).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeChoice {
    /// Pick the densest mode covering the payload (numeric, alphanumeric,
    /// then byte).
    #[default]
    Auto,
    /// Force numeric mode.
    Numeric,
    /// Force alphanumeric mode.
    Alphanumeric,
    /// Force byte mode (payload as UTF-8 bytes).
    Byte,
    /// Force Kanji mode.
    Kanji,
    /// Force Hanzi mode.
    Hanzi,
}

/// Largest accepted quiet-zone width.
pub const MAX_QUIET_ZONE: usize = 75;

/// Encoder and output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    version: VersionChoice,
    min_version: Version,
    ec_level: EccLevel,
    mask_pattern: MaskChoice,
    mode: ModeChoice,
    connect_paths: bool,
    exclude_from_connect: BTreeSet<ModuleKind>,
    invert_matrix: bool,
    add_quiet_zone: bool,
    quiet_zone_size: usize,
    logo_space: Option<(usize, usize)>,
}

impl Default for QrOptions {
    fn default() -> Self {
        QrOptions {
            version: VersionChoice::Auto,
            min_version: Version::MIN,
            ec_level: EccLevel::L,
            mask_pattern: MaskChoice::Auto,
            mode: ModeChoice::Auto,
            connect_paths: false,
            exclude_from_connect: BTreeSet::new(),
            invert_matrix: false,
            add_quiet_zone: true,
            quiet_zone_size: 4,
            logo_space: None,
        }
    }
}

impl QrOptions {
    /// Options with the defaults: auto version from 1, level L, auto mask,
    /// auto mode, a 4-module quiet zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the symbol version (1..=40).
    pub fn with_version(mut self, number: u32) -> Result<Self, QrError> {
        self.version = VersionChoice::Fixed(Version::new(number)?);
        Ok(self)
    }

    /// Return to automatic version selection.
    pub fn with_auto_version(mut self) -> Self {
        self.version = VersionChoice::Auto;
        self
    }

    /// Floor for automatic version selection (1..=40).
    pub fn with_min_version(mut self, number: u32) -> Result<Self, QrError> {
        self.min_version = Version::new(number)?;
        Ok(self)
    }

    /// Error correction level.
    pub fn with_ec_level(mut self, level: EccLevel) -> Self {
        self.ec_level = level;
        self
    }

    /// Pin the mask pattern (0..=7).
    pub fn with_mask(mut self, index: u32) -> Result<Self, QrError> {
        self.mask_pattern = MaskChoice::Fixed(MaskPattern::new(index)?);
        Ok(self)
    }

    /// Return to automatic mask selection.
    pub fn with_auto_mask(mut self) -> Self {
        self.mask_pattern = MaskChoice::Auto;
        self
    }

    /// Payload mode for `encode`.
    pub fn with_mode(mut self, mode: ModeChoice) -> Self {
        self.mode = mode;
        self
    }

    /// Collapse non-excluded tags onto the DATA layers when collecting
    /// modules for a renderer.
    pub fn with_connect_paths(mut self, connect: bool) -> Self {
        self.connect_paths = connect;
        self
    }

    /// Tags kept on their own layer when `connect_paths` is set.
    pub fn with_exclude_from_connect(mut self, tags: impl IntoIterator<Item = ModuleKind>) -> Self {
        self.exclude_from_connect = tags.into_iter().collect();
        self
    }

    /// Flip every module after construction.
    pub fn with_invert_matrix(mut self, invert: bool) -> Self {
        self.invert_matrix = invert;
        self
    }

    /// Quiet-zone width in modules (0..=75). Also enables the quiet zone.
    pub fn with_quiet_zone(mut self, size: usize) -> Result<Self, QrError> {
        if size > MAX_QUIET_ZONE {
            return Err(QrError::InvalidQuietZoneSize(size));
        }
        self.quiet_zone_size = size;
        self.add_quiet_zone = true;
        Ok(self)
    }

    /// Emit the bare symbol without a quiet zone.
    pub fn without_quiet_zone(mut self) -> Self {
        self.add_quiet_zone = false;
        self
    }

    /// Clear a centered `width` × `height` module area for a logo overlay.
    /// Requires EC level H at encode time.
    pub fn with_logo_space(mut self, width: usize, height: usize) -> Self {
        self.logo_space = Some((width, height));
        self
    }

    /// The version choice.
    pub fn version(&self) -> VersionChoice {
        self.version
    }

    /// The automatic-selection floor.
    pub fn min_version(&self) -> Version {
        self.min_version
    }

    /// The error correction level.
    pub fn ec_level(&self) -> EccLevel {
        self.ec_level
    }

    /// The mask choice.
    pub fn mask_pattern(&self) -> MaskChoice {
        self.mask_pattern
    }

    /// The payload mode choice.
    pub fn mode(&self) -> ModeChoice {
        self.mode
    }

    /// Whether module collection collapses layers.
    pub fn connect_paths(&self) -> bool {
        self.connect_paths
    }

    /// Tags excluded from layer collapsing.
    pub fn exclude_from_connect(&self) -> &BTreeSet<ModuleKind> {
        &self.exclude_from_connect
    }

    /// Whether the finished matrix is inverted.
    pub fn invert_matrix(&self) -> bool {
        self.invert_matrix
    }

    /// Whether a quiet zone is added.
    pub fn add_quiet_zone(&self) -> bool {
        self.add_quiet_zone
    }

    /// Quiet-zone width in modules.
    pub fn quiet_zone_size(&self) -> usize {
        self.quiet_zone_size
    }

    /// Logo-space dimensions, if configured.
    pub fn logo_space(&self) -> Option<(usize, usize)> {
        self.logo_space
    }
}

// ============================================================================
// TESTS
// ============================================================================
