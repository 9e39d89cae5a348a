//! # Output Backend Contract
//!
//! Rendering backends (SVG, raster, terminal art) live outside this crate.
//! What they get from the core:
//!
//! - [`collect_modules`]: every module as `(x, y, tag, layer)` in row-major
//!   order, grouped per layer, with optional layer collapsing for connected
//!   path rendering
//! - [`ModuleValues`]: the per-layer output values a backend resolves
//!   modules against (colors, CSS classes, glyphs, ...)
//! - [`write_to_file`]: the byte-string-to-disk helper backends share
//!
//! ## Layers
//!
//! A layer is a `(ModuleKind, dark)` pair. With `connect_paths` set in the
//! options, every tag not listed in `exclude_from_connect` collapses onto
//! the DATA layers so a backend can emit one connected path per color.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::QrError;
use crate::matrix::{ModuleKind, QrMatrix};
use crate::options::QrOptions;

/// A render layer: function tag plus dark/light.
pub type Layer = (ModuleKind, bool);

/// Backend-specific output values per layer, with dark/light fallbacks.
#[derive(Debug, Clone)]
pub struct ModuleValues<V> {
    values: BTreeMap<Layer, V>,
    dark_default: V,
    light_default: V,
}

impl<V: Clone> ModuleValues<V> {
    /// A value map with only the dark/light fallbacks set.
    pub fn new(dark_default: V, light_default: V) -> Self {
        Self {
            values: BTreeMap::new(),
            dark_default,
            light_default,
        }
    }

    /// Assign a value to one layer.
    pub fn set(&mut self, layer: Layer, value: V) -> &mut Self {
        self.values.insert(layer, value);
        self
    }

    /// The value for a layer, falling back to the dark/light default.
    pub fn get(&self, layer: Layer) -> &V {
        self.values.get(&layer).unwrap_or(if layer.1 {
            &self.dark_default
        } else {
            &self.light_default
        })
    }
}

/// Resolve the layer of a module under the collection options.
fn layer_for(options: &QrOptions, kind: ModuleKind, dark: bool) -> Layer {
    if options.connect_paths() && !options.exclude_from_connect().contains(&kind) {
        (ModuleKind::Data, dark)
    } else {
        (kind, dark)
    }
}

/// Visit every module (quiet zone included) in row-major order and group
/// the transformed results per layer, ordered by tag.
///
/// The transform sees `(x, y, tag, layer)` in full-grid coordinates and may
/// return `None` to drop a module.
pub fn collect_modules<V, F>(
    matrix: &QrMatrix,
    options: &QrOptions,
    mut transform: F,
) -> BTreeMap<Layer, Vec<V>>
where
    F: FnMut(usize, usize, ModuleKind, Layer) -> Option<V>,
{
    let mut layers: BTreeMap<Layer, Vec<V>> = BTreeMap::new();
    let full = matrix.full_size();
    for y in 0..full {
        for x in 0..full {
            let (kind, dark) = matrix.module_at_full(x, y).layer();
            let layer = layer_for(options, kind, dark);
            if let Some(value) = transform(x, y, kind, layer) {
                layers.entry(layer).or_default().push(value);
            }
        }
    }
    layers
}

/// Write a backend's finished byte string to disk.
///
/// Fails with [`QrError::CannotWriteFile`] when the file cannot be created,
/// the write errors, or fewer bytes than expected reach the file.
pub fn write_to_file(path: impl AsRef<Path>, data: &[u8]) -> Result<(), QrError> {
    let path = path.as_ref();
    let wrap = |source: std::io::Error| QrError::CannotWriteFile {
        path: path.display().to_string(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    let written = file.write(data).map_err(wrap)?;
    if written != data.len() {
        return Err(wrap(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            format!("wrote {written} of {} bytes", data.len()),
        )));
    }
    file.flush().map_err(wrap)
}

// ============================================================================
// TESTS
// ============================================================================
