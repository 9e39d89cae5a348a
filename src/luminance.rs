//! # Luminance Sources
//!
//! The capability an image front-end hands to detection/binarization: a
//! rectangle of 0..255 luminance samples. Detection itself (finder search,
//! perspective, thresholding) lives outside this crate; it ends in a
//! dark/light grid that [`QrMatrix::from_modules`](crate::QrMatrix::from_modules)
//! turns into decoder input.
//!
//! [`ImageLuminanceSource`] adapts anything the `image` crate can load,
//! from a file path or an in-memory blob.

use std::path::Path;

use crate::error::QrError;

/// A rectangle of luminance samples, row-major, 0 = black, 255 = white.
pub trait LuminanceSource {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// One row of samples, `width()` bytes.
    fn row(&self, y: usize) -> Vec<u8>;

    /// The full sample rectangle, `width() * height()` bytes row-major.
    fn matrix(&self) -> Vec<u8>;
}

/// A luminance source backed by a decoded image.
#[derive(Debug, Clone)]
pub struct ImageLuminanceSource {
    gray: image::GrayImage,
}

impl ImageLuminanceSource {
    /// Load an image file and convert it to 8-bit luma.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, QrError> {
        let dynamic = image::open(path.as_ref()).map_err(|e| {
            QrError::CannotReadImage(format!("{}: {e}", path.as_ref().display()))
        })?;
        Ok(Self {
            gray: dynamic.to_luma8(),
        })
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...) to 8-bit luma.
    pub fn from_blob(blob: &[u8]) -> Result<Self, QrError> {
        let dynamic = image::load_from_memory(blob)
            .map_err(|e| QrError::CannotReadImage(e.to_string()))?;
        Ok(Self {
            gray: dynamic.to_luma8(),
        })
    }

    /// Wrap an already-grayscale image buffer.
    pub fn from_gray(gray: image::GrayImage) -> Self {
        Self { gray }
    }
}

impl LuminanceSource for ImageLuminanceSource {
    fn width(&self) -> usize {
        self.gray.width() as usize
    }

    fn height(&self) -> usize {
        self.gray.height() as usize
    }

    fn row(&self, y: usize) -> Vec<u8> {
        assert!(y < self.height(), "row {y} out of bounds");
        let w = self.width();
        self.gray.as_raw()[y * w..(y + 1) * w].to_vec()
    }

    fn matrix(&self) -> Vec<u8> {
        self.gray.as_raw().clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> image::GrayImage {
        image::GrayImage::from_fn(width, height, |x, y| image::Luma([(x + 2 * y) as u8]))
    }

    #[test]
    fn test_dimensions_and_rows() {
        let source = ImageLuminanceSource::from_gray(gradient(8, 4));
        assert_eq!(source.width(), 8);
        assert_eq!(source.height(), 4);
        assert_eq!(source.row(0), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(source.row(2), vec![4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(source.matrix().len(), 32);
    }

    #[test]
    fn test_from_blob() {
        // Round a tiny image through PNG and back.
        let mut png = Vec::new();
        gradient(6, 6)
            .write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageFormat::Png,
            )
            .unwrap();
        let source = ImageLuminanceSource::from_blob(&png).unwrap();
        assert_eq!(source.width(), 6);
        assert_eq!(source.row(1), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_from_blob_rejects_garbage() {
        assert!(matches!(
            ImageLuminanceSource::from_blob(&[0x00, 0x01, 0x02]),
            Err(QrError::CannotReadImage(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            ImageLuminanceSource::from_file("/nonexistent/path.png"),
            Err(QrError::CannotReadImage(_))
        ));
    }
}
