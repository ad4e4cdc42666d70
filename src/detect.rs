//! Still-image QR detection
//!
//! Images are loaded as grayscale, shrunk to a working size, and handed to
//! `rqrr` for grid location and decoding. When nothing decodes at the working
//! size, the full-resolution image is tried once more.

use std::path::{Path, PathBuf};

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use crate::capability::{ImageDetector, ImageRef};
use crate::error::Result;
use crate::media::load_luma;

/// Longest side, in pixels, images are shrunk to before detection
pub const DEFAULT_MAX_DIM: u32 = 1200;

/// QR detector over image files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageQrDetector {
    max_dim: u32,
}

impl ImageQrDetector {
    /// Detector with the default working size
    pub fn new() -> Self {
        Self {
            max_dim: DEFAULT_MAX_DIM,
        }
    }

    /// Detector with a custom working size; `0` disables shrinking
    pub fn with_max_dim(max_dim: u32) -> Self {
        Self { max_dim }
    }

    /// Working size in pixels, `0` when shrinking is off
    pub fn max_dim(&self) -> u32 {
        self.max_dim
    }

    /// Decode every QR code in the image at `path`
    pub fn detect_path(&self, path: &Path) -> Result<Vec<String>> {
        let loaded = load_luma(path, self.max_dim)?;
        let found = decode_luma(&loaded.luma);
        if !found.is_empty() || !loaded.downscaled {
            return Ok(found);
        }

        debug!(path = %path.display(), "nothing at working size, retrying full resolution");
        let full = load_luma(path, 0)?;
        Ok(decode_luma(&full.luma))
    }

    /// Decode many files in parallel; results keep the input order
    pub fn detect_batch(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<Vec<String>>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.detect_path(path)))
            .collect()
    }
}

impl Default for ImageQrDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageDetector for ImageQrDetector {
    fn detect(&self, image: &ImageRef) -> Result<Vec<String>> {
        self.detect_path(image.path())
    }
}

/// Decode every QR grid found in a grayscale image
pub fn decode_luma(luma: &GrayImage) -> Vec<String> {
    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32).0[0]
        });
    let grids = prepared.detect_grids();

    let mut found = Vec::with_capacity(grids.len());
    for (idx, grid) in grids.iter().enumerate() {
        match grid.decode() {
            Ok((_meta, content)) => found.push(content),
            Err(err) => debug!(grid = idx, error = ?err, "grid failed to decode"),
        }
    }
    found
}
