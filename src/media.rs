//! Image loading and discovery helpers shared by the detector, the gallery
//! and the frame-directory camera.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImageView, GrayImage};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Luma image plus whether it was shrunk on load
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// 8-bit grayscale pixels
    pub luma: GrayImage,
    /// True when the source was larger than the requested maximum side
    pub downscaled: bool,
}

/// Load an image as 8-bit grayscale.
///
/// When `max_dim` is non-zero and the longest side exceeds it, the image is
/// resized to fit inside a `max_dim` square.
pub fn load_luma<P: AsRef<Path>>(path: P, max_dim: u32) -> Result<LoadedImage, image::ImageError> {
    let img = image::open(path)?;
    let (orig_w, orig_h) = img.dimensions();
    let max_side = orig_w.max(orig_h);
    if max_dim > 0 && max_side > max_dim {
        let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
        Ok(LoadedImage {
            luma: resized.to_luma8(),
            downscaled: true,
        })
    } else {
        Ok(LoadedImage {
            luma: img.to_luma8(),
            downscaled: false,
        })
    }
}

/// Whether the path has a still-image extension we can decode
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// All image files under `root`, recursively, sorted by path.
///
/// Unreadable directories are skipped.
pub fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_image_path(&path) {
                images.push(path);
            }
        }
    }

    images.sort();
    images
}
