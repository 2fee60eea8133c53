//! Shared test utilities: synthetic image fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("sub/b.jpg"), 400, 200);
//! create_test_rgba_png(&tmp.path().join("a.png"), 64, 32);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

/// Create a valid JPEG with a gradient pattern, creating parent directories.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a PNG with a half-transparent alpha channel.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, if x < width / 2 { 0 } else { 255 }])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
