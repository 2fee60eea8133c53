//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, GIF, WebP) | `image` crate, format sniffed from content |
//! | Drop alpha | `DynamicImage::to_rgb8` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `jpeg_encoder::Encoder` with optimized Huffman tables |
//!
//! Formats are sniffed from the file's magic bytes rather than its
//! extension, so a file whose name and contents disagree still decodes.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::JpegParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// JPEG frames store each side as a 16-bit value.
fn jpeg_side(pixels: u32) -> Result<u16, BackendError> {
    u16::try_from(pixels).map_err(|_| {
        BackendError::ProcessingFailed(format!("{} px exceeds the JPEG size limit", pixels))
    })
}

/// Encode an RGB buffer as JPEG with per-image Huffman tables.
fn save_jpeg(img: &RgbImage, path: &Path, quality: u8) -> Result<(), BackendError> {
    let width = jpeg_side(img.width())?;
    let height = jpeg_side(img.height())?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = Encoder::new(&mut writer, quality);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(img.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn encode_jpeg(&self, params: &JpegParams) -> Result<Dimensions, BackendError> {
        // JPEG has no alpha; the channel is discarded, not composited.
        let rgb = load_image(&params.source)?.to_rgb8();

        let rgb = match params.resize_to {
            Some(target) if (target.width, target.height) != rgb.dimensions() => {
                image::imageops::resize(&rgb, target.width, target.height, FilterType::Lanczos3)
            }
            _ => rgb,
        };

        save_jpeg(&rgb, &params.output, params.quality.value())?;
        Ok(Dimensions {
            width: rgb.width(),
            height: rgb.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::{create_test_jpeg, create_test_rgba_png};
    use image::{ColorType, ImageFormat};

    fn sniff(path: &Path) -> (Option<ImageFormat>, DynamicImage) {
        let reader = open_reader(path).unwrap();
        let format = reader.format();
        (format, reader.decode().unwrap())
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn encode_jpeg_resizes_to_exact_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 400, 200);

        let output = tmp.path().join("resized.jpg");
        let written = RustBackend::new()
            .encode_jpeg(&JpegParams {
                source,
                output: output.clone(),
                resize_to: Some(Dimensions { width: 256, height: 128 }),
                quality: Quality::new(85),
            })
            .unwrap();

        assert_eq!(written, Dimensions { width: 256, height: 128 });
        let (format, decoded) = sniff(&output);
        assert_eq!(format, Some(ImageFormat::Jpeg));
        assert_eq!((decoded.width(), decoded.height()), (256, 128));
    }

    #[test]
    fn encode_jpeg_without_resize_keeps_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 120, 90);

        let output = tmp.path().join("out.jpg");
        let written = RustBackend::new()
            .encode_jpeg(&JpegParams {
                source,
                output: output.clone(),
                resize_to: None,
                quality: Quality::new(60),
            })
            .unwrap();

        assert_eq!(written, Dimensions { width: 120, height: 90 });
        let (_, decoded) = sniff(&output);
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[test]
    fn encode_png_with_alpha_drops_the_channel() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        create_test_rgba_png(&source, 64, 32);

        // Output keeps the .png name but holds JPEG bytes.
        let output = tmp.path().join("out.png");
        RustBackend::new()
            .encode_jpeg(&JpegParams {
                source,
                output: output.clone(),
                resize_to: None,
                quality: Quality::default(),
            })
            .unwrap();

        let (format, decoded) = sniff(&output);
        assert_eq!(format, Some(ImageFormat::Jpeg));
        assert_eq!(decoded.color(), ColorType::Rgb8);
    }

    #[test]
    fn optimized_tables_are_no_larger_than_standard_ones() {
        let tmp = tempfile::TempDir::new().unwrap();
        let img = RgbImage::from_fn(320, 240, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });

        let optimized = tmp.path().join("optimized.jpg");
        save_jpeg(&img, &optimized, 85).unwrap();

        let mut standard = Vec::new();
        let mut encoder = Encoder::new(&mut standard, 85);
        encoder.set_optimized_huffman_tables(false);
        encoder
            .encode(img.as_raw(), 320, 240, jpeg_encoder::ColorType::Rgb)
            .unwrap();

        let (format, decoded) = sniff(&optimized);
        assert_eq!(format, Some(ImageFormat::Jpeg));
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
        let optimized_len = std::fs::metadata(&optimized).unwrap().len();
        assert!(
            optimized_len <= standard.len() as u64,
            "optimized {} bytes > standard {} bytes",
            optimized_len,
            standard.len()
        );
    }

    #[test]
    fn jpeg_side_limit() {
        assert_eq!(jpeg_side(65_535).unwrap(), 65_535);
        assert!(matches!(
            jpeg_side(65_536),
            Err(BackendError::ProcessingFailed(_))
        ));
    }

    #[test]
    fn encode_corrupt_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let result = RustBackend::new().encode_jpeg(&JpegParams {
            source,
            output: tmp.path().join("out.jpg"),
            resize_to: None,
            quality: Quality::default(),
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
