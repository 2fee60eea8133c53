//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_long_edge;
use super::params::{JpegParams, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Configuration for recompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecompressConfig {
    /// Long-edge cap in pixels.
    pub max_dimension: u32,
    pub quality: Quality,
}

impl Default for RecompressConfig {
    fn default() -> Self {
        Self {
            max_dimension: 2560,
            quality: Quality::default(),
        }
    }
}

/// Before/after dimensions of a recompressed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recompressed {
    pub original: Dimensions,
    pub output: Dimensions,
}

impl Recompressed {
    pub fn was_resized(&self) -> bool {
        self.original != self.output
    }
}

/// Re-encode `source` as JPEG at `output`, shrinking it to the long-edge cap
/// when it exceeds it.
///
/// Missing parent directories of `output` are created first. The output name
/// is taken as given: a `.png` source written to a `.png` path holds JPEG bytes.
pub fn recompress_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &RecompressConfig,
) -> Result<Recompressed> {
    let original = get_dimensions(backend, source)?;
    let resize_to = fit_long_edge(original, config.max_dimension);

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let written = backend.encode_jpeg(&JpegParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        resize_to,
        quality: config.quality,
    })?;

    Ok(Recompressed {
        original,
        output: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    #[test]
    fn oversized_image_is_resized_to_cap() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new().with_image("b.jpg", 4000, 2000);
        let output = tmp.path().join("sub/b.jpg");

        let result = recompress_image(
            &backend,
            Path::new("/in/sub/b.jpg"),
            &output,
            &RecompressConfig::default(),
        )
        .unwrap();

        assert_eq!(result.original, Dimensions { width: 4000, height: 2000 });
        assert_eq!(result.output, Dimensions { width: 2560, height: 1280 });
        assert!(result.was_resized());

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
        assert!(matches!(
            &ops[1],
            RecordedOp::EncodeJpeg {
                resize_to: Some((2560, 1280)),
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn image_within_cap_is_only_reencoded() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new().with_image("heavy.png", 2000, 1500);

        let result = recompress_image(
            &backend,
            Path::new("/in/heavy.png"),
            &tmp.path().join("heavy.png"),
            &RecompressConfig {
                max_dimension: 2560,
                quality: Quality::new(70),
            },
        )
        .unwrap();

        assert!(!result.was_resized());
        assert!(matches!(
            &backend.get_operations()[1],
            RecordedOp::EncodeJpeg {
                resize_to: None,
                quality: 70,
                ..
            }
        ));
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new().with_image("deep.jpg", 10, 10);
        let output = tmp.path().join("a/b/c/deep.jpg");

        recompress_image(
            &backend,
            Path::new("/in/deep.jpg"),
            &output,
            &RecompressConfig::default(),
        )
        .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn identify_failure_skips_encode() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();

        let result = recompress_image(
            &backend,
            Path::new("/in/unknown.jpg"),
            &tmp.path().join("unknown.jpg"),
            &RecompressConfig::default(),
        );

        assert!(result.is_err());
        assert_eq!(backend.get_operations().len(), 1);
    }
}
