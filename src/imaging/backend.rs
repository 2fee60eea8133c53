//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the compression
//! pipeline needs: identify (read dimensions) and encode_jpeg (decode,
//! optionally resize, re-encode as JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`tests::MockBackend`].

use super::params::JpegParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, drop any alpha channel, resize if requested, and
    /// write a JPEG to the output path. Returns the written dimensions.
    fn encode_jpeg(&self, params: &JpegParams) -> Result<Dimensions, BackendError>;
}
