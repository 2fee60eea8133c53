//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which decides whether
//! and how far to shrink an image) and the [`backend`](super::backend) (which
//! does the pixel work). Tests swap in a mock backend without touching the
//! operation logic.
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 85). Clamped on construction.
//! - [`JpegParams`]: source, output path, optional target size, quality.

use super::backend::Dimensions;
use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Parameters for a decode → (resize) → JPEG encode operation.
#[derive(Debug, Clone, PartialEq)]
pub struct JpegParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Exact output size, or `None` to keep the decoded size.
    pub resize_to: Option<Dimensions>,
    pub quality: Quality,
}
