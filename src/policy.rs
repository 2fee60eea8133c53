//! File selection and recompression policies.
//!
//! Both pipelines filter files by extension, and the compression pipeline
//! decides per file whether to copy or recompress. These decisions are
//! explicit values passed into each pipeline rather than constants, so
//! callers and tests can substitute their own.

use std::path::Path;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// A case-insensitive set of file extensions.
///
/// Entries may be given with or without the leading dot (`".jpg"` and `"jpg"`
/// are equivalent). A file matches when its name ends in `.<ext>`, so
/// `photo.tar.jpg` matches `jpg` and so does a dotfile named just `.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSet {
    extensions: Vec<String>,
}

impl FormatSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    /// Formats the compression pipeline can decode and recompress.
    pub fn compressible() -> Self {
        Self::new(["jpg", "jpeg", "png"])
    }

    /// Formats listed in the gallery manifest.
    pub fn gallery() -> Self {
        Self::new(["jpg", "jpeg", "png", "gif", "webp"])
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// What to do with a supported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Byte-for-byte copy.
    Copy,
    /// Decode, fit to the long-edge cap, re-encode as JPEG.
    Recompress,
}

/// Copy-versus-recompress threshold on file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThreshold {
    max_bytes: u64,
}

impl SizeThreshold {
    pub fn from_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Threshold of `megabytes * 1024 * 1024` bytes. Fractions are allowed.
    pub fn from_megabytes(megabytes: f64) -> Self {
        Self {
            max_bytes: (megabytes.max(0.0) * BYTES_PER_MEGABYTE).floor() as u64,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// A file at exactly the threshold is still acceptable.
    pub fn is_acceptable(&self, size_bytes: u64) -> bool {
        size_bytes <= self.max_bytes
    }

    pub fn disposition(&self, size_bytes: u64) -> Disposition {
        if self.is_acceptable(size_bytes) {
            Disposition::Copy
        } else {
            Disposition::Recompress
        }
    }
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self::from_megabytes(2.0)
    }
}
