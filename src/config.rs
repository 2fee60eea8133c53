//! Run configuration.
//!
//! Handles loading, merging, and validating `photo-shelf.toml`. Stock
//! defaults are serialized to a TOML table and the user file is merged on
//! top, so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [compress]
//! input_dir = "uncompressed_photos"
//! output_dir = "albums"
//! max_filesize_mb = 2.0        # Larger files are recompressed
//! max_dimension = 2560         # Long-edge cap for recompressed images (px)
//! jpeg_quality = 85            # 0-100
//! supported_formats = ["jpg", "jpeg", "png"]
//!
//! [manifest]
//! albums_dir = "albums"
//! output_file = "gallery.js"
//! variable = "allItems"
//! src_prefix = ""
//! image_extensions = ["jpg", "jpeg", "png", "gif", "webp"]
//! sorted = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, RecompressConfig};
use crate::policy::{FormatSet, SizeThreshold};
use crate::walk::WalkOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "photo-shelf.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration for both pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Compression pipeline settings.
    pub compress: CompressConfig,
    /// Manifest pipeline settings.
    pub manifest: ManifestConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.compress;
        if c.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "compress.jpeg_quality must be 0-100".into(),
            ));
        }
        if c.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "compress.max_dimension must be non-zero".into(),
            ));
        }
        if !c.max_filesize_mb.is_finite() || c.max_filesize_mb < 0.0 {
            return Err(ConfigError::Validation(
                "compress.max_filesize_mb must be a non-negative number".into(),
            ));
        }
        if c.formats().is_empty() {
            return Err(ConfigError::Validation(
                "compress.supported_formats must not be empty".into(),
            ));
        }

        let m = &self.manifest;
        if m.formats().is_empty() {
            return Err(ConfigError::Validation(
                "manifest.image_extensions must not be empty".into(),
            ));
        }
        if !is_js_identifier(&m.variable) {
            return Err(ConfigError::Validation(format!(
                "manifest.variable must be a JavaScript identifier, got {:?}",
                m.variable
            )));
        }
        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Compression pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressConfig {
    /// Tree of original photos.
    pub input_dir: PathBuf,
    /// Mirrored output tree.
    pub output_dir: PathBuf,
    /// Files larger than this (in MiB) are recompressed; others are copied.
    pub max_filesize_mb: f64,
    /// Long-edge cap for recompressed images, in pixels.
    pub max_dimension: u32,
    /// JPEG encoding quality (0 = worst, 100 = best).
    pub jpeg_quality: u32,
    /// Extensions processed by the pipeline; everything else is skipped.
    pub supported_formats: Vec<String>,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("uncompressed_photos"),
            output_dir: PathBuf::from("albums"),
            max_filesize_mb: 2.0,
            max_dimension: 2560,
            jpeg_quality: 85,
            supported_formats: FormatSet::compressible().extensions().to_vec(),
        }
    }
}

impl CompressConfig {
    pub fn formats(&self) -> FormatSet {
        FormatSet::new(&self.supported_formats)
    }

    pub fn threshold(&self) -> SizeThreshold {
        SizeThreshold::from_megabytes(self.max_filesize_mb)
    }

    pub fn recompress(&self) -> RecompressConfig {
        RecompressConfig {
            max_dimension: self.max_dimension,
            quality: Quality::new(self.jpeg_quality),
        }
    }
}

/// Manifest pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Tree scanned for gallery images.
    pub albums_dir: PathBuf,
    /// Script file written with the gallery items.
    pub output_file: PathBuf,
    /// Name bound by the `const` statement.
    pub variable: String,
    /// Prepended verbatim to every item's `src`.
    pub src_prefix: String,
    /// Extensions listed in the manifest.
    pub image_extensions: Vec<String>,
    /// Walk in file-name order instead of the filesystem's order.
    pub sorted: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            albums_dir: PathBuf::from("albums"),
            output_file: PathBuf::from("gallery.js"),
            variable: "allItems".to_string(),
            src_prefix: String::new(),
            image_extensions: FormatSet::gallery().extensions().to_vec(),
            sorted: false,
        }
    }
}

impl ManifestConfig {
    pub fn formats(&self) -> FormatSet {
        FormatSet::new(&self.image_extensions)
    }

    pub fn walk_order(&self) -> WalkOrder {
        if self.sorted {
            WalkOrder::Sorted
        } else {
            WalkOrder::Native
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock `photo-shelf.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-shelf configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Compression: mirror input_dir into output_dir, shrinking oversized photos
# ---------------------------------------------------------------------------
[compress]
# Tree of original photos.
input_dir = "uncompressed_photos"

# Mirrored output tree. Relative paths and file names are preserved.
output_dir = "albums"

# Files up to this size (MiB) are copied byte-for-byte; larger files are
# re-encoded as JPEG. Recompressed files keep their original extension.
max_filesize_mb = 2.0

# Recompressed images whose longer side exceeds this are scaled down so the
# longer side is exactly this many pixels.
max_dimension = 2560

# JPEG encoding quality (0 = worst, 100 = best).
jpeg_quality = 85

# Extensions processed (case-insensitive). Everything else is skipped.
supported_formats = ["jpg", "jpeg", "png"]

# ---------------------------------------------------------------------------
# Manifest: list gallery images as a JavaScript array
# ---------------------------------------------------------------------------
[manifest]
# Tree scanned for images. Subdirectories become groups.
albums_dir = "albums"

# Script written as `const <variable> = [...];`
output_file = "gallery.js"
variable = "allItems"

# Prepended to every `src`, e.g. "albums/" when the page lives next to the
# albums directory.
src_prefix = ""

# Extensions listed (case-insensitive).
image_extensions = ["jpg", "jpeg", "png", "gif", "webp"]

# Walk in file-name order instead of the filesystem's listing order.
sorted = false
"##
}
