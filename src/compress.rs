//! Compression pipeline: mirror a photo tree, shrinking oversized images.
//!
//! Walks the input directory and, for every file with a supported
//! extension, writes a counterpart at the same relative path under the
//! output directory:
//!
//! ```text
//! uncompressed_photos/             albums/
//! ├── a.png        (1 KB)    →     ├── a.png          byte-for-byte copy
//! ├── notes.txt              →     │                  (skipped)
//! └── sub/                         └── sub/
//!     └── b.jpg    (5 MB)    →         └── b.jpg      JPEG, long edge ≤ 2560
//! ```
//!
//! ## Decisions per file
//!
//! 1. Extension not in the [`FormatSet`] → skipped, nothing written.
//! 2. Size within the [`SizeThreshold`] → copied verbatim.
//! 3. Otherwise → decoded, alpha dropped, fitted to the long-edge cap, and
//!    re-encoded as JPEG. The output keeps the original name, so a
//!    recompressed `.png` holds JPEG bytes.
//!
//! A decode or encode failure is recorded as [`OutcomeKind::Failed`] and the
//! run moves on. Filesystem errors outside recompression (walking, reading
//! metadata, copying) abort the run.
//!
//! Processing is sequential, in walk order. Every run reprocesses the whole
//! tree and overwrites existing outputs.

use crate::config::CompressConfig;
use crate::imaging::{
    Dimensions, ImageBackend, RecompressConfig, RustBackend, recompress_image,
};
use crate::policy::{Disposition, FormatSet, SizeThreshold};
use crate::walk::{WalkOrder, to_slash_path, walk_files};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CompressError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Everything the pipeline needs to decide and act on a file.
#[derive(Debug, Clone)]
pub struct CompressPlan {
    pub formats: FormatSet,
    pub threshold: SizeThreshold,
    pub recompress: RecompressConfig,
    pub order: WalkOrder,
}

impl CompressPlan {
    pub fn from_config(config: &CompressConfig) -> Self {
        Self {
            formats: config.formats(),
            threshold: config.threshold(),
            recompress: config.recompress(),
            order: WalkOrder::Native,
        }
    }
}

impl Default for CompressPlan {
    fn default() -> Self {
        Self::from_config(&CompressConfig::default())
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Within the size threshold; copied unchanged.
    Copied { bytes: u64 },
    /// Re-encoded as JPEG, possibly resized.
    Recompressed {
        original: Dimensions,
        output: Dimensions,
    },
    /// Extension not supported; nothing written.
    Skipped,
    /// Decode or encode failed; nothing usable written.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Path relative to the input root, `/`-separated.
    pub relative_path: String,
    pub kind: OutcomeKind,
}

/// Per-file outcomes of a run, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl CompressSummary {
    fn count(&self, pred: impl Fn(&OutcomeKind) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.kind)).count()
    }

    pub fn copied(&self) -> usize {
        self.count(|k| matches!(k, OutcomeKind::Copied { .. }))
    }

    pub fn recompressed(&self) -> usize {
        self.count(|k| matches!(k, OutcomeKind::Recompressed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|k| matches!(k, OutcomeKind::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|k| matches!(k, OutcomeKind::Failed { .. }))
    }

    /// Supported images seen, whatever their outcome.
    pub fn images(&self) -> usize {
        self.outcomes.len() - self.skipped()
    }
}

/// Run the compression pipeline with the `image`-crate backend.
pub fn compress(config: &CompressConfig) -> Result<CompressSummary, CompressError> {
    compress_with_backend(
        &RustBackend::new(),
        &CompressPlan::from_config(config),
        &config.input_dir,
        &config.output_dir,
    )
}

/// Run the compression pipeline with any backend (allows testing with mock).
pub fn compress_with_backend(
    backend: &impl ImageBackend,
    plan: &CompressPlan,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<CompressSummary, CompressError> {
    let mut summary = CompressSummary::default();

    for entry in walk_files(input_dir, plan.order) {
        let entry = entry?;
        let relative_path = to_slash_path(&entry.relative);

        if !plan.formats.matches(&entry.relative) {
            debug!(file = %relative_path, "skipping unsupported file");
            summary.outcomes.push(FileOutcome {
                relative_path,
                kind: OutcomeKind::Skipped,
            });
            continue;
        }

        let output_path = output_dir.join(&entry.relative);
        let size = fs::metadata(&entry.path)
            .map_err(CompressError::io(&entry.path))?
            .len();

        let kind = match plan.threshold.disposition(size) {
            Disposition::Copy => {
                let bytes = copy_verbatim(&entry.path, &output_path)?;
                debug!(file = %relative_path, bytes, "copied");
                OutcomeKind::Copied { bytes }
            }
            Disposition::Recompress => {
                match recompress_image(backend, &entry.path, &output_path, &plan.recompress) {
                    Ok(result) => {
                        debug!(
                            file = %relative_path,
                            original = %result.original,
                            output = %result.output,
                            "recompressed"
                        );
                        OutcomeKind::Recompressed {
                            original: result.original,
                            output: result.output,
                        }
                    }
                    Err(e) => {
                        warn!(file = %entry.path.display(), error = %e, "recompression failed");
                        OutcomeKind::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            }
        };

        summary.outcomes.push(FileOutcome {
            relative_path,
            kind,
        });
    }

    Ok(summary)
}

/// Copy `source` to `dest` byte-for-byte, creating parent directories.
fn copy_verbatim(source: &Path, dest: &Path) -> Result<u64, CompressError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(CompressError::io(parent))?;
    }
    fs::copy(source, dest).map_err(CompressError::io(source))
}
