//! Manifest pipeline: list gallery images as a JavaScript array.
//!
//! Walks the albums directory and records one [`GalleryItem`] per image, in
//! walk order. Subdirectories become groups:
//!
//! ```text
//! albums/
//! ├── a.png              {"name": "a", "src": "a.png"}
//! └── sub/
//!     └── b.jpg          {"name": "b", "src": "sub/b.jpg", "group": "sub"}
//! ```
//!
//! The items are written as a single assignment statement the front-end
//! gallery loads directly:
//!
//! ```text
//! const allItems = [
//!   {
//!     "name": "a",
//!     "src": "a.png"
//!   },
//!   ...
//! ];
//! ```
//!
//! Output depends only on the tree, so re-running over an unchanged tree
//! produces byte-identical files.

use crate::config::ManifestConfig;
use crate::policy::FormatSet;
use crate::walk::{WalkOrder, to_slash_path, walk_files};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to walk albums directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One image in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// File name without its extension.
    pub name: String,
    /// `/`-separated path relative to the albums directory (plus any prefix).
    pub src: String,
    /// Containing directory relative to the albums directory; absent for
    /// top-level images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// How items are collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOptions {
    pub src_prefix: String,
    pub order: WalkOrder,
}

/// Result of writing a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub output_file: PathBuf,
    pub count: usize,
}

/// Collect a gallery item for every matching file under `root`.
pub fn collect_items(
    root: &Path,
    formats: &FormatSet,
    options: &ManifestOptions,
) -> Result<Vec<GalleryItem>, ManifestError> {
    let mut items = Vec::new();

    for entry in walk_files(root, options.order) {
        let entry = entry?;
        if !formats.matches(&entry.relative) {
            continue;
        }

        let name = entry
            .relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let group = Some(to_slash_path(entry.relative_dir())).filter(|g| !g.is_empty());
        let src = format!("{}{}", options.src_prefix, to_slash_path(&entry.relative));

        debug!(%src, group = group.as_deref().unwrap_or("-"), "gallery item");
        items.push(GalleryItem { name, src, group });
    }

    Ok(items)
}

/// Render items as `const <variable> = <pretty JSON>;`.
///
/// JSON is indented by two spaces. No trailing newline is written.
pub fn render_script(items: &[GalleryItem], variable: &str) -> Result<String, ManifestError> {
    let json = serde_json::to_string_pretty(items)?;
    Ok(format!("const {} = {};", variable, json))
}

/// Run the manifest pipeline described by `config` and write the script file.
pub fn write_manifest(config: &ManifestConfig) -> Result<ManifestSummary, ManifestError> {
    let options = ManifestOptions {
        src_prefix: config.src_prefix.clone(),
        order: config.walk_order(),
    };
    let items = collect_items(&config.albums_dir, &config.formats(), &options)?;
    let script = render_script(&items, &config.variable)?;

    if let Some(parent) = config.output_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.output_file, script)?;

    Ok(ManifestSummary {
        output_file: config.output_file.clone(),
        count: items.len(),
    })
}
