//! Recursive file enumeration shared by both pipelines.
//!
//! [`walk_files`] yields every regular file below a root as a [`FileEntry`]
//! carrying both its full path and its path relative to the root. Traversal
//! is top-down: the files of a directory come before anything inside its
//! subdirectories.
//!
//! ```text
//! albums/
//! ├── a.png            → a.png
//! └── sub/
//!     └── b.jpg        → sub/b.jpg
//! ```
//!
//! Errors (missing root, unreadable directory) are yielded in place and are
//! fatal for the caller; there is no partial-tree recovery.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Order in which directory entries are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkOrder {
    /// Whatever order the filesystem lists entries in.
    #[default]
    Native,
    /// Entries sorted by file name, for output that is stable across machines.
    Sorted,
}

/// A regular file found under a walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path (root joined with `relative`).
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub relative: PathBuf,
}

impl FileEntry {
    pub fn file_name(&self) -> &OsStr {
        self.relative.file_name().unwrap_or(self.relative.as_os_str())
    }

    /// Directory containing the file, relative to the root. Empty for
    /// files directly in the root.
    pub fn relative_dir(&self) -> &Path {
        self.relative.parent().unwrap_or(Path::new(""))
    }
}

/// Join the components of a relative path with `/`, whatever the platform.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type().is_dir().cmp(&b.file_type().is_dir())
}

/// Walk `root` recursively, yielding regular files only.
///
/// Symlinked directories are not descended into. A symlink whose target is
/// a regular file is yielded like the file itself.
pub fn walk_files(
    root: &Path,
    order: WalkOrder,
) -> impl Iterator<Item = Result<FileEntry, walkdir::Error>> + use<> {
    let walker = WalkDir::new(root).follow_links(false);
    // Stable sort: within each class, Native keeps the listing order.
    let walker = match order {
        WalkOrder::Native => walker.sort_by(files_first),
        WalkOrder::Sorted => {
            walker.sort_by(|a, b| files_first(a, b).then_with(|| a.file_name().cmp(b.file_name())))
        }
    };
    let root = root.to_path_buf();

    walker.into_iter().filter_map(move |entry| match entry {
        Ok(entry) if !entry.file_type().is_dir() && entry.path().is_file() => {
            let relative = entry
                .path()
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
            Some(Ok(FileEntry {
                path: entry.into_path(),
                relative,
            }))
        }
        Ok(_) => None,
        Err(e) => Some(Err(e)),
    })
}
