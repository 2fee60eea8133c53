//! # photo-shelf
//!
//! Two batch passes that prepare a photo tree for a static gallery page.
//!
//! ```text
//! 1. Compress   uncompressed_photos/  →  albums/      (copy or shrink each image)
//! 2. Manifest   albums/               →  gallery.js   (const allItems = [...];)
//! ```
//!
//! The passes are independent. Running the manifest after compression is a
//! convention, not a requirement: either can be pointed at any tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compress`] | Mirrors the input tree, copying small images and recompressing large ones |
//! | [`manifest`] | Lists gallery images with their group and writes the script artifact |
//! | [`walk`] | Recursive, top-down file enumeration shared by both passes |
//! | [`policy`] | Extension filter and size threshold, injectable into either pass |
//! | [`imaging`] | Backend trait + `image`-crate implementation: identify, resize, JPEG encode |
//! | [`config`] | `photo-shelf.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Failure model
//!
//! A file that cannot be decoded or encoded is reported in the run summary
//! and skipped. Filesystem errors (missing roots, permissions, full disks)
//! end the run. Neither pass retries, caches, or runs in parallel.
//!
//! # Known quirk
//!
//! A recompressed image keeps its original file name. A `.png` over the size
//! threshold therefore ends up as JPEG data behind a `.png` extension.
//! Browsers sniff the content and display it fine; other tools may not.

pub mod compress;
pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod policy;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
