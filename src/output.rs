//! CLI output formatting for both pipelines.
//!
//! Each pipeline has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Compress
//!
//! ```text
//! copied        a.png (1.0 KB)
//! recompressed  sub/b.jpg 4000x2000 → 2560x1280
//! Failed to process broken.jpg: Processing failed: ...
//!
//! 3 images: 1 copied, 1 recompressed, 1 failed
//! ```
//!
//! Skipped files only appear in the summary count.
//!
//! ## Manifest
//!
//! ```text
//! Generated gallery.js with 2 images.
//! ```

use crate::compress::{CompressSummary, OutcomeKind};
use crate::config::Config;
use crate::manifest::ManifestSummary;

/// Human-readable byte size.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Compress output
// ============================================================================

/// Format per-file lines and a closing summary for a compression run.
pub fn format_compress_output(summary: &CompressSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for outcome in &summary.outcomes {
        match &outcome.kind {
            OutcomeKind::Copied { bytes } => lines.push(format!(
                "copied        {} ({})",
                outcome.relative_path,
                format_bytes(*bytes)
            )),
            OutcomeKind::Recompressed { original, output } if original == output => lines.push(
                format!("recompressed  {} {}", outcome.relative_path, output),
            ),
            OutcomeKind::Recompressed { original, output } => lines.push(format!(
                "recompressed  {} {} \u{2192} {}",
                outcome.relative_path, original, output
            )),
            OutcomeKind::Failed { reason } => lines.push(format!(
                "Failed to process {}: {}",
                outcome.relative_path, reason
            )),
            OutcomeKind::Skipped => {}
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }

    let mut counts = vec![
        format!("{} copied", summary.copied()),
        format!("{} recompressed", summary.recompressed()),
    ];
    if summary.failed() > 0 {
        counts.push(format!("{} failed", summary.failed()));
    }
    if summary.skipped() > 0 {
        counts.push(format!("{} skipped", plural(summary.skipped(), "other file")));
    }
    lines.push(format!(
        "{}: {}",
        plural(summary.images(), "image"),
        counts.join(", ")
    ));

    lines
}

/// Print compression output to stdout.
pub fn print_compress_output(summary: &CompressSummary) {
    for line in format_compress_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifest output
// ============================================================================

pub fn format_manifest_output(summary: &ManifestSummary) -> Vec<String> {
    vec![format!(
        "Generated {} with {}.",
        summary.output_file.display(),
        plural(summary.count, "image")
    )]
}

/// Print manifest output to stdout.
pub fn print_manifest_output(summary: &ManifestSummary) {
    for line in format_manifest_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the resolved configuration for `check`.
pub fn format_config(config: &Config) -> Vec<String> {
    let c = &config.compress;
    let m = &config.manifest;
    vec![
        "Compress".to_string(),
        format!(
            "    {} \u{2192} {}",
            c.input_dir.display(),
            c.output_dir.display()
        ),
        format!(
            "    recompress above {} MB, long edge {} px, JPEG quality {}",
            c.max_filesize_mb, c.max_dimension, c.jpeg_quality
        ),
        format!("    formats: {}", c.formats().extensions().join(", ")),
        "Manifest".to_string(),
        format!(
            "    {} \u{2192} {} (const {})",
            m.albums_dir.display(),
            m.output_file.display(),
            m.variable
        ),
        format!("    formats: {}", m.formats().extensions().join(", ")),
    ]
}

pub fn print_config(config: &Config) {
    for line in format_config(config) {
        println!("{}", line);
    }
}
