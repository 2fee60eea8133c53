//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Fit an image inside a long-edge cap, preserving aspect ratio.
///
/// Returns `None` when the longer side is already within `max_edge`, meaning
/// no resize is needed. Otherwise the longer side becomes exactly `max_edge`
/// and the shorter side is `round(max_edge * shorter / longer)`, never below 1.
///
/// # Examples
/// ```
/// # use photo_shelf::imaging::{Dimensions, fit_long_edge};
/// let fitted = fit_long_edge(Dimensions { width: 4000, height: 2000 }, 2560);
/// assert_eq!(fitted, Some(Dimensions { width: 2560, height: 1280 }));
///
/// assert_eq!(fit_long_edge(Dimensions { width: 100, height: 50 }, 2560), None);
/// ```
pub fn fit_long_edge(original: Dimensions, max_edge: u32) -> Option<Dimensions> {
    let Dimensions { width, height } = original;
    let longer = width.max(height);

    if longer <= max_edge {
        return None;
    }

    let shorter = width.min(height);
    let scaled = ((max_edge as f64 * shorter as f64 / longer as f64).round() as u32).max(1);

    if width >= height {
        // Landscape or square
        Some(Dimensions {
            width: max_edge,
            height: scaled,
        })
    } else {
        // Portrait
        Some(Dimensions {
            width: scaled,
            height: max_edge,
        })
    }
}
