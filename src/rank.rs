//! Palette ordering and dominant color selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{FALLBACK_GRAY, Rgb, relative_luminance, squared_distance, to_hex};

/// The outcome of a palette extraction.
///
/// Serializes as `{ "colors": ["#rrggbb", ...], "dominant": "#rrggbb" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Palette colors from darkest to lightest.
    pub colors: Vec<String>,
    /// The palette color closest to the largest share of sampled pixels.
    pub dominant: String,
}

/// Sorts colors by ascending relative luminance. Equal luminances keep their order.
pub fn sort_by_luminance(palette: &mut [Rgb]) {
    palette.sort_by(|&a, &b| relative_luminance(a).total_cmp(&relative_luminance(b)));
}

/// Index of the palette entry closest to `pixel`, the lowest index on ties.
fn nearest_index(pixel: Rgb, palette: &[Rgb]) -> usize {
    let (mut min_index, mut min_distance) = (0, u32::MAX);
    for (i, &color) in palette.iter().enumerate() {
        let distance = squared_distance(pixel, color);
        if distance < min_distance {
            min_distance = distance;
            min_index = i;
        }
    }
    min_index
}

/// Lets every pixel vote for its nearest palette color and returns the index with the most
/// votes. Ties go to the lowest index, so an empty population picks index 0.
pub fn dominant_index(pixels: &[Rgb], palette: &[Rgb]) -> usize {
    let mut counts = vec![0usize; palette.len()];
    for &pixel in pixels {
        counts[nearest_index(pixel, palette)] += 1;
    }

    let (mut best_index, mut best_count) = (0, 0);
    for (i, &count) in counts.iter().enumerate() {
        if count > best_count {
            best_count = count;
            best_index = i;
        }
    }
    best_index
}

/// Orders the palette and elects its dominant color using the same pixels it was built from.
pub fn rank(mut palette: Vec<Rgb>, pixels: &[Rgb]) -> ExtractionResult {
    if palette.is_empty() {
        palette.push(FALLBACK_GRAY);
    }
    sort_by_luminance(&mut palette);

    let dominant = palette[dominant_index(pixels, &palette)];
    debug!(
        colors = palette.len(),
        dominant = %to_hex(dominant),
        "ranked palette"
    );

    ExtractionResult {
        colors: palette.iter().copied().map(to_hex).collect(),
        dominant: to_hex(dominant),
    }
}
