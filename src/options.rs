//! Tunables for palette extraction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a single extraction. The defaults are the standard sampling constants;
/// every field may be overridden from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Number of palette colors to aim for. The result may hold fewer when the image lacks
    /// diversity, never more.
    pub color_count: usize,
    /// Images whose longest side exceeds this are downsampled so that side equals it.
    pub max_dimension: u32,
    /// Pixel count (after downsampling) above which only every other pixel is visited.
    pub stride_threshold: usize,
    /// Pixels with alpha below this are treated as transparent and skipped.
    pub alpha_threshold: u8,
    /// Pixels darker than this relative luminance are skipped.
    pub min_luminance: f64,
    /// Pixels brighter than this relative luminance are skipped.
    pub max_luminance: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            color_count: 8,
            max_dimension: 150,
            stride_threshold: 10_000,
            alpha_threshold: 128,
            min_luminance: 0.03,
            max_luminance: 0.97,
        }
    }
}

impl ExtractOptions {
    /// Default options with a different color count.
    pub fn with_color_count(color_count: usize) -> Self {
        Self {
            color_count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.color_count == 0 {
            return Err(Error::InvalidColorCount(self.color_count));
        }
        if self.max_dimension == 0 {
            return Err(Error::InvalidOptions(
                "max_dimension must be at least 1".to_owned(),
            ));
        }
        let in_unit = |x: f64| (0.0..=1.0).contains(&x);
        if !in_unit(self.min_luminance)
            || !in_unit(self.max_luminance)
            || self.min_luminance > self.max_luminance
        {
            return Err(Error::InvalidOptions(format!(
                "luminance bounds must satisfy 0 <= min <= max <= 1 (got {} and {})",
                self.min_luminance, self.max_luminance
            )));
        }
        Ok(())
    }
}
