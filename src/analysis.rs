//! Coarse classification of palette colors by brightness and saturation.

use serde::{Deserialize, Serialize};

use crate::{
    color::{parse_hex, relative_luminance, to_hsl},
    error::Result,
};

const DARK_LUMINANCE: f64 = 0.3;
const LIGHT_LUMINANCE: f64 = 0.7;
const VIBRANT_SATURATION: f32 = 0.5;

/// Palette colors bucketed by brightness and by saturation.
///
/// Every color lands in exactly one of `vibrant`/`muted`, and in at most one of `dark`/`light`.
/// Colors keep their palette order within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub dark: Vec<String>,
    pub light: Vec<String>,
    pub vibrant: Vec<String>,
    pub muted: Vec<String>,
}

/// Categorizes `#rrggbb` colors, typically the `colors` of an extraction result.
pub fn categorize<S: AsRef<str>>(colors: &[S]) -> Result<Categories> {
    let mut categories = Categories::default();

    for hex in colors {
        let hex = hex.as_ref();
        let color = parse_hex(hex)?;
        let lum = relative_luminance(color);

        if lum < DARK_LUMINANCE {
            categories.dark.push(hex.to_owned());
        } else if lum > LIGHT_LUMINANCE {
            categories.light.push(hex.to_owned());
        }

        if to_hsl(color).saturation > VIBRANT_SATURATION {
            categories.vibrant.push(hex.to_owned());
        } else {
            categories.muted.push(hex.to_owned());
        }
    }

    Ok(categories)
}
