//! Color primitives shared by every stage of the extraction pipeline.
//!
//! Pixels are plain 8-bit sRGB triples. Luminance follows the WCAG 2.x relative luminance
//! definition, and color distance is squared Euclidean distance in RGB space.

use palette::{FromColor, Hsl};

use crate::error::{Error, Result};

/// An opaque 8-bit sRGB color. Used both for sampled pixels and for palette entries.
pub type Rgb = palette::Srgb<u8>;

/// The color returned when there is nothing to quantize.
pub const FALLBACK_GRAY: Rgb = Rgb::new(128, 128, 128);

/// WCAG linearization of a single 8-bit channel.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color, in `[0, 1]`.
///
///   L = 0.2126 * R + 0.7152 * G + 0.0722 * B
///
/// where each channel has been linearized first.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.red) + 0.7152 * linearize(color.green) + 0.0722 * linearize(color.blue)
}

/// Squared Euclidean distance between two colors. No square root is taken, the value is only
/// ever compared against other distances.
#[must_use]
pub fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = i32::from(a.red) - i32::from(b.red);
    let dg = i32::from(a.green) - i32::from(b.green);
    let db = i32::from(a.blue) - i32::from(b.blue);
    (dr * dr + dg * dg + db * db) as u32
}

/// Rounds and clamps an arbitrary channel value into `[0, 255]`. NaN maps to 0.
#[must_use]
pub fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Formats a color as a lowercase `#rrggbb` string.
#[must_use]
pub fn to_hex(color: Rgb) -> String {
    format!("#{color:x}")
}

/// Parses `#rrggbb`, `rrggbb` or the short `#rgb` form. Case-insensitive.
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    hex.trim()
        .parse::<Rgb>()
        .map_err(|_| Error::InvalidHex(hex.to_owned()))
}

/// HSL representation of a color. Hue is in degrees; saturation and lightness are in `[0, 1]`.
#[must_use]
pub fn to_hsl(color: Rgb) -> Hsl {
    Hsl::from_color(color.into_format::<f32>())
}
