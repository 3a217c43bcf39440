//! Pixel sampling: turns a decoded RGBA buffer into the population of pixels worth quantizing.

use std::borrow::Cow;

use image::{RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::{
    color::{Rgb, relative_luminance},
    error::{Error, Result},
    options::ExtractOptions,
};

/// Shrinks the image so its longest side is at most `max_dimension`, keeping the aspect ratio.
/// Returns the (possibly borrowed) RGBA bytes along with their dimensions.
fn downsample<'a>(
    pixels: &'a [u8],
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Result<(Cow<'a, [u8]>, u32, u32)> {
    let longest = width.max(height);
    if longest <= max_dimension {
        return Ok((Cow::Borrowed(pixels), width, height));
    }

    let scale = f64::from(max_dimension) / f64::from(longest);
    let out_w = ((f64::from(width) * scale).floor() as u32).max(1);
    let out_h = ((f64::from(height) * scale).floor() as u32).max(1);
    debug!(width, height, out_w, out_h, "downsampling before sampling");

    let image = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(
        Error::InvalidDataLength {
            expected: width as usize * height as usize * 4,
            actual: pixels.len(),
        },
    )?;
    let resized = image::imageops::resize(&image, out_w, out_h, FilterType::Triangle);
    Ok((Cow::Owned(resized.into_raw()), out_w, out_h))
}

/// Collects the opaque, mid-luminance pixels of an RGBA8 image in row-major order.
///
/// Large images are downsampled first, and very dense ones are visited at a stride of two.
/// An empty result is valid: it means nothing in the image is worth quantizing.
pub fn sample_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &ExtractOptions,
) -> Result<Vec<Rgb>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4));
    if expected != Some(pixels.len()) {
        return Err(Error::InvalidDataLength {
            expected: expected.unwrap_or(usize::MAX),
            actual: pixels.len(),
        });
    }

    let (raw, w, h) = downsample(pixels, width, height, options.max_dimension)?;
    let pixel_count = w as usize * h as usize;
    let step = if pixel_count > options.stride_threshold { 2 } else { 1 };

    let sampled: Vec<Rgb> = raw
        .chunks_exact(4)
        .step_by(step)
        .filter(|chunk| chunk[3] >= options.alpha_threshold)
        .map(|chunk| Rgb::new(chunk[0], chunk[1], chunk[2]))
        .filter(|&color| {
            let lum = relative_luminance(color);
            lum >= options.min_luminance && lum <= options.max_luminance
        })
        .collect();

    debug!(
        pixel_count,
        step,
        eligible = sampled.len(),
        "sampled pixels for quantization"
    );
    Ok(sampled)
}
