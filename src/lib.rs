use js_sys::{Array, Object, Reflect};
use tracing::debug_span;
use wasm_bindgen::prelude::*;

pub mod analysis;
pub mod color;
pub mod error;
pub mod median_cut;
pub mod options;
pub mod rank;
pub mod sampler;

pub use analysis::{Categories, categorize};
pub use color::{Rgb, parse_hex, relative_luminance, squared_distance, to_hex};
pub use error::{Error, Result};
pub use median_cut::quantize;
pub use options::ExtractOptions;
pub use rank::{ExtractionResult, rank};
pub use sampler::sample_pixels;

// ------------------------------------------------------------
// Pipeline
// ------------------------------------------------------------

/// Extract a palette from a decoded RGBA8 buffer (`width * height * 4` bytes, row-major).
///
/// Steps performed:
/// 1. Downsample and filter the image into a population of eligible pixels.
/// 2. Run median cut over that population to get up to `options.color_count` colors.
/// 3. Sort the colors dark to light and elect the dominant one by nearest-color voting.
///
/// Images with no eligible pixels (fully transparent, all near-black or near-white) produce
/// the single fallback gray `#808080`.
pub fn extract_palette_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    let _span = debug_span!("extract_palette", width, height, k = options.color_count).entered();
    options.validate()?;

    let sampled = sample_pixels(pixels, width, height, options)?;
    let palette = quantize(&sampled, options.color_count)?;
    Ok(rank(palette, &sampled))
}

/// [`extract_palette_rgba`] with default options apart from the color count.
pub fn extract_palette(
    pixels: &[u8],
    width: u32,
    height: u32,
    color_count: usize,
) -> Result<ExtractionResult> {
    extract_palette_rgba(
        pixels,
        width,
        height,
        &ExtractOptions::with_color_count(color_count),
    )
}

/// Decode an encoded image (PNG, JPEG, ...) and extract its palette.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(input: &[u8], options: &ExtractOptions) -> Result<ExtractionResult> {
    let img = image::load_from_memory(input)?;
    let rgba8 = img.to_rgba8();
    let (width, height) = rgba8.dimensions();
    extract_palette_rgba(rgba8.as_raw(), width, height, options)
}

// ------------------------------------------------------------
// WebAssembly bindings
// ------------------------------------------------------------

fn to_js_object(result: &ExtractionResult) -> Result<Object, JsValue> {
    let colors_js = Array::new();
    for hex in &result.colors {
        colors_js.push(&JsValue::from_str(hex));
    }

    let object = Object::new();
    Reflect::set(&object, &JsValue::from_str("colors"), &colors_js)?;
    Reflect::set(
        &object,
        &JsValue::from_str("dominant"),
        &JsValue::from_str(&result.dominant),
    )?;
    Ok(object)
}

/// Extract a palette from an encoded image.
///
/// Returns `{ colors: string[], dominant: string }` with colors ordered dark to light.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(input: Vec<u8>, color_count: usize) -> Result<Object, JsValue> {
    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;
    let rgba8 = img.to_rgba8();
    let (width, height) = rgba8.dimensions();

    let result = extract_palette(rgba8.as_raw(), width, height, color_count)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js_object(&result)
}

/// Extract a palette from raw RGBA pixels, e.g. the `data` of a canvas `ImageData`.
#[wasm_bindgen(js_name = extractPaletteRgba)]
pub fn extract_palette_rgba_js(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    color_count: usize,
) -> Result<Object, JsValue> {
    let result = extract_palette(&pixels, width, height, color_count)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js_object(&result)
}
