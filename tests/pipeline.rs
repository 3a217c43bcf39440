use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use image_palette_wasm::{
    Error, ExtractOptions, ExtractionResult, extract_palette, extract_palette_bytes,
    extract_palette_rgba, parse_hex, relative_luminance,
};
use pretty_assertions::assert_eq;

const RED: [u8; 4] = [200, 50, 50, 255];
const GREEN: [u8; 4] = [50, 200, 50, 255];
const BLUE: [u8; 4] = [50, 50, 200, 255];
const YELLOW: [u8; 4] = [200, 200, 50, 255];

fn quadrants(size: u32) -> RgbaImage {
    let half = size / 2;
    RgbaImage::from_fn(size, size, |x, y| {
        Rgba(match (x < half, y < half) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => YELLOW,
        })
    })
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) * 127 / (width + height)) as u8 + 64,
            255,
        ])
    })
}

fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn extract(image: &RgbaImage, k: usize) -> ExtractionResult {
    extract_palette(image.as_raw(), image.width(), image.height(), k).unwrap()
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

fn assert_well_formed(result: &ExtractionResult, k: usize) {
    assert!(!result.colors.is_empty() && result.colors.len() <= k);
    for hex in &result.colors {
        assert!(is_hex_color(hex), "malformed color {hex:?}");
    }
    assert!(is_hex_color(&result.dominant));
    assert!(result.colors.contains(&result.dominant));

    let luminances: Vec<f64> = result
        .colors
        .iter()
        .map(|hex| relative_luminance(parse_hex(hex).unwrap()))
        .collect();
    assert!(
        luminances.windows(2).all(|w| w[0] <= w[1]),
        "not sorted by luminance: {:?}",
        result.colors
    );
}

// ── Degenerate inputs ───────────────────────────────────────────────

#[test]
fn white_image_falls_back_to_gray() {
    let white = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
    let result = extract(&white, 8);
    assert_eq!(
        result,
        ExtractionResult {
            colors: vec!["#808080".to_owned()],
            dominant: "#808080".to_owned(),
        }
    );
}

#[test]
fn transparent_image_falls_back_to_gray() {
    let clear = RgbaImage::from_pixel(32, 32, Rgba([90, 140, 60, 0]));
    let result = extract(&clear, 4);
    assert_eq!(result.colors, vec!["#808080"]);
    assert_eq!(result.dominant, "#808080");
}

#[test]
fn flat_image_yields_a_single_color() {
    let flat = RgbaImage::from_pixel(40, 30, Rgba([90, 140, 60, 255]));
    let result = extract(&flat, 6);
    assert_eq!(result.colors, vec!["#5a8c3c"]);
    assert_eq!(result.dominant, "#5a8c3c");
}

// ── Quantization through the whole pipeline ────────────────────────

#[test]
fn four_quadrants_become_four_colors() {
    let result = extract(&quadrants(20), 4);
    assert_eq!(
        result,
        ExtractionResult {
            colors: vec![
                "#3232c8".to_owned(),
                "#c83232".to_owned(),
                "#32c832".to_owned(),
                "#c8c832".to_owned(),
            ],
            // All four tie on votes; the darkest wins.
            dominant: "#3232c8".to_owned(),
        }
    );
}

#[test]
fn low_diversity_is_not_padded() {
    let result = extract(&quadrants(20), 8);
    assert_eq!(result.colors.len(), 4);
}

#[test]
fn majority_color_is_dominant() {
    let mut pixels = Vec::new();
    for color in [RED; 20].iter().chain(&[GREEN; 60]).chain(&[BLUE; 20]) {
        pixels.extend_from_slice(color);
    }
    let result = extract_palette(&pixels, 10, 10, 3).unwrap();
    assert_eq!(result.colors.len(), 3);
    assert_eq!(result.dominant, "#32c832");
    assert_well_formed(&result, 3);
}

#[test]
fn gradients_are_well_formed_for_every_k() {
    let image = gradient(120, 90);
    for k in [1, 2, 3, 5, 8, 16, 32] {
        let result = extract(&image, k);
        assert_well_formed(&result, k);
    }
}

#[test]
fn diverse_image_reaches_the_requested_count() {
    let result = extract(&gradient(120, 90), 12);
    assert_eq!(result.colors.len(), 12);
}

#[test]
fn large_images_are_handled() {
    let result = extract(&gradient(1200, 800), 8);
    assert_well_formed(&result, 8);
}

#[test]
fn extraction_is_deterministic() {
    let image = gradient(640, 480);
    let first = extract(&image, 10);
    let second = extract(&image, 10);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ── Encoded input ───────────────────────────────────────────────────

#[test]
fn png_bytes_match_raw_pixels() {
    let image = quadrants(20);
    let options = ExtractOptions::with_color_count(4);
    let from_png = extract_palette_bytes(&encode_png(&image), &options).unwrap();
    assert_eq!(from_png, extract(&image, 4));
}

#[test]
fn undecodable_bytes_are_a_decode_error() {
    let result = extract_palette_bytes(b"definitely not an image", &ExtractOptions::default());
    assert!(matches!(result, Err(Error::Decode(_))));
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn zero_colors_is_rejected() {
    let image = quadrants(4);
    let result = extract_palette(image.as_raw(), 4, 4, 0);
    assert!(matches!(result, Err(Error::InvalidColorCount(0))));
}

#[test]
fn zero_colors_is_rejected_even_without_eligible_pixels() {
    let white = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let result = extract_palette(white.as_raw(), 4, 4, 0);
    assert!(matches!(result, Err(Error::InvalidColorCount(0))));
}

#[test]
fn short_buffer_is_rejected() {
    let result = extract_palette_rgba(&[0; 10], 2, 2, &ExtractOptions::default());
    assert!(matches!(result, Err(Error::InvalidDataLength { .. })));
}

// ── Output shape ────────────────────────────────────────────────────

#[test]
fn result_serializes_to_colors_and_dominant() {
    let result = extract(&quadrants(20), 2);
    let json: serde_json::Value = serde_json::to_value(&result).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object["colors"].is_array());
    assert!(object["dominant"].is_string());
}
