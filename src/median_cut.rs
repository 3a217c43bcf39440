//! Median cut color quantization.
//!
//! The pixel population starts out as a single bucket. The bucket spanning the widest range on
//! any one channel is repeatedly sorted along that channel and cut in half at its median, until
//! there are enough buckets or no bucket can be split any further. Each bucket is then averaged
//! into one palette color.

use tracing::{debug, trace};

use crate::{
    color::{FALLBACK_GRAY, Rgb},
    error::{Error, Result},
};

fn channel(color: Rgb, index: usize) -> u8 {
    match index {
        0 => color.red,
        1 => color.green,
        _ => color.blue,
    }
}

/// Per-channel `max - min` across the bucket.
fn color_range(bucket: &[Rgb]) -> [u8; 3] {
    let (mut min_r, mut min_g, mut min_b) = (255, 255, 255);
    let (mut max_r, mut max_g, mut max_b) = (0, 0, 0);

    for pixel in bucket {
        (min_r, max_r) = (min_r.min(pixel.red), max_r.max(pixel.red));
        (min_g, max_g) = (min_g.min(pixel.green), max_g.max(pixel.green));
        (min_b, max_b) = (min_b.min(pixel.blue), max_b.max(pixel.blue));
    }

    [
        max_r.saturating_sub(min_r),
        max_g.saturating_sub(min_g),
        max_b.saturating_sub(min_b),
    ]
}

/// The channel with the widest range, and that range. Ties go to the earlier channel (R, G, B).
fn widest_channel(ranges: [u8; 3]) -> (usize, u8) {
    let mut widest = (0, ranges[0]);
    for (index, &range) in ranges.iter().enumerate().skip(1) {
        if range > widest.1 {
            widest = (index, range);
        }
    }
    widest
}

/// Picks the bucket to split next: the one with the widest channel range, the earliest one on
/// ties. Buckets with fewer than two pixels are never candidates. Returns `None` when every
/// candidate is a single flat color.
fn select_bucket(buckets: &[Vec<Rgb>]) -> Option<(usize, usize)> {
    let mut selected = None;
    let mut max_range = 0;
    for (index, bucket) in buckets.iter().enumerate() {
        if bucket.len() < 2 {
            continue;
        }
        let (channel, range) = widest_channel(color_range(bucket));
        if range > max_range {
            max_range = range;
            selected = Some((index, channel));
        }
    }
    selected
}

/// Mean of each channel, rounded half up.
fn average_color(bucket: &[Rgb]) -> Rgb {
    if bucket.is_empty() {
        return FALLBACK_GRAY;
    }
    let n = bucket.len() as u64;
    let [r, g, b] = bucket.iter().fold([0u64; 3], |[r, g, b], pixel| {
        [
            r + u64::from(pixel.red),
            g + u64::from(pixel.green),
            b + u64::from(pixel.blue),
        ]
    });
    let mean = |sum: u64| u8::try_from((2 * sum + n) / (2 * n)).unwrap_or(u8::MAX);
    Rgb::new(mean(r), mean(g), mean(b))
}

/// Reduces `pixels` to at most `target_count` representative colors, in bucket order.
///
/// An empty population yields the single fallback gray. A population with fewer than
/// `target_count` distinct colors yields fewer colors; the result is never padded.
pub fn quantize(pixels: &[Rgb], target_count: usize) -> Result<Vec<Rgb>> {
    if target_count == 0 {
        return Err(Error::InvalidColorCount(target_count));
    }
    if pixels.is_empty() {
        debug!("no eligible pixels, falling back to gray");
        return Ok(vec![FALLBACK_GRAY]);
    }

    let mut buckets = vec![pixels.to_vec()];

    while buckets.len() < target_count {
        let Some((index, channel_index)) = select_bucket(&buckets) else {
            debug!(
                buckets = buckets.len(),
                target_count, "no bucket left to split, stopping early"
            );
            break;
        };

        let mut bucket = std::mem::take(&mut buckets[index]);
        bucket.sort_by_key(|&pixel| channel(pixel, channel_index));
        let right = bucket.split_off(bucket.len() / 2);
        trace!(
            index,
            channel = channel_index,
            left = bucket.len(),
            right = right.len(),
            "split bucket"
        );
        buckets.splice(index..=index, [bucket, right]);
    }

    Ok(buckets.iter().map(|bucket| average_color(bucket)).collect())
}
