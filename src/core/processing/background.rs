use image::RgbaImage;
use tracing::debug;

use crate::types::Color;

/// Distance from each edge at which corners are sampled, to stay clear of
/// anti-aliased borders.
pub const CORNER_INSET: u32 = 5;

/// Smallest width/height for which inset corner sampling is used.
pub const MIN_SAMPLE_SIZE: u32 = 2 * CORNER_INSET;

/// Estimate the flat background color of a region as the per-channel
/// average (floored) of four corner samples taken `CORNER_INSET` pixels in
/// from each edge.
///
/// Regions narrower or shorter than `MIN_SAMPLE_SIZE` have no usable inset
/// corners; for those pixel (0, 0) is used directly. An empty region yields
/// the default (black) color.
///
/// Assumes a uniform background. Gradient or textured backgrounds are not
/// modelled: the average of the four corners is used as-is.
pub fn sample_background(img: &RgbaImage) -> Color {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Color::default();
    }
    if w < MIN_SAMPLE_SIZE || h < MIN_SAMPLE_SIZE {
        debug!(
            "Region {}x{} too small for corner sampling, using pixel (0, 0)",
            w, h
        );
        return Color::from_pixel(img.get_pixel(0, 0));
    }

    let near_x = CORNER_INSET;
    let near_y = CORNER_INSET;
    let far_x = w - 1 - CORNER_INSET;
    let far_y = h - 1 - CORNER_INSET;

    let corners = [
        img.get_pixel(near_x, near_y),
        img.get_pixel(far_x, near_y),
        img.get_pixel(near_x, far_y),
        img.get_pixel(far_x, far_y),
    ];

    let mut sum = [0u32; 3];
    for px in corners {
        for (acc, &c) in sum.iter_mut().zip(px.0.iter()) {
            *acc += c as u32;
        }
    }

    Color::new((sum[0] / 4) as u8, (sum[1] / 4) as u8, (sum[2] / 4) as u8)
}
