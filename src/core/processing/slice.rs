//! Luminance-threshold slicing: the plain "cut around the dark content" crop,
//! without background removal or canvas fitting.
use image::RgbaImage;
use tracing::debug;

use crate::core::processing::crop::crop_to_bounds;
use crate::types::Rect;

/// ITU-R 601 luma, integer form.
#[inline]
pub fn luma(px: &[u8]) -> u8 {
    ((px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114) / 1000) as u8
}

/// Bounds of all pixels whose luma is strictly below `threshold`.
pub fn luma_content_bounds(img: &RgbaImage, threshold: u8) -> Option<Rect> {
    let w = img.width() as usize;
    if w == 0 {
        return None;
    }
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;

    for (idx, px) in img.as_raw().chunks_exact(4).enumerate() {
        if luma(px) < threshold {
            let (x, y) = (idx % w, idx / w);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if min_x == usize::MAX {
        return None;
    }
    Some(Rect::new(
        min_x as u32,
        min_y as u32,
        max_x as u32 + 1,
        max_y as u32 + 1,
    ))
}

/// Crop a cell to its dark content plus `padding`. A cell with nothing below
/// the threshold comes back whole.
pub fn slice_to_content(img: RgbaImage, threshold: u8, padding: u32) -> RgbaImage {
    let bounds = luma_content_bounds(&img, threshold);
    debug!("Slice bounds (threshold {}): {:?}", threshold, bounds);
    crop_to_bounds(img, bounds, padding)
}
