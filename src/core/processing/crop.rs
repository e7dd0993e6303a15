use image::RgbaImage;
use image::imageops;
use tracing::debug;

use crate::types::Rect;

/// Tight bounds of all pixels with non-zero alpha, or `None` if the buffer is
/// fully transparent.
pub fn content_bounds(img: &RgbaImage) -> Option<Rect> {
    let w = img.width();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for (row, line) in img.as_raw().chunks_exact(w.max(1) as usize * 4).enumerate() {
        let y = row as u32;
        let mut first = None;
        let mut last = 0u32;
        for (col, px) in line.chunks_exact(4).enumerate() {
            if px[3] != 0 {
                if first.is_none() {
                    first = Some(col as u32);
                }
                last = col as u32;
            }
        }
        if let Some(first) = first {
            min_x = min_x.min(first);
            max_x = max_x.max(last);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_x == u32::MAX {
        return None;
    }
    Some(Rect::new(min_x, min_y, max_x + 1, max_y + 1))
}

/// Crop to `bounds` grown by `padding` (clamped to the buffer). With no
/// bounds, i.e. nothing opaque, the buffer is returned unmodified.
pub fn crop_to_bounds(img: RgbaImage, bounds: Option<Rect>, padding: u32) -> RgbaImage {
    let Some(bounds) = bounds else {
        debug!("No opaque content; keeping {}x{} buffer as-is", img.width(), img.height());
        return img;
    };
    let (w, h) = img.dimensions();
    let region = bounds.expand(padding, w, h);
    if region == Rect::full(w, h) {
        return img;
    }
    imageops::crop_imm(&img, region.left, region.top, region.width(), region.height()).to_image()
}

/// Crop an RGBA buffer to its non-transparent content plus `padding`.
pub fn crop_to_content(img: RgbaImage, padding: u32) -> RgbaImage {
    let bounds = content_bounds(&img);
    crop_to_bounds(img, bounds, padding)
}
