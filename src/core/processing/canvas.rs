use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::core::processing::resize::{calculate_fit_dimensions, resize_rgba_image};
use crate::error::{Error, Result};
use crate::types::Placement;

/// A sprite fitted onto its output canvas.
#[derive(Debug, Clone)]
pub struct FittedSprite {
    pub image: RgbaImage,
    pub placement: Placement,
}

/// Source-over blend of `src` onto `dst` (straight, non-premultiplied alpha).
#[inline]
pub fn composite_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    if sa <= 0.0 {
        return dst;
    }
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let blend = |s: u8, d: u8| -> u8 {
        let out = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        out.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Paste `src` onto `canvas` with its top-left corner at (`x`, `y`),
/// compositing by source alpha. Parts falling outside the canvas are dropped.
pub fn paste_over(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (cw, ch) = canvas.dimensions();
    for (sx, sy, px) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx >= cw || dy >= ch {
            continue;
        }
        let dst = *canvas.get_pixel(dx, dy);
        canvas.put_pixel(dx, dy, composite_over(*px, dst));
    }
}

/// Scale `img` to fit a `target_width` x `target_height` canvas minus
/// `padding` on every side, preserving aspect ratio, and center it on a fully
/// transparent canvas of exactly the target size.
///
/// Offsets are floored, so odd leftovers go to the right/bottom. Content is
/// never cropped at this stage, only scaled.
pub fn fit_to_canvas(
    img: &RgbaImage,
    target_width: u32,
    target_height: u32,
    padding: u32,
) -> Result<FittedSprite> {
    let avail_w = target_width.saturating_sub(padding.saturating_mul(2));
    let avail_h = target_height.saturating_sub(padding.saturating_mul(2));
    if avail_w == 0 || avail_h == 0 {
        return Err(Error::InvalidArgument {
            arg: "canvas_padding",
            value: format!("{} on a {}x{} canvas", padding, target_width, target_height),
        });
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::Processing(format!(
            "cannot fit an empty {}x{} buffer",
            img.width(),
            img.height()
        )));
    }

    let (new_w, new_h) = calculate_fit_dimensions(img.width(), img.height(), avail_w, avail_h);
    let scaled = resize_rgba_image(img, new_w, new_h)?;

    let mut canvas = RgbaImage::from_pixel(target_width, target_height, Rgba([0, 0, 0, 0]));
    let x = (target_width - new_w) / 2;
    let y = (target_height - new_h) / 2;
    paste_over(&mut canvas, &scaled, x, y);

    let placement = Placement {
        x,
        y,
        width: new_w,
        height: new_h,
    };
    let (fill_w, fill_h) = placement.fill_ratio(target_width, target_height);
    debug!(
        "Fit {}x{} -> {}x{} at ({}, {})",
        img.width(),
        img.height(),
        new_w,
        new_h,
        x,
        y
    );
    info!("Fill ratio: {:.1}% width, {:.1}% height", fill_w, fill_h);

    Ok(FittedSprite {
        image: canvas,
        placement,
    })
}
