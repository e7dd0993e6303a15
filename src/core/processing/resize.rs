use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;
use tracing::debug;

use crate::error::{Error, Result};

/// Largest size with the same aspect ratio as `src` that fits inside
/// `avail`, scaling up or down as needed.
///
/// The limiting axis is picked by cross-multiplication and lands exactly on
/// the available size; the other axis is floored. Both results are at least 1.
pub fn calculate_fit_dimensions(
    src_width: u32,
    src_height: u32,
    avail_width: u32,
    avail_height: u32,
) -> (u32, u32) {
    let (sw, sh) = (src_width.max(1) as u64, src_height.max(1) as u64);
    let (aw, ah) = (avail_width.max(1) as u64, avail_height.max(1) as u64);

    // aw / sw <= ah / sh  <=>  aw * sh <= ah * sw
    let (new_w, new_h) = if aw * sh <= ah * sw {
        (aw, sh * aw / sw)
    } else {
        (sw * ah / sh, ah)
    };

    (new_w.max(1) as u32, new_h.max(1) as u32)
}

/// Resample an RGBA buffer with a Lanczos3 convolution. Alpha is handled
/// premultiplied so transparent pixels do not bleed color into edges.
pub fn resize_rgba_image(img: &RgbaImage, target_width: u32, target_height: u32) -> Result<RgbaImage> {
    if img.dimensions() == (target_width, target_height) {
        return Ok(img.clone());
    }

    debug!(
        "Resizing {}x{} -> {}x{} (Lanczos3)",
        img.width(),
        img.height(),
        target_width,
        target_height
    );

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        img.width(),
        img.height(),
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| Error::Resize(e.to_string()))?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(|e| Error::Resize(e.to_string()))?;

    RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resized buffer has unexpected length".to_string()))
}
