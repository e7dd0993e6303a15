use image::RgbaImage;

use crate::core::processing::segment::OpacityMask;

/// Apply an opacity mask to a buffer, consuming it. Masked-out pixels get
/// alpha 0; kept pixels retain whatever alpha they already had (255 for
/// sources decoded from RGB). Color channels are left untouched.
///
/// Panics if the mask was not derived from a buffer of the same dimensions.
pub fn apply_alpha_mask(mut img: RgbaImage, mask: &OpacityMask) -> RgbaImage {
    assert_eq!(
        img.dimensions(),
        mask.dimensions(),
        "opacity mask dimensions must match the buffer"
    );

    for (x, y, px) in img.enumerate_pixels_mut() {
        if !mask.is_opaque(x, y) {
            px[3] = 0;
        }
    }
    img
}
