use image::RgbaImage;
use tracing::{debug, info};

use crate::core::params::ExtractParams;
use crate::core::processing::alpha::apply_alpha_mask;
use crate::core::processing::background::sample_background;
use crate::core::processing::canvas::fit_to_canvas;
use crate::core::processing::crop::crop_to_bounds;
use crate::core::processing::segment::flood_fill_background;
use crate::core::processing::slice::slice_to_content;
use crate::error::Result;
use crate::types::{Color, ExtractMode, Placement};

/// Result of running one cell buffer through the pipeline.
#[derive(Debug, Clone)]
pub struct CanonicalSprite {
    pub image: RgbaImage,
    /// Reference color used for segmentation (transparent mode only)
    pub background: Option<Color>,
    /// Size after the tight content crop, before any scaling
    pub cropped_size: (u32, u32),
    /// Where the sprite sits on the canvas (transparent mode only)
    pub placement: Option<Placement>,
}

/// Segment, composite and tight-crop a region. Returns an RGBA buffer whose
/// removed background has alpha 0. A region with no foreground comes back
/// uncropped.
pub fn remove_background(
    region: RgbaImage,
    background: Color,
    tolerance: f64,
    crop_padding: u32,
) -> RgbaImage {
    let segmentation = flood_fill_background(&region, background, tolerance);
    let rgba = apply_alpha_mask(region, &segmentation.mask);
    crop_to_bounds(rgba, segmentation.bounds, crop_padding)
}

/// Run a single cell buffer end to end. `background` overrides corner
/// sampling (used when the color is taken from the whole sheet).
pub fn canonicalize_region(
    region: RgbaImage,
    background: Option<Color>,
    params: &ExtractParams,
) -> Result<CanonicalSprite> {
    match params.mode {
        ExtractMode::Slice => {
            let sliced = slice_to_content(region, params.slice_threshold, params.slice_padding);
            debug!("Sliced size: {}x{}", sliced.width(), sliced.height());
            Ok(CanonicalSprite {
                cropped_size: sliced.dimensions(),
                image: sliced,
                background: None,
                placement: None,
            })
        }
        ExtractMode::Transparent => {
            let bg = background.unwrap_or_else(|| sample_background(&region));
            info!("Background color: {}", bg);

            let cropped = remove_background(region, bg, params.tolerance, params.crop_padding);
            let cropped_size = cropped.dimensions();
            info!("Cropped size: {}x{}", cropped_size.0, cropped_size.1);

            let fitted = fit_to_canvas(
                &cropped,
                params.target_width,
                params.target_height,
                params.canvas_padding,
            )?;

            Ok(CanonicalSprite {
                image: fitted.image,
                background: Some(bg),
                cropped_size,
                placement: Some(fitted.placement),
            })
        }
    }
}
