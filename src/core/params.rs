use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BackgroundSource, ExtractMode};

pub const DEFAULT_TOLERANCE: f64 = 12.0;
pub const DEFAULT_CROP_PADDING: u32 = 2;
pub const DEFAULT_CANVAS_PADDING: u32 = 6;
pub const DEFAULT_TARGET_WIDTH: u32 = 400;
pub const DEFAULT_TARGET_HEIGHT: u32 = 140;
pub const DEFAULT_SLICE_THRESHOLD: u8 = 240;
pub const DEFAULT_SLICE_PADDING: u32 = 10;

/// Extraction parameters suitable for layout files and CLI overrides.
/// Passed explicitly into every pipeline call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractParams {
    /// Maximum RGB distance from the background color still treated as
    /// background (inclusive). Lower removes less.
    pub tolerance: f64,
    /// Padding kept around the tight content box after segmentation
    pub crop_padding: u32,
    /// Margin left free on every side of the output canvas
    pub canvas_padding: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub background: BackgroundSource,
    pub mode: ExtractMode,
    /// Slice mode: pixels with luminance below this count as content
    pub slice_threshold: u8,
    /// Slice mode: padding around the luminance content box
    pub slice_padding: u32,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            crop_padding: DEFAULT_CROP_PADDING,
            canvas_padding: DEFAULT_CANVAS_PADDING,
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            background: BackgroundSource::Cell,
            mode: ExtractMode::Transparent,
            slice_threshold: DEFAULT_SLICE_THRESHOLD,
            slice_padding: DEFAULT_SLICE_PADDING,
        }
    }
}

impl ExtractParams {
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "tolerance",
                value: self.tolerance.to_string(),
            });
        }
        if self.target_width == 0 {
            return Err(Error::InvalidArgument {
                arg: "target_width",
                value: "0".to_string(),
            });
        }
        if self.target_height == 0 {
            return Err(Error::InvalidArgument {
                arg: "target_height",
                value: "0".to_string(),
            });
        }
        let min_side = self.target_width.min(self.target_height) as u64;
        if 2 * self.canvas_padding as u64 >= min_side {
            return Err(Error::InvalidArgument {
                arg: "canvas_padding",
                value: format!(
                    "{} (leaves no room on a {}x{} canvas)",
                    self.canvas_padding, self.target_width, self.target_height
                ),
            });
        }
        Ok(())
    }

    /// Drawable area of the canvas once `canvas_padding` is taken off each side.
    pub fn available_area(&self) -> (u32, u32) {
        (
            self.target_width.saturating_sub(self.canvas_padding.saturating_mul(2)),
            self.target_height.saturating_sub(self.canvas_padding.saturating_mul(2)),
        )
    }
}
