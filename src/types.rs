//! Shared types used across spritecut.
//! Includes `Color`, `Rect`, `Margins`, the cell description (`CellSpec`,
//! `CellRegion`, `GridSpec`), the `Placement` of a fitted sprite, and the
//! `BackgroundSource` / `ExtractMode` switches.
use clap::ValueEnum;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color. Alpha is never part of a reference color.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_pixel(px: &Rgba<u8>) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Squared Euclidean distance in RGB space. The pixel's alpha is ignored.
    #[inline]
    pub fn distance_sq(&self, px: &Rgba<u8>) -> u32 {
        let dr = self.r as i32 - px[0] as i32;
        let dg = self.g as i32 - px[1] as i32;
        let db = self.b as i32 - px[2] as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn distance(&self, px: &Rgba<u8>) -> f64 {
        (self.distance_sq(px) as f64).sqrt()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Axis-aligned pixel rectangle. `right` and `bottom` are exclusive, so a
/// rect with `left == right` is empty.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rect covering a whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left <= self.right
            && self.top <= self.bottom
            && self.right <= width
            && self.bottom <= height
    }

    /// Move each edge inward by the given margins. Returns `None` when the
    /// margins consume the whole rect.
    pub fn shrink(&self, margins: &Margins) -> Option<Rect> {
        let left = self.left.checked_add(margins.left)?;
        let top = self.top.checked_add(margins.top)?;
        let right = self.right.checked_sub(margins.right)?;
        let bottom = self.bottom.checked_sub(margins.bottom)?;
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(left, top, right, bottom))
    }

    /// Grow each edge outward by `padding`, clamped to a `width` x `height` image.
    pub fn expand(&self, padding: u32, width: u32, height: u32) -> Rect {
        Rect::new(
            self.left.saturating_sub(padding),
            self.top.saturating_sub(padding),
            self.right.saturating_add(padding).min(width),
            self.bottom.saturating_add(padding).min(height),
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) to ({}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Inward crop applied to a cell before segmentation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub top: u32,
    #[serde(default)]
    pub right: u32,
    #[serde(default)]
    pub bottom: u32,
    #[serde(default)]
    pub left: u32,
}

impl Margins {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(m: u32) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Row/column count of an evenly divided contact sheet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

/// Where a cell lives on the sheet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRegion {
    /// A cell of the sheet's grid, resolved against `GridSpec`.
    Grid { row: u32, col: u32 },
    /// An explicit pixel rectangle.
    Rect(Rect),
}

/// One sprite to cut out of the sheet. Read-only once loaded.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CellSpec {
    pub id: String,
    #[serde(flatten)]
    pub region: CellRegion,
    #[serde(default)]
    pub margins: Margins,
}

impl CellSpec {
    pub fn new(id: impl Into<String>, region: CellRegion) -> Self {
        Self {
            id: id.into(),
            region,
            margins: Margins::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }
}

/// Where the resized sprite landed on the output canvas.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// Percent of the canvas width and height covered by the sprite.
    pub fn fill_ratio(&self, canvas_width: u32, canvas_height: u32) -> (f64, f64) {
        (
            self.width as f64 / canvas_width.max(1) as f64 * 100.0,
            self.height as f64 / canvas_height.max(1) as f64 * 100.0,
        )
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSource {
    /// Sample the corners of each cell.
    #[default]
    Cell,
    /// Sample the corners of the whole sheet once and reuse the color.
    Sheet,
}

impl std::fmt::Display for BackgroundSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackgroundSource::Cell => write!(f, "cell"),
            BackgroundSource::Sheet => write!(f, "sheet"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Flood-fill background removal, tight crop, fit onto the fixed canvas.
    #[default]
    Transparent,
    /// Luminance-threshold crop only; no transparency, no canvas.
    Slice,
}

impl std::fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractMode::Transparent => write!(f, "transparent"),
            ExtractMode::Slice => write!(f, "slice"),
        }
    }
}
