//! Coordinate helper: the sheet with its grid lines and resolved cell
//! rectangles drawn on top, for hand-curating layout files.
use image::{Rgba, RgbaImage};

use crate::types::{GridSpec, Rect};

pub const GRID_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const CELL_COLOR: Rgba<u8> = Rgba([0, 160, 255, 255]);
pub const LINE_WIDTH: u32 = 2;

fn fill(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let rect = Rect::new(
        rect.left,
        rect.top,
        rect.right.min(img.width()),
        rect.bottom.min(img.height()),
    );
    for y in rect.top..rect.bottom {
        for x in rect.left..rect.right {
            img.put_pixel(x, y, color);
        }
    }
}

/// Start of a `LINE_WIDTH` line at `pos`, pulled in so the last line stays
/// inside an image of size `extent`.
fn line_start(pos: u32, extent: u32) -> u32 {
    pos.min(extent.saturating_sub(LINE_WIDTH))
}

fn outline(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let (l, t, r, b) = (rect.left, rect.top, rect.right, rect.bottom);
    let lw = LINE_WIDTH;
    fill(img, Rect::new(l, t, r, t.saturating_add(lw).min(b)), color);
    fill(img, Rect::new(l, b.saturating_sub(lw).max(t), r, b), color);
    fill(img, Rect::new(l, t, l.saturating_add(lw).min(r), b), color);
    fill(img, Rect::new(r.saturating_sub(lw).max(l), t, r, b), color);
}

/// Copy of `sheet` with the grid (split the same way grid cells are
/// resolved) in `GRID_COLOR` and each rectangle in `cells` outlined in
/// `CELL_COLOR`.
pub fn draw_layout_overlay(sheet: &RgbaImage, grid: Option<GridSpec>, cells: &[Rect]) -> RgbaImage {
    let mut overlay = sheet.clone();
    let (w, h) = overlay.dimensions();

    if let Some(grid) = grid.filter(|g| g.rows > 0 && g.cols > 0) {
        let (cell_w, cell_h) = (w / grid.cols, h / grid.rows);
        for col in 0..=grid.cols {
            let x = line_start(col * cell_w, w);
            fill(&mut overlay, Rect::new(x, 0, x + LINE_WIDTH, h), GRID_COLOR);
        }
        for row in 0..=grid.rows {
            let y = line_start(row * cell_h, h);
            fill(&mut overlay, Rect::new(0, y, w, y + LINE_WIDTH), GRID_COLOR);
        }
    }

    for rect in cells {
        outline(&mut overlay, *rect, CELL_COLOR);
    }
    overlay
}
