use std::collections::VecDeque;

use image::RgbaImage;
use ndarray::Array2;
use tracing::debug;

use crate::types::{Color, Rect};

pub const OPAQUE: u8 = 255;
pub const TRANSPARENT: u8 = 0;

/// Per-pixel opaque/transparent classification, stored apart from color data
/// until compositing. Indexed `[(row, col)]`, same dimensions as the buffer
/// it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityMask {
    data: Array2<u8>,
}

impl OpacityMask {
    /// A mask with every pixel opaque.
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            data: Array2::from_elem((height as usize, width as usize), OPAQUE),
        }
    }

    pub fn width(&self) -> u32 {
        self.data.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.data.nrows() as u32
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.data[(y as usize, x as usize)] == OPAQUE
    }

    #[inline]
    pub fn set_transparent(&mut self, x: u32, y: u32) {
        self.data[(y as usize, x as usize)] = TRANSPARENT;
    }

    pub fn opaque_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == OPAQUE).count()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.data
    }
}

/// Output of the flood fill: the mask plus the tight bounds of its opaque
/// pixels (`None` when everything was removed).
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub mask: OpacityMask,
    pub bounds: Option<Rect>,
}

const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
fn enqueue(idx: usize, visited: &mut [bool], queue: &mut VecDeque<usize>) {
    if !visited[idx] {
        visited[idx] = true;
        queue.push_back(idx);
    }
}

/// Classify every pixel as background or foreground by breadth-first flood
/// fill seeded from all border pixels.
///
/// A visited pixel within `tolerance` (inclusive, Euclidean RGB distance, alpha
/// ignored) of `background` becomes transparent and spreads to its eight
/// neighbours. A pixel beyond tolerance stays opaque and stops the fill, so
/// background-colored pixels enclosed by foreground are never reached and
/// stay opaque.
///
/// The fill also tracks the bounding box of the opaque pixels it stops at.
/// Every unreached pixel is enclosed by such stop pixels, so this box is the
/// box of the whole opaque mask and no second scan is needed.
///
/// A border with no background on it degrades to an all-opaque mask.
pub fn flood_fill_background(img: &RgbaImage, background: Color, tolerance: f64) -> Segmentation {
    let (w, h) = img.dimensions();
    let mut mask = OpacityMask::opaque(w, h);
    if w == 0 || h == 0 {
        return Segmentation { mask, bounds: None };
    }

    let tol_sq = tolerance * tolerance;
    let width = w as usize;
    let mut visited = vec![false; width * h as usize];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(2 * (width + h as usize));

    for x in 0..width {
        enqueue(x, &mut visited, &mut queue);
        enqueue((h as usize - 1) * width + x, &mut visited, &mut queue);
    }
    for y in 0..h as usize {
        enqueue(y * width, &mut visited, &mut queue);
        enqueue(y * width + width - 1, &mut visited, &mut queue);
    }

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut removed = 0usize;

    while let Some(idx) = queue.pop_front() {
        let x = (idx % width) as u32;
        let y = (idx / width) as u32;

        if (background.distance_sq(img.get_pixel(x, y)) as f64) <= tol_sq {
            mask.set_transparent(x, y);
            removed += 1;
            for (dx, dy) in NEIGHBORS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                enqueue(ny as usize * width + nx as usize, &mut visited, &mut queue);
            }
        } else {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    let bounds = if min_x == u32::MAX {
        None
    } else {
        Some(Rect::new(min_x, min_y, max_x + 1, max_y + 1))
    };

    debug!(
        "Flood fill: removed {} of {} pixels (tolerance={:.1}, background={})",
        removed,
        width * h as usize,
        tolerance,
        background
    );

    Segmentation { mask, bounds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn fill_rect(img: &mut RgbaImage, r: Rect, px: Rgba<u8>) {
        for y in r.top..r.bottom {
            for x in r.left..r.right {
                img.put_pixel(x, y, px);
            }
        }
    }

    #[test]
    fn removes_surrounding_background_only() {
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        fill_rect(&mut img, Rect::new(30, 30, 70, 70), BLACK);

        let seg = flood_fill_background(&img, Color::WHITE, 10.0);

        assert_eq!(seg.mask.opaque_count(), 40 * 40);
        assert!(seg.mask.is_opaque(30, 30));
        assert!(seg.mask.is_opaque(69, 69));
        assert!(!seg.mask.is_opaque(29, 30));
        assert!(!seg.mask.is_opaque(70, 70));
        assert_eq!(seg.bounds, Some(Rect::new(30, 30, 70, 70)));
    }

    #[test]
    fn enclosed_background_hole_is_kept() {
        let mut img = RgbaImage::from_pixel(50, 50, WHITE);
        fill_rect(&mut img, Rect::new(10, 10, 40, 40), BLACK);
        fill_rect(&mut img, Rect::new(20, 20, 30, 30), WHITE);

        let seg = flood_fill_background(&img, Color::WHITE, 10.0);

        // the hole is background-colored but unreachable from the border
        assert!(seg.mask.is_opaque(25, 25));
        assert_eq!(seg.mask.opaque_count(), 30 * 30);
        assert_eq!(seg.bounds, Some(Rect::new(10, 10, 40, 40)));
    }

    #[test]
    fn diagonal_gap_is_crossed() {
        // Background pocket touching the outside only through a diagonal step.
        let mut img = RgbaImage::from_pixel(5, 5, BLACK);
        img.put_pixel(0, 0, WHITE);
        img.put_pixel(1, 1, WHITE);
        img.put_pixel(2, 2, WHITE);

        let seg = flood_fill_background(&img, Color::WHITE, 0.0);
        assert!(!seg.mask.is_opaque(2, 2));
        assert_eq!(seg.mask.opaque_count(), 25 - 3);
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        img.put_pixel(0, 10, Rgba([255, 255, 250, 255]));

        let at = flood_fill_background(&img, Color::WHITE, 5.0);
        assert!(!at.mask.is_opaque(0, 10));

        let below = flood_fill_background(&img, Color::WHITE, 4.99);
        assert!(below.mask.is_opaque(0, 10));
    }

    #[test]
    fn near_white_pixel_depends_on_tolerance() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        img.put_pixel(10, 10, Rgba([250, 250, 250, 255]));

        let strict = flood_fill_background(&img, Color::WHITE, 5.0);
        assert!(strict.mask.is_opaque(10, 10));
        assert_eq!(strict.mask.opaque_count(), 1);
        assert_eq!(strict.bounds, Some(Rect::new(10, 10, 11, 11)));

        let loose = flood_fill_background(&img, Color::WHITE, 10.0);
        assert!(!loose.mask.is_opaque(10, 10));
        assert_eq!(loose.mask.opaque_count(), 0);
        assert_eq!(loose.bounds, None);
    }

    #[test]
    fn opaque_border_keeps_everything() {
        let mut img = RgbaImage::from_pixel(12, 12, WHITE);
        fill_rect(&mut img, Rect::new(0, 0, 12, 1), BLACK);
        fill_rect(&mut img, Rect::new(0, 11, 12, 12), BLACK);
        fill_rect(&mut img, Rect::new(0, 0, 1, 12), BLACK);
        fill_rect(&mut img, Rect::new(11, 0, 12, 12), BLACK);

        let seg = flood_fill_background(&img, Color::WHITE, 30.0);
        assert_eq!(seg.mask.opaque_count(), 144);
        assert_eq!(seg.bounds, Some(Rect::full(12, 12)));
    }

    #[test]
    fn alpha_is_ignored_for_distance() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 0]));
        let seg = flood_fill_background(&img, Color::WHITE, 0.0);
        assert_eq!(seg.mask.opaque_count(), 0);
    }

    #[test]
    fn single_pixel_region() {
        let img = RgbaImage::from_pixel(1, 1, BLACK);
        let seg = flood_fill_background(&img, Color::WHITE, 10.0);
        assert!(seg.mask.is_opaque(0, 0));
        assert_eq!(seg.bounds, Some(Rect::full(1, 1)));
    }
}
