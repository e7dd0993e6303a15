//! High-level library API: cut sprites from contact sheets into buffers or
//! files, refit existing sprites, and batch helpers that report per-cell
//! outcomes. Prefer these entrypoints over the low-level processing modules.
use std::path::{Path, PathBuf};

use image::{RgbaImage, imageops};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::params::ExtractParams;
use crate::core::processing::background::sample_background;
use crate::core::processing::canvas::{FittedSprite, fit_to_canvas};
use crate::core::processing::overlay::draw_layout_overlay;
use crate::core::processing::pipeline::canonicalize_region;
use crate::error::{Error, Result};
use crate::io::layout::SheetLayout;
use crate::io::loader::load_rgba;
use crate::io::writers::manifest::{Manifest, ManifestEntry, write_manifest};
use crate::io::writers::png::write_rgba_png;
use crate::types::{BackgroundSource, CellSpec, Color, Placement, Rect};

/// Result of extracting one cell
#[derive(Debug, Clone)]
pub struct ExtractedSprite {
    pub id: String,
    pub image: RgbaImage,
    /// Cell rectangle on the source image after margins
    pub cell_rect: Rect,
    pub background: Option<Color>,
    pub cropped_size: (u32, u32),
    pub placement: Option<Placement>,
    /// Percent of canvas width/height covered by the sprite
    pub fill_ratio: Option<(f64, f64)>,
}

impl ExtractedSprite {
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            id: self.id.clone(),
            file: self.file_name(),
            cell_rect: self.cell_rect,
            background: self.background,
            cropped_width: self.cropped_size.0,
            cropped_height: self.cropped_size.1,
            placement: self.placement,
            fill_ratio: self.fill_ratio,
        }
    }
}

/// What happened to one cell of a sheet
#[derive(Debug)]
pub enum CellOutcome {
    Extracted(ExtractedSprite),
    Skipped(String),
    Failed { id: String, error: Error },
}

/// Batch processing report
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Paths of the PNG files written, in layout order
    pub sprites: Vec<PathBuf>,
}

fn sheet_background(sheet: &RgbaImage, params: &ExtractParams) -> Option<Color> {
    match params.background {
        BackgroundSource::Sheet => {
            let bg = sample_background(sheet);
            info!("Sheet background color: {}", bg);
            Some(bg)
        }
        BackgroundSource::Cell => None,
    }
}

fn canonicalize_to_sprite(
    id: &str,
    region: RgbaImage,
    cell_rect: Rect,
    background: Option<Color>,
    params: &ExtractParams,
) -> Result<ExtractedSprite> {
    let canonical = canonicalize_region(region, background, params)?;
    let fill_ratio = canonical
        .placement
        .map(|p| p.fill_ratio(params.target_width, params.target_height));
    Ok(ExtractedSprite {
        id: id.to_string(),
        image: canonical.image,
        cell_rect,
        background: canonical.background,
        cropped_size: canonical.cropped_size,
        placement: canonical.placement,
        fill_ratio,
    })
}

fn extract_cell_with_background(
    sheet: &RgbaImage,
    cell: &CellSpec,
    layout: &SheetLayout,
    params: &ExtractParams,
    background: Option<Color>,
) -> Result<ExtractedSprite> {
    let rect = layout.resolve_cell_rect(cell, sheet.width(), sheet.height())?;
    info!("Processing {} ({})", cell.id, rect);
    let region = imageops::crop_imm(sheet, rect.left, rect.top, rect.width(), rect.height()).to_image();
    canonicalize_to_sprite(&cell.id, region, rect, background, params)
}

/// Cut one cell out of `sheet` and run it through the pipeline.
pub fn extract_cell(
    sheet: &RgbaImage,
    cell: &CellSpec,
    layout: &SheetLayout,
    params: &ExtractParams,
) -> Result<ExtractedSprite> {
    params.validate()?;
    let background = sheet_background(sheet, params);
    extract_cell_with_background(sheet, cell, layout, params, background)
}

/// Extract every cell of `layout` from `sheet` in parallel. Outcomes are
/// returned in layout order; skipped and failed cells do not stop the others.
pub fn extract_sheet(
    sheet: &RgbaImage,
    layout: &SheetLayout,
    params: &ExtractParams,
) -> Result<Vec<CellOutcome>> {
    params.validate()?;
    let background = sheet_background(sheet, params);

    let outcomes = layout
        .cells
        .par_iter()
        .map(|cell| {
            if layout.is_skipped(&cell.id) {
                info!("Skipping {}", cell.id);
                return CellOutcome::Skipped(cell.id.clone());
            }
            match extract_cell_with_background(sheet, cell, layout, params, background) {
                Ok(sprite) => CellOutcome::Extracted(sprite),
                Err(error) => CellOutcome::Failed {
                    id: cell.id.clone(),
                    error,
                },
            }
        })
        .collect();
    Ok(outcomes)
}

/// Extract all cells of the sheet at `sheet_path` into `output_dir` as
/// `<id>.png`, then write `manifest.json` next to them.
///
/// The layout is validated first, so an identifier that is not a plain file
/// name fails the run before anything is written. Invalid cell geometry is
/// always logged, counted and skipped past. Any other failure is returned
/// immediately unless `continue_on_error` is set.
pub fn extract_sheet_to_dir(
    sheet_path: &Path,
    layout: &SheetLayout,
    output_dir: &Path,
    params: &ExtractParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    layout.validate()?;
    std::fs::create_dir_all(output_dir)?;
    let sheet = load_rgba(sheet_path)?;
    info!("Sheet size: {}x{}", sheet.width(), sheet.height());

    let mut report = BatchReport::default();
    let mut manifest = Manifest::new(sheet_path, params);

    for outcome in extract_sheet(&sheet, layout, params)? {
        match outcome {
            CellOutcome::Extracted(sprite) => {
                let path = output_dir.join(sprite.file_name());
                match write_rgba_png(&path, &sprite.image) {
                    Ok(()) => {
                        info!("Saved {:?}", path);
                        report.processed += 1;
                        report.sprites.push(path);
                        manifest.sprites.push(sprite.manifest_entry());
                    }
                    Err(e) => {
                        report.errors += 1;
                        if !continue_on_error {
                            return Err(e);
                        }
                        warn!("Error writing {:?}: {}", path, e);
                        manifest.errors.push((sprite.id, e.to_string()));
                    }
                }
            }
            CellOutcome::Skipped(id) => {
                report.skipped += 1;
                manifest.skipped.push(id);
            }
            CellOutcome::Failed { id, error } => {
                report.errors += 1;
                if !continue_on_error && !error.is_cell_error() {
                    return Err(error);
                }
                warn!("Error processing {}: {}", id, error);
                manifest.errors.push((id, error.to_string()));
            }
        }
    }

    write_manifest(output_dir, &manifest)?;
    info!(
        "Done: {} written, {} skipped, {} errors",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Draw the layout's grid and every resolvable cell rectangle over the sheet
/// at `sheet_path` and write the result to `output`. Cells whose geometry
/// does not resolve are logged and left out. Returns the number of cells
/// outlined.
pub fn write_layout_overlay(sheet_path: &Path, layout: &SheetLayout, output: &Path) -> Result<usize> {
    let sheet = load_rgba(sheet_path)?;
    let rects: Vec<Rect> = layout
        .cells
        .iter()
        .filter_map(|cell| match layout.resolve_cell_rect(cell, sheet.width(), sheet.height()) {
            Ok(rect) => Some(rect),
            Err(e) => {
                warn!("Not drawing {}: {}", cell.id, e);
                None
            }
        })
        .collect();

    let overlay = draw_layout_overlay(&sheet, layout.grid, &rects);
    write_rgba_png(output, &overlay)?;
    info!("Layout overlay saved to {:?} ({} cells)", output, rects.len());
    Ok(rects.len())
}

/// Run a whole image through the pipeline as a single cell (no margins).
pub fn process_image(id: &str, img: RgbaImage, params: &ExtractParams) -> Result<ExtractedSprite> {
    params.validate()?;
    let rect = Rect::full(img.width(), img.height());
    canonicalize_to_sprite(id, img, rect, None, params)
}

/// Load `input`, treat it as a single cell and write the sprite to `output`.
pub fn process_single_image_to_path(
    input: &Path,
    output: &Path,
    params: &ExtractParams,
) -> Result<ExtractedSprite> {
    let img = load_rgba(input)?;
    let id = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sprite = process_image(&id, img, params)?;
    write_rgba_png(output, &sprite.image)?;
    info!("Saved {:?}", output);
    Ok(sprite)
}

/// Fit an existing sprite onto the standard canvas without segmenting it.
pub fn refit_image(img: &RgbaImage, params: &ExtractParams) -> Result<FittedSprite> {
    params.validate()?;
    fit_to_canvas(img, params.target_width, params.target_height, params.canvas_padding)
}

/// Bring a previously extracted sprite at `input` to the standard canvas and
/// write it to `output`. Returns `false` when the image already has the
/// target size; its bytes are then copied unchanged (or left alone when
/// `input` and `output` are the same file).
pub fn refit_image_to_path(input: &Path, output: &Path, params: &ExtractParams) -> Result<bool> {
    params.validate()?;
    let img = load_rgba(input)?;
    if img.dimensions() == (params.target_width, params.target_height) {
        info!(
            "{:?} is already {}x{}, leaving it untouched",
            input, params.target_width, params.target_height
        );
        if input != output {
            std::fs::copy(input, output)?;
        }
        return Ok(false);
    }

    info!("Refitting {:?} ({}x{})", input, img.width(), img.height());
    let fitted = refit_image(&img, params)?;
    write_rgba_png(output, &fitted.image)?;
    info!("Saved {:?}", output);
    Ok(true)
}
