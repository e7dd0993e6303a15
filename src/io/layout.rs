//! Contact-sheet layout files: which cells to cut, where they are, and the
//! extraction parameters to use for the sheet.
use std::collections::HashSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::params::ExtractParams;
use crate::error::{Error, Result};
use crate::types::{CellRegion, CellSpec, GridSpec, Rect};

/// Layout of one contact sheet, usually loaded from JSON:
///
/// ```json
/// {
///   "grid": { "rows": 5, "cols": 3 },
///   "params": { "tolerance": 12, "target_width": 400, "target_height": 140 },
///   "skip": ["corne-alt"],
///   "cells": [
///     { "id": "ansi-100", "grid": { "row": 0, "col": 0 },
///       "margins": { "top": 15, "right": 15, "bottom": 10, "left": 15 } },
///     { "id": "hhkb", "rect": { "left": 820, "top": 122, "right": 1077, "bottom": 201 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetLayout {
    #[serde(default)]
    pub grid: Option<GridSpec>,
    #[serde(default)]
    pub params: ExtractParams,
    #[serde(default)]
    pub skip: Vec<String>,
    pub cells: Vec<CellSpec>,
}

fn is_plain_file_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.contains(['/', '\\'])
}

impl SheetLayout {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let layout = Self::from_json_str(&text)?;
        debug!("Loaded layout {:?}: {} cells", path, layout.cells.len());
        Ok(layout)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let layout: SheetLayout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reject empty, duplicate or path-like identifiers and zero-sized grids.
    /// Identifiers become `<id>.png` inside the output directory, so each one
    /// must be a single plain file name.
    pub fn validate(&self) -> Result<()> {
        if let Some(grid) = self.grid {
            if grid.rows == 0 || grid.cols == 0 {
                return Err(Error::InvalidArgument {
                    arg: "grid",
                    value: format!("{}x{}", grid.rows, grid.cols),
                });
            }
        }
        let mut seen = HashSet::new();
        for cell in &self.cells {
            if cell.id.trim().is_empty() {
                return Err(Error::config("", "cell identifier is empty"));
            }
            if !is_plain_file_name(&cell.id) {
                return Err(Error::config(&cell.id, "cell identifier must be a plain file name"));
            }
            if !seen.insert(cell.id.as_str()) {
                return Err(Error::config(&cell.id, "duplicate cell identifier"));
            }
        }
        Ok(())
    }

    pub fn is_skipped(&self, id: &str) -> bool {
        self.skip.iter().any(|s| s == id)
    }

    /// Resolve a cell to the pixel rectangle cut from a `sheet_width` x
    /// `sheet_height` sheet, margins applied.
    ///
    /// Grid cells are `sheet / count` pixels (floored) on each axis. The
    /// result must be non-empty and lie inside the sheet, otherwise the cell
    /// is reported as a configuration error.
    pub fn resolve_cell_rect(&self, cell: &CellSpec, sheet_width: u32, sheet_height: u32) -> Result<Rect> {
        let raw = match cell.region {
            CellRegion::Rect(rect) => rect,
            CellRegion::Grid { row, col } => {
                let grid = self
                    .grid
                    .ok_or_else(|| Error::config(&cell.id, "grid cell used but the layout has no grid"))?;
                if row >= grid.rows || col >= grid.cols {
                    return Err(Error::config(
                        &cell.id,
                        format!(
                            "grid cell ({}, {}) outside a {}x{} grid",
                            row, col, grid.rows, grid.cols
                        ),
                    ));
                }
                let cell_w = sheet_width / grid.cols;
                let cell_h = sheet_height / grid.rows;
                Rect::new(col * cell_w, row * cell_h, (col + 1) * cell_w, (row + 1) * cell_h)
            }
        };

        if !raw.fits_within(sheet_width, sheet_height) {
            return Err(Error::config(
                &cell.id,
                format!(
                    "rectangle {} outside the {}x{} sheet",
                    raw, sheet_width, sheet_height
                ),
            ));
        }

        raw.shrink(&cell.margins).ok_or_else(|| {
            Error::config(
                &cell.id,
                format!("rectangle {} is empty after margins {:?}", raw, cell.margins),
            )
        })
    }
}
