use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::ExtractParams;
use crate::error::Result;
use crate::types::{Color, Placement, Rect};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One written sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub file: String,
    /// Cell rectangle on the sheet after margins
    pub cell_rect: Rect,
    pub background: Option<Color>,
    pub cropped_width: u32,
    pub cropped_height: u32,
    pub placement: Option<Placement>,
    /// Percent of the canvas width and height covered by the sprite
    pub fill_ratio: Option<(f64, f64)>,
}

/// Summary of a sheet run, written next to the sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub params: ExtractParams,
    pub sprites: Vec<ManifestEntry>,
    pub skipped: Vec<String>,
    /// `(cell id, message)` for cells that failed
    pub errors: Vec<(String, String)>,
}

impl Manifest {
    pub fn new(source: &Path, params: &ExtractParams) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.to_path_buf(),
            params: params.clone(),
            sprites: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Write `manifest.json` into `output_dir` and return its path.
pub fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE_NAME);
    let json_string = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json_string)?;
    info!("Created manifest: {:?}", path);
    Ok(path)
}
