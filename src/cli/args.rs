use clap::Parser;
use std::path::PathBuf;

use spritecut::{BackgroundSource, ExtractMode};

#[derive(Parser, Debug)]
#[command(
    name = "spritecut",
    version,
    about = "Cut keyboard sprites out of contact sheets onto transparent canvases"
)]
pub struct CliArgs {
    /// Input image: a contact sheet (with --layout) or a single cell
    #[arg(short, long)]
    pub input: PathBuf,

    /// Sheet layout JSON describing the cells to cut (sheet mode)
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Output PNG (single image and refit modes)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for sprites and manifest.json (sheet mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the sheet with grid lines and cell outlines to this PNG instead
    /// of extracting (coordinate helper for editing the layout)
    #[arg(long, requires = "layout")]
    pub grid_overlay: Option<PathBuf>,

    /// Only fit an already extracted sprite onto the canvas
    #[arg(long, default_value_t = false, conflicts_with = "layout")]
    pub refit: bool,

    /// Max RGB distance from the background still removed (inclusive)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Padding kept around the content after segmentation
    #[arg(long)]
    pub crop_padding: Option<u32>,

    /// Free margin on every side of the output canvas
    #[arg(long)]
    pub canvas_padding: Option<u32>,

    /// Output canvas width
    #[arg(long)]
    pub width: Option<u32>,

    /// Output canvas height
    #[arg(long)]
    pub height: Option<u32>,

    /// Where the background color is sampled (cell or sheet)
    #[arg(long, value_enum)]
    pub background: Option<BackgroundSource>,

    /// Extraction mode (transparent or slice)
    #[arg(long, value_enum)]
    pub mode: Option<ExtractMode>,

    /// Slice mode: luminance below this counts as content
    #[arg(long)]
    pub slice_threshold: Option<u8>,

    /// Slice mode: padding around the content box
    #[arg(long)]
    pub slice_padding: Option<u32>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue with the other cells when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
