use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use spritecut::api::{
    extract_sheet_to_dir, process_single_image_to_path, refit_image_to_path, write_layout_overlay,
};
use spritecut::{ExtractParams, SheetLayout};

use super::args::CliArgs;
use super::errors::AppError;

/// Apply command-line overrides on top of `base` (layout or defaults).
fn merge_params(base: ExtractParams, args: &CliArgs) -> ExtractParams {
    ExtractParams {
        tolerance: args.tolerance.unwrap_or(base.tolerance),
        crop_padding: args.crop_padding.unwrap_or(base.crop_padding),
        canvas_padding: args.canvas_padding.unwrap_or(base.canvas_padding),
        target_width: args.width.unwrap_or(base.target_width),
        target_height: args.height.unwrap_or(base.target_height),
        background: args.background.unwrap_or(base.background),
        mode: args.mode.unwrap_or(base.mode),
        slice_threshold: args.slice_threshold.unwrap_or(base.slice_threshold),
        slice_padding: args.slice_padding.unwrap_or(base.slice_padding),
    }
}

fn require_output(output: Option<&PathBuf>) -> Result<&Path, AppError> {
    output.map(PathBuf::as_path).ok_or(AppError::MissingArgument {
        arg: "--output".to_string(),
    })
}

fn run_sheet(args: &CliArgs, layout_path: &Path) -> Result<(), AppError> {
    if let Some(overlay_path) = args.grid_overlay.as_deref() {
        let layout = SheetLayout::from_path(layout_path)?;
        let drawn = write_layout_overlay(&args.input, &layout, overlay_path)?;
        info!("Outlined {} of {} cells", drawn, layout.cells.len());
        return Ok(());
    }

    let output_dir = args.output_dir.as_ref().ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;
    let layout = SheetLayout::from_path(layout_path)?;
    let params = merge_params(layout.params.clone(), args);

    info!("Starting sheet extraction: {:?}", args.input);
    info!("Layout: {:?} ({} cells)", layout_path, layout.cells.len());
    info!("Output directory: {:?}", output_dir);

    let report = extract_sheet_to_dir(&args.input, &layout, output_dir, &params, args.batch)?;

    info!("Sheet extraction complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);

    if report.errors > 0 && !args.batch {
        return Err(AppError::CellsFailed {
            count: report.errors,
            total: layout.cells.len(),
        });
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if let Some(layout_path) = args.layout.as_deref() {
        run_sheet(&args, layout_path)?;
    } else if args.refit {
        let output = require_output(args.output.as_ref())?;
        let params = merge_params(ExtractParams::default(), &args);
        if refit_image_to_path(&args.input, output, &params)? {
            info!("Successfully refitted: {:?} -> {:?}", args.input, output);
        }
    } else {
        let output = require_output(args.output.as_ref())?;
        let params = merge_params(ExtractParams::default(), &args);
        let sprite = process_single_image_to_path(&args.input, output, &params)?;
        info!(
            "Successfully processed: {:?} -> {:?} ({}x{})",
            args.input,
            output,
            sprite.image.width(),
            sprite.image.height()
        );
    }

    Ok(())
}
