use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::error::Result;

/// Write an RGBA buffer as an 8-bit RGBA PNG, creating parent directories
/// as needed. Alpha is preserved as-is.
pub fn write_rgba_png(output: &Path, img: &RgbaImage) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    debug!("Wrote {}x{} PNG to {:?}", img.width(), img.height(), output);
    Ok(())
}
