use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Decode any supported image file into an 8-bit RGBA buffer. Sources
/// without alpha come back fully opaque.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input image not found: {}", path.display()),
        )));
    }
    info!("Loading {:?}", path);
    let rgba = image::open(path)?.to_rgba8();
    debug!("Decoded {}x{}", rgba.width(), rgba.height());
    Ok(rgba)
}
