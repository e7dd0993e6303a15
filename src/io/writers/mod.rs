pub mod manifest;
pub mod png;

pub use manifest::{Manifest, ManifestEntry, write_manifest};
pub use png::write_rgba_png;
