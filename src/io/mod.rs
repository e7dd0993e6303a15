//! I/O layer: decoding source images, reading sheet layouts, and `writers`
//! for PNG sprites and the JSON run manifest.
pub mod layout;
pub use layout::SheetLayout;

pub mod loader;
pub use loader::load_rgba;

pub mod writers;
