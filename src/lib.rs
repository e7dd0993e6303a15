#![doc = r#"
spritecut — cut keyboard sprites out of contact sheets.

Takes rendered product images laid out on a flat, light backdrop and turns each
cell into a standard sprite: the backdrop is removed by a flood fill seeded from
the cell border (8-connected, Euclidean RGB tolerance), the remaining content is
cropped tight, then scaled with preserved aspect ratio and centered on a fixed
transparent canvas (400x140 by default). It powers the `spritecut` CLI and can
be embedded in your own Rust applications.

Backgrounds touching the border are removed; regions of background color fully
enclosed by the object (holes, gaps between keys) stay opaque. Gradient or
textured backdrops are not handled: the reference color comes from the four
inset corners of the cell (or of the whole sheet).

Add dependency
--------------
```toml
[dependencies]
spritecut = "0.1"
```

Quick start: one image to one sprite
------------------------------------
```rust,no_run
use std::path::Path;
use spritecut::{process_single_image_to_path, ExtractParams};

fn main() -> spritecut::Result<()> {
    let params = ExtractParams {
        tolerance: 12.0,
        target_width: 400,
        target_height: 140,
        ..Default::default()
    };
    let sprite = process_single_image_to_path(
        Path::new("keyboard.png"),
        Path::new("out/keyboard.png"),
        &params,
    )?;
    println!("placed at {:?}", sprite.placement);
    Ok(())
}
```

Contact sheet with a layout file
--------------------------------
```rust,no_run
use std::path::Path;
use spritecut::{extract_sheet_to_dir, SheetLayout};

fn main() -> spritecut::Result<()> {
    let layout = SheetLayout::from_path(Path::new("sheet.layout.json"))?;
    let report = extract_sheet_to_dir(
        Path::new("sheet.png"),
        &layout,
        Path::new("sprites"),
        &layout.params,
        true, // continue_on_error
    )?;
    println!(
        "processed={}, skipped={}, errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(())
}
```

In-memory pipeline
------------------
```rust,no_run
use image::RgbaImage;
use spritecut::{process_image, ExtractParams};

fn main() -> spritecut::Result<()> {
    let cell: RgbaImage = image::open("cell.png")?.to_rgba8();
    let sprite = process_image("cell", cell, &ExtractParams::default())?;
    assert_eq!(sprite.image.dimensions(), (400, 140));
    Ok(())
}
```

Error handling
--------------
All fallible APIs return `spritecut::Result<T>`; match on `spritecut::Error`
for details. Invalid cell geometry surfaces as `Error::Config` and is skipped
by the sheet driver.

```rust,no_run
use std::path::Path;
use spritecut::{refit_image_to_path, Error, ExtractParams};

fn main() {
    match refit_image_to_path(Path::new("old.png"), Path::new("new.png"), &ExtractParams::default()) {
        Ok(true) => println!("refitted"),
        Ok(false) => println!("already at target size"),
        Err(Error::Image(e)) => eprintln!("decode error: {e}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points for cells, sheets and refits.
- [`core`](crate::core) — parameters and the individual pipeline stages.
- [`types`] — colors, rectangles, margins, cell specs and mode enums.
- [`io`] — image loading, layout files, PNG and manifest writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::ExtractParams;
pub use error::{Error, Result};
pub use types::{
    BackgroundSource, CellRegion, CellSpec, Color, ExtractMode, GridSpec, Margins, Placement, Rect,
};

// Layout and writers
pub use io::layout::SheetLayout;
pub use io::loader::load_rgba;
pub use io::writers::manifest::{Manifest, ManifestEntry};

// Pipeline stages
pub use crate::core::processing::pipeline::{CanonicalSprite, canonicalize_region, remove_background};

// High-level API re-exports
pub use api::{
    BatchReport, CellOutcome, ExtractedSprite, extract_cell, extract_sheet, extract_sheet_to_dir,
    process_image, process_single_image_to_path, refit_image, refit_image_to_path,
    write_layout_overlay,
};
