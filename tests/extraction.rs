use std::path::Path;

use image::{Rgba, RgbaImage};
use spritecut::core::processing::canvas::fit_to_canvas;
use spritecut::core::processing::segment::flood_fill_background;
use spritecut::io::writers::png::write_rgba_png;
use spritecut::{
    CellRegion, CellSpec, Color, ExtractMode, ExtractParams, GridSpec, Manifest, Margins,
    Placement, Rect, SheetLayout, extract_sheet_to_dir, process_single_image_to_path,
    refit_image_to_path, remove_background, write_layout_overlay,
};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn fill(img: &mut RgbaImage, rect: Rect, px: Rgba<u8>) {
    for y in rect.top..rect.bottom {
        for x in rect.left..rect.right {
            img.put_pixel(x, y, px);
        }
    }
}

fn square_on_white() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(100, 100, WHITE);
    fill(&mut img, Rect::new(30, 30, 70, 70), BLACK);
    img
}

#[test]
fn black_square_end_to_end() {
    let img = square_on_white();

    let seg = flood_fill_background(&img, Color::WHITE, 10.0);
    assert_eq!(seg.mask.opaque_count(), 40 * 40);
    assert_eq!(seg.bounds, Some(Rect::new(30, 30, 70, 70)));
    for y in 0..100 {
        for x in 0..100 {
            let inside = (30..70).contains(&x) && (30..70).contains(&y);
            assert_eq!(seg.mask.is_opaque(x, y), inside, "pixel ({x}, {y})");
        }
    }

    let cropped = remove_background(img, Color::WHITE, 10.0, 2);
    assert_eq!(cropped.dimensions(), (44, 44));
    assert_eq!(cropped.get_pixel(0, 0)[3], 0);
    assert_eq!(cropped.get_pixel(22, 22), &BLACK);

    let fitted = fit_to_canvas(&cropped, 200, 200, 10).unwrap();
    assert_eq!(fitted.image.dimensions(), (200, 200));
    assert_eq!(
        fitted.placement,
        Placement {
            x: 10,
            y: 10,
            width: 180,
            height: 180
        }
    );
}

#[test]
fn enclosed_background_hole_stays_opaque() {
    let mut img = RgbaImage::from_pixel(60, 60, WHITE);
    fill(&mut img, Rect::new(10, 10, 50, 50), BLACK);
    fill(&mut img, Rect::new(20, 20, 40, 40), WHITE);

    let seg = flood_fill_background(&img, Color::WHITE, 10.0);
    assert!(seg.mask.is_opaque(30, 30));
    assert!(!seg.mask.is_opaque(5, 5));
    assert_eq!(seg.mask.opaque_count(), 40 * 40);
}

#[test]
fn tolerance_decides_near_white_pixel() {
    // distance((250,250,250), white) = sqrt(75) ~ 8.66
    let mut img = RgbaImage::from_pixel(20, 20, WHITE);
    img.put_pixel(10, 10, Rgba([250, 250, 250, 255]));

    let strict = flood_fill_background(&img, Color::WHITE, 5.0);
    assert!(strict.mask.is_opaque(10, 10));
    assert_eq!(strict.bounds, Some(Rect::new(10, 10, 11, 11)));

    let loose = flood_fill_background(&img, Color::WHITE, 10.0);
    assert!(!loose.mask.is_opaque(10, 10));
    assert_eq!(loose.bounds, None);

    // sqrt(75) sits between these two tolerances
    assert!(flood_fill_background(&img, Color::WHITE, 8.66).mask.is_opaque(10, 10));
    assert!(!flood_fill_background(&img, Color::WHITE, 8.67).mask.is_opaque(10, 10));
}

/// 3x2 grid of 200x150 cells on a light gray backdrop.
fn contact_sheet() -> RgbaImage {
    let mut sheet = RgbaImage::from_pixel(600, 300, Rgba([245, 245, 245, 255]));
    fill(&mut sheet, Rect::new(30, 50, 170, 100), Rgba([40, 40, 60, 255]));
    fill(&mut sheet, Rect::new(260, 40, 340, 110), Rgba([200, 30, 30, 255]));
    fill(&mut sheet, Rect::new(420, 60, 580, 90), Rgba([30, 30, 30, 255]));
    fill(&mut sheet, Rect::new(50, 200, 150, 260), Rgba([10, 120, 10, 255]));
    sheet
}

fn sheet_layout() -> SheetLayout {
    SheetLayout {
        grid: Some(GridSpec { rows: 2, cols: 3 }),
        skip: vec!["spare".into()],
        cells: vec![
            CellSpec::new("ansi-100", CellRegion::Grid { row: 0, col: 0 })
                .with_margins(Margins::uniform(10)),
            CellSpec::new("ansi-60", CellRegion::Grid { row: 0, col: 1 }),
            CellSpec::new("hhkb", CellRegion::Rect(Rect::new(400, 0, 600, 150))),
            CellSpec::new("split", CellRegion::Grid { row: 1, col: 0 }),
            CellSpec::new("spare", CellRegion::Grid { row: 1, col: 1 }),
            CellSpec::new("off-sheet", CellRegion::Rect(Rect::new(500, 200, 700, 320))),
        ],
        ..Default::default()
    }
}

#[test]
fn sheet_is_written_with_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet.png");
    write_rgba_png(&sheet_path, &contact_sheet()).unwrap();
    let out_dir = dir.path().join("sprites");

    let report = extract_sheet_to_dir(
        &sheet_path,
        &sheet_layout(),
        &out_dir,
        &ExtractParams::default(),
        false,
    )
    .unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.sprites.len(), 4);

    for id in ["ansi-100", "ansi-60", "hhkb", "split"] {
        let sprite = image::open(out_dir.join(format!("{id}.png"))).unwrap().to_rgba8();
        assert_eq!(sprite.dimensions(), (400, 140), "{id}");
        assert_eq!(sprite.get_pixel(0, 0)[3], 0, "{id} corner should be transparent");
    }
    assert!(!out_dir.join("spare.png").exists());
    assert!(!out_dir.join("off-sheet.png").exists());

    let manifest: Manifest =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest.sprites.len(), 4);
    assert_eq!(manifest.skipped, vec!["spare".to_string()]);
    assert_eq!(manifest.errors.len(), 1);
    assert_eq!(manifest.errors[0].0, "off-sheet");

    let hhkb = manifest.sprites.iter().find(|s| s.id == "hhkb").unwrap();
    assert_eq!(hhkb.cell_rect, Rect::new(400, 0, 600, 150));
    assert_eq!(hhkb.background, Some(Color::new(245, 245, 245)));
    // 160x30 content + 2 px padding -> 164x34, width-limited to 388
    assert_eq!((hhkb.cropped_width, hhkb.cropped_height), (164, 34));
    assert_eq!(hhkb.placement.map(|p| p.width), Some(388));
}

#[test]
fn slice_mode_keeps_opaque_backdrop() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cell.png");
    write_rgba_png(&input, &square_on_white()).unwrap();
    let output = dir.path().join("cell_sliced.png");

    let params = ExtractParams {
        mode: ExtractMode::Slice,
        ..Default::default()
    };
    let sprite = process_single_image_to_path(&input, &output, &params).unwrap();
    assert_eq!(sprite.id, "cell");
    assert!(sprite.placement.is_none());

    let written = image::open(&output).unwrap().to_rgba8();
    // 40x40 content plus 10 px padding on every side
    assert_eq!(written.dimensions(), (60, 60));
    assert_eq!(written.get_pixel(0, 0), &WHITE);
}

#[test]
fn refit_resizes_only_when_needed() {
    let dir = tempfile::tempdir().unwrap();
    let params = ExtractParams::default();

    let odd = dir.path().join("macbook-us.png");
    write_rgba_png(&odd, &RgbaImage::from_pixel(500, 300, BLACK)).unwrap();
    let refitted = dir.path().join("macbook-us-fixed.png");
    assert!(refit_image_to_path(&odd, &refitted, &params).unwrap());
    assert_eq!(image::image_dimensions(&refitted).unwrap(), (400, 140));

    let before = std::fs::read(&refitted).unwrap();
    assert!(!refit_image_to_path(&refitted, &refitted, &params).unwrap());
    assert_eq!(std::fs::read(&refitted).unwrap(), before);
}

#[test]
fn missing_sheet_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_sheet_to_dir(
        Path::new("/definitely/not/here.png"),
        &sheet_layout(),
        dir.path(),
        &ExtractParams::default(),
        true,
    );
    assert!(matches!(result, Err(spritecut::Error::Io(_))));
}

#[test]
fn path_like_cell_id_never_leaves_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet.png");
    write_rgba_png(&sheet_path, &contact_sheet()).unwrap();
    let out_dir = dir.path().join("sprites");

    let layout = SheetLayout {
        cells: vec![CellSpec::new("../escaped", CellRegion::Rect(Rect::new(0, 0, 200, 150)))],
        ..Default::default()
    };
    let result = extract_sheet_to_dir(&sheet_path, &layout, &out_dir, &ExtractParams::default(), true);

    assert!(matches!(result, Err(spritecut::Error::Config { .. })));
    assert!(!dir.path().join("escaped.png").exists());
}

#[test]
fn layout_overlay_outlines_resolvable_cells() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet.png");
    write_rgba_png(&sheet_path, &contact_sheet()).unwrap();
    let overlay_path = dir.path().join("helper.png");

    // "off-sheet" does not resolve and is left out
    let drawn = write_layout_overlay(&sheet_path, &sheet_layout(), &overlay_path).unwrap();
    assert_eq!(drawn, 5);

    let overlay = image::open(&overlay_path).unwrap().to_rgba8();
    assert_eq!(overlay.dimensions(), (600, 300));
    // grid row boundary at y = 150, below hhkb's outline
    assert_eq!(overlay.get_pixel(450, 151), &Rgba([255, 0, 0, 255]));
    // inner edge of ansi-100 after its 10 px margins
    assert_eq!(overlay.get_pixel(10, 75), &Rgba([0, 160, 255, 255]));
}
