//! End-to-end rendering: projected grid, composited layer, overlays,
//! legend and PNG output.

use std::sync::Arc;

use image::GenericImageView;
use projection::{compute_geodetic_field, SpatialIndex};
use renderer::{
    composite, encode_pixmap, encode_png_auto, project_features, stroke_polylines, Color, Legend,
    LegendPosition, OverlayStyle, PaletteName,
};
use test_utils::{
    create_disk_grid, create_layer, create_temperature_grid, sector_descriptor,
    square_feature_collection, GOES_EAST_LON,
};
use tiny_skia::Transform;

#[test]
fn test_composited_png_decodes_to_same_pixels() {
    let layer = create_layer("CMI", "K", 64, 48, create_disk_grid(64, 48));
    let result = composite(&layer, PaletteName::Viridis);
    let png = encode_png_auto(&result.image.pixels, 64, 48).unwrap();

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));
    let rgba = decoded.to_rgba8();
    assert_eq!(rgba.as_raw(), &result.image.pixels);

    // Corners are off the disk.
    assert_eq!(rgba.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn test_many_color_png_uses_rgba() {
    let layer = create_layer("CMI", "K", 200, 200, create_temperature_grid(200, 200));
    let result = composite(&layer, PaletteName::Jet);
    let png = encode_png_auto(&result.image.pixels, 200, 200).unwrap();
    // IHDR color type
    assert_eq!(png[25], 6);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), &result.image.pixels);
}

#[test]
fn test_overlay_on_projected_sector() {
    let desc = sector_descriptor(300, 300, GOES_EAST_LON);
    let field = Arc::new(compute_geodetic_field(&desc));
    let index = SpatialIndex::build(Arc::clone(&field)).unwrap();

    // A square around nadir, well inside the sector.
    let features = square_feature_collection(0.0, GOES_EAST_LON, 1.0);
    let polylines = project_features(&features, &index);
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].len(), 5);

    let mut pixmap = tiny_skia::Pixmap::new(300, 300).unwrap();
    let style = OverlayStyle::coastline(Color::new(0, 255, 255, 255), 3.0);
    stroke_polylines(&mut pixmap, &polylines, style.color, style.width, Transform::identity());

    let (x, y) = polylines[0][0];
    let vertex = pixmap.pixel(x as u32, y as u32).unwrap();
    assert!(vertex.alpha() > 0);
    // The sector center sits inside the square, not on its outline.
    assert_eq!(pixmap.pixel(150, 150).unwrap().alpha(), 0);
}

#[test]
fn test_overlay_outside_field_is_skipped() {
    let desc = sector_descriptor(100, 100, GOES_EAST_LON);
    let field = Arc::new(compute_geodetic_field(&desc));
    let index = SpatialIndex::build(field).unwrap();

    // Far outside the sector's lat/lon extent.
    let features = square_feature_collection(45.0, 10.0, 2.0);
    assert!(project_features(&features, &index).is_empty());
}

#[test]
fn test_legend_png_roundtrip() {
    let layer = create_layer("CMI", "K", 2, 1, vec![200.0, 300.0]);
    let domain = layer.effective_domain();
    let legend = Legend::new(&layer, domain, PaletteName::Grayscale, LegendPosition::BottomRight).unwrap();

    let mut pixmap = tiny_skia::Pixmap::new(400, 200).unwrap();
    legend.draw(&mut pixmap, 1.0);
    let png = encode_pixmap(&pixmap).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (400, 200));
    // Panel corner demultiplies back to translucent black.
    assert_eq!(decoded.get_pixel(175, 135).0, [0, 0, 0, 153]);
    assert_eq!(decoded.get_pixel(10, 10).0, [0, 0, 0, 0]);
}
