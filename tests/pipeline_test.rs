//! End-to-end: image on disk → palette → catalog names → rendered figure.

use image::{DynamicImage, RgbImage};
use image_to_css_palette::{
    BrowseOptions, Catalog, ExtractOptions, MatchOptions, PaletteError, Rgb, extract_palette,
    list_colors, load_image, match_closest, palette_strip, render,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn quadrants() -> RgbImage {
    RgbImage::from_fn(64, 64, |x, y| match (x < 32, y < 32) {
        (true, true) => image::Rgb([220, 20, 60]),
        (false, true) => image::Rgb([65, 105, 225]),
        (true, false) => image::Rgb([255, 215, 0]),
        (false, false) => image::Rgb([34, 139, 34]),
    })
}

fn write_png(dir: &TempDir, name: &str, img: RgbImage) -> std::path::PathBuf {
    let path = dir.path().join(name);
    DynamicImage::ImageRgb8(img).save(&path).unwrap();
    path
}

#[test]
fn test_image_palette_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "quadrants.png", quadrants());

    let img = load_image(&path).unwrap();
    let palette = extract_palette(&img, &ExtractOptions::default()).unwrap();
    let hex: Vec<String> = palette.iter().map(|c| c.to_hex()).collect();
    assert_eq!(hex, ["#228b22", "#4169e1", "#dc143c", "#ffd700"]);
}

#[test]
fn test_image_to_catalog_names_are_unique_and_allowed() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "quadrants.png", quadrants());

    let img = load_image(&path).unwrap();
    let palette = extract_palette(&img, &ExtractOptions::default()).unwrap();
    let matches = match_closest(&palette, Catalog::css4(), &MatchOptions::default());

    assert_eq!(matches.len(), palette.len());
    let queries: Vec<Rgb> = matches.iter().map(|m| m.query).collect();
    assert_eq!(queries, palette);
    for (i, m) in matches.iter().enumerate() {
        assert!(matches[i + 1..].iter().all(|other| other.name != m.name));
        assert!(!m.name.contains("gray") && !m.name.contains("white"));
    }
}

#[test]
fn test_visual_strip_and_figures_are_written() {
    let dir = TempDir::new().unwrap();
    let img = DynamicImage::ImageRgb8(quadrants());

    let opts = ExtractOptions { k: 4, strip_width: 301, ..Default::default() };
    let strip = palette_strip(&img, &opts).unwrap();
    assert_eq!(strip.dimensions(), (301, 50));

    let palette = extract_palette(&img, &opts).unwrap();
    let out = dir.path().join("nested").join("figure.png");
    render::save_png(&render::render_comparison(&img, &palette), &out).unwrap();
    let reread = image::open(&out).unwrap();
    assert_eq!(reread.height(), 400);

    let blues: Vec<Rgb> = list_colors(
        Catalog::css4(),
        &BrowseOptions { name_filter: Some("blue".into()), ..Default::default() },
    )
    .iter()
    .map(|e| e.rgb)
    .collect();
    let grid = dir.path().join("grid.png");
    render::save_png(&render::render_swatch_grid(&blues), &grid).unwrap();
    assert!(grid.exists());
}

#[test]
fn test_missing_image_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = load_image(dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, PaletteError::ImageLoad { .. }));
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn test_k_larger_than_pixel_count_is_rejected() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
    let err = extract_palette(&img, &ExtractOptions { k: 5, ..Default::default() }).unwrap_err();
    assert!(matches!(err, PaletteError::InvalidParameter(_)));
}
