//! PNG rendering of swatches: the catalog grid and the image/palette comparison.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, Rgb as Pixel, RgbImage, imageops::FilterType};
use tracing::info;

use crate::color::Rgb;
use crate::error::{PaletteError, Result};

const GRID_COLUMNS: u32 = 4;
const CELL_WIDTH: u32 = 212;
const CELL_HEIGHT: u32 = 22;
const SWATCH_WIDTH: u32 = 30;
const SWATCH_HEIGHT: u32 = 18;
const MARGIN: u32 = 12;
const TOP_MARGIN: u32 = 40;

const COMPARE_HEIGHT: u32 = 400;
const COMPARE_MAX_WIDTH: u32 = 1200;
const PANEL_WIDTH: u32 = 200;
const PANEL_SWATCH_WIDTH: u32 = 160;
const PANEL_SWATCH_HEIGHT: u32 = 48;
const PANEL_GAP: u32 = 20;

const BACKGROUND: Pixel<u8> = Pixel([255, 255, 255]);
const EDGE: Pixel<u8> = Pixel([179, 179, 179]);

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Pixel<u8>) {
    let (img_w, img_h) = img.dimensions();
    for py in y..(y + h).min(img_h) {
        for px in x..(x + w).min(img_w) {
            img.put_pixel(px, py, color);
        }
    }
}

/// A swatch with a one pixel edge.
fn swatch(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
    fill_rect(img, x, y, w, h, EDGE);
    if w > 2 && h > 2 {
        fill_rect(img, x + 1, y + 1, w - 2, h - 2, color.into());
    }
}

/// Rows needed to lay out `n` swatches in the grid.
pub fn grid_rows(n: usize) -> u32 {
    (n as u32).div_ceil(GRID_COLUMNS)
}

/// Top-left corner of the swatch for item `i`. Items fill columns top to bottom.
pub fn grid_position(i: usize, rows: u32) -> (u32, u32) {
    let i = i as u32;
    let (row, col) = (i % rows, i / rows);
    let x = MARGIN + col * CELL_WIDTH;
    let y = TOP_MARGIN + row * CELL_HEIGHT + (CELL_HEIGHT - SWATCH_HEIGHT) / 2;
    (x, y)
}

/// Catalog swatch grid, four columns filled column-major.
pub fn render_swatch_grid(colors: &[Rgb]) -> RgbImage {
    let rows = grid_rows(colors.len());
    let width = CELL_WIDTH * GRID_COLUMNS + 2 * MARGIN;
    let height = CELL_HEIGHT * rows + MARGIN + TOP_MARGIN;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    for (i, &color) in colors.iter().enumerate() {
        let (x, y) = grid_position(i, rows);
        swatch(&mut img, x, y, SWATCH_WIDTH, SWATCH_HEIGHT, color);
    }
    img
}

/// Size of the source image once fitted inside `COMPARE_MAX_WIDTH` x `COMPARE_HEIGHT`,
/// keeping its aspect ratio. Tall images fill the height.
pub fn fit_comparison(src_w: u32, src_h: u32) -> (u32, u32) {
    let (w, h) = (src_w.max(1) as f32, src_h.max(1) as f32);
    let scale = (COMPARE_HEIGHT as f32 / h).min(COMPARE_MAX_WIDTH as f32 / w);
    let fit = |v: f32, max: u32| ((v * scale).round() as u32).clamp(1, max);
    (fit(w, COMPARE_MAX_WIDTH), fit(h, COMPARE_HEIGHT))
}

/// The source image fitted to the comparison box, with a column of swatches beside it.
pub fn render_comparison(source: &DynamicImage, colors: &[Rgb]) -> RgbImage {
    let (src_w, src_h) = source.dimensions();
    let (scaled_w, scaled_h) = fit_comparison(src_w, src_h);
    let scaled = image::imageops::resize(&source.to_rgb8(), scaled_w, scaled_h, FilterType::Triangle);

    let panel_h = PANEL_GAP + colors.len() as u32 * (PANEL_SWATCH_HEIGHT + PANEL_GAP);
    let height = COMPARE_HEIGHT.max(panel_h);
    let mut img = RgbImage::from_pixel(scaled_w + PANEL_WIDTH, height, BACKGROUND);
    image::imageops::replace(&mut img, &scaled, 0, 0);

    let x = scaled_w + (PANEL_WIDTH - PANEL_SWATCH_WIDTH) / 2;
    for (i, &color) in colors.iter().enumerate() {
        let y = PANEL_GAP + i as u32 * (PANEL_SWATCH_HEIGHT + PANEL_GAP);
        swatch(&mut img, x, y, PANEL_SWATCH_WIDTH, PANEL_SWATCH_HEIGHT, color);
    }
    img
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(PaletteError::Encode)?;
    }
    Ok(buf)
}

pub fn save_png(img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode_png(img)?)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "saved figure");
    Ok(())
}
