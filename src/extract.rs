//! Palette extraction: k-means over the pixel colors of an image.

use std::collections::HashSet;
use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbImage, imageops::FilterType};
use kmeans_colors::get_kmeans;
use palette::Srgb;
use tracing::debug;

use crate::color::Rgb;
use crate::error::{PaletteError, Result};

/// Cluster labels are stored as bytes by the k-means backend.
pub const MAX_CLUSTERS: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct ExtractOptions {
    /// Number of clusters.
    pub k: usize,
    pub max_iter: usize,
    /// Convergence threshold on centroid movement.
    pub converge: f32,
    /// Seed for k-means++ initialisation. A fixed seed gives identical centroids.
    pub seed: u64,
    /// Shrink the image so its longest side is this many pixels before clustering.
    pub downscale: Option<u32>,
    pub strip_width: u32,
    pub strip_height: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            k: 5,
            max_iter: 20,
            converge: 1e-4,
            seed: 0,
            downscale: None,
            strip_width: 300,
            strip_height: 50,
        }
    }
}

pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| PaletteError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(PaletteError::Decode)
}

/// Flatten the image into its pixel colors, optionally downscaled first. Alpha is ignored.
fn flatten_pixels(img: &DynamicImage, downscale: Option<u32>) -> Vec<Rgb> {
    let working = match downscale {
        Some(scale) if scale > 0 => {
            let (orig_w, orig_h) = img.dimensions();
            let max_side = orig_w.max(orig_h) as f32;
            let ratio = scale as f32 / max_side;
            if ratio >= 1.0 {
                img.to_rgb8()
            } else {
                let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
                let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
                image::imageops::resize(&img.to_rgb8(), w, h, FilterType::Nearest)
            }
        }
        _ => img.to_rgb8(),
    };
    working.pixels().map(|p| Rgb(p.0)).collect()
}

/// Run k-means and return the `k` centroids in cluster order.
///
/// When the image holds no more than `k` distinct colors the clustering is
/// skipped: the distinct colors are the centroids, repeated until there are `k`
/// of them.
pub fn cluster(img: &DynamicImage, opts: &ExtractOptions) -> Result<Vec<Rgb>> {
    let pixels = flatten_pixels(img, opts.downscale);
    let k = opts.k;
    if k < 1 {
        return Err(PaletteError::InvalidParameter(
            "k must be at least 1".to_string(),
        ));
    }
    if k > pixels.len() {
        return Err(PaletteError::InvalidParameter(format!(
            "k ({k}) exceeds the pixel count ({})",
            pixels.len()
        )));
    }
    if k > MAX_CLUSTERS {
        return Err(PaletteError::InvalidParameter(format!(
            "k ({k}) exceeds the maximum of {MAX_CLUSTERS} clusters"
        )));
    }

    let mut seen = HashSet::new();
    let distinct: Vec<Rgb> = pixels.iter().copied().filter(|c| seen.insert(*c)).collect();
    if distinct.len() <= k {
        debug!(k, distinct = distinct.len(), "fewer distinct colors than clusters");
        return Ok(distinct.into_iter().cycle().take(k).collect());
    }

    let buf: Vec<Srgb> = pixels
        .iter()
        .map(|&c| Srgb::<u8>::from(c).into_format())
        .collect();
    let kmeans = get_kmeans(k, opts.max_iter, opts.converge, false, &buf, opts.seed);
    debug!(
        k,
        pixels = buf.len(),
        score = kmeans.score,
        "k-means finished"
    );

    Ok(kmeans.centroids.iter().map(|&c| truncate(c)).collect())
}

/// Scale a centroid back to 0..=255, truncating fractional channel means.
fn truncate(c: Srgb) -> Rgb {
    // The epsilon absorbs f32 error on exact integer means (11/255*255 = 10.99999).
    let channel = |v: f32| (v * 255.0 + 1e-3).clamp(0.0, 255.0) as u8;
    Rgb::new(channel(c.red), channel(c.green), channel(c.blue))
}

/// Deduplicated palette: the unique centroid colors, sorted by channel.
pub fn extract_palette(img: &DynamicImage, opts: &ExtractOptions) -> Result<Vec<Rgb>> {
    let mut centroids = cluster(img, opts)?;
    centroids.sort_unstable();
    centroids.dedup();
    Ok(centroids)
}

/// Visual palette: a strip of `k` contiguous bands in cluster order.
pub fn palette_strip(img: &DynamicImage, opts: &ExtractOptions) -> Result<RgbImage> {
    let centroids = cluster(img, opts)?;
    strip(&centroids, opts.strip_width, opts.strip_height)
}

/// Half-open `[start, end)` column ranges splitting `width` into `bands` parts.
/// Every band gets `width / bands` columns; the last also takes the remainder.
pub fn band_bounds(width: u32, bands: usize) -> Vec<(u32, u32)> {
    if bands == 0 {
        return Vec::new();
    }
    let step = width / bands as u32;
    (0..bands as u32)
        .map(|i| {
            let start = i * step;
            let end = if i + 1 == bands as u32 { width } else { start + step };
            (start, end)
        })
        .collect()
}

pub fn strip(colors: &[Rgb], width: u32, height: u32) -> Result<RgbImage> {
    if colors.is_empty() || colors.len() > width as usize {
        return Err(PaletteError::InvalidParameter(format!(
            "cannot split a {width}px strip into {} bands",
            colors.len()
        )));
    }
    let mut out = RgbImage::new(width, height);
    for (&color, (start, end)) in colors.iter().zip(band_bounds(width, colors.len())) {
        for x in start..end {
            for y in 0..height {
                out.put_pixel(x, y, color.into());
            }
        }
    }
    Ok(out)
}
