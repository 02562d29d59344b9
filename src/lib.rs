use wasm_bindgen::prelude::*;
use js_sys::{Uint8Array, Array, Object, Reflect};
use tracing::info;

pub mod browse;
pub mod catalog;
pub mod color;
pub mod distance;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod render;

pub use browse::{BrowseOptions, browse, list_colors};
pub use catalog::{Catalog, CatalogEntry};
pub use color::{Rgb, rgb2hex};
pub use distance::Metric;
pub use error::{PaletteError, Result};
pub use extract::{ExtractOptions, cluster, extract_palette, load_image, palette_strip};
pub use matcher::{DEFAULT_EXCLUDE, Match, MatchOptions, Selection, match_closest};

// ------------------------------------------------------------
// Native helpers over encoded image bytes
// ------------------------------------------------------------

/// Decode an image and return its deduplicated palette as `#rrggbb` strings.
pub fn extract_palette_bytes(input: &[u8], opts: &ExtractOptions) -> Result<Vec<String>> {
    let img = extract::decode_image(input)?;
    let palette = extract_palette(&img, opts)?;
    info!(colors = palette.len(), "palette extracted");
    Ok(palette.iter().map(|c| c.to_hex()).collect())
}

/// Decode an image, extract its palette and name every color from the CSS4 catalog.
pub fn match_palette_bytes(
    input: &[u8],
    opts: &ExtractOptions,
    match_opts: &MatchOptions,
) -> Result<Vec<Match>> {
    let img = extract::decode_image(input)?;
    let palette = extract_palette(&img, opts)?;
    let matches = match_closest(&palette, Catalog::css4(), match_opts);
    info!(colors = palette.len(), matched = matches.len(), "palette matched");
    Ok(matches)
}

// ------------------------------------------------------------
// Browser entry points
// ------------------------------------------------------------

fn to_js_err(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract the palette of an encoded image.
///
/// Returns `{ palette: string[], names: string[], strip: Uint8Array }`, where
/// `names` holds the CSS color matched to each palette entry (default drop-list
/// applied) and `strip` is a PNG of the palette bands in cluster order.
#[wasm_bindgen(js_name = palette)]
pub fn palette_js(input: Vec<u8>, n_colors: usize, seed: Option<u32>) -> std::result::Result<Object, JsValue> {
    let opts = ExtractOptions {
        k: n_colors,
        seed: seed.map(u64::from).unwrap_or_default(),
        ..Default::default()
    };
    let img = extract::decode_image(&input).map_err(to_js_err)?;

    let centroids = cluster(&img, &opts).map_err(to_js_err)?;
    let strip = extract::strip(&centroids, opts.strip_width, opts.strip_height).map_err(to_js_err)?;
    let strip_png = render::encode_png(&strip).map_err(to_js_err)?;

    let mut unique = centroids;
    unique.sort_unstable();
    unique.dedup();
    let matches = match_closest(&unique, Catalog::css4(), &MatchOptions::default());

    let palette_js = Array::new();
    for c in &unique {
        palette_js.push(&JsValue::from_str(&c.to_hex()));
    }
    let names_js = Array::new();
    for m in &matches {
        names_js.push(&JsValue::from_str(&m.name));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;
    Reflect::set(&result, &JsValue::from_str("names"), &names_js)?;
    Reflect::set(&result, &JsValue::from_str("strip"), &Uint8Array::from(strip_png.as_slice()))?;

    Ok(result)
}

/// CSS colors whose name contains `filter`, sorted by hue, saturation, value and name.
///
/// Each element is `{ name: string, hex: string }`.
#[wasm_bindgen(js_name = searchColors)]
pub fn search_colors(filter: Option<String>) -> std::result::Result<Array, JsValue> {
    let opts = BrowseOptions {
        name_filter: filter,
        ..Default::default()
    };
    let out = Array::new();
    for entry in list_colors(Catalog::css4(), &opts) {
        let item = Object::new();
        Reflect::set(&item, &JsValue::from_str("name"), &JsValue::from_str(&entry.name))?;
        Reflect::set(&item, &JsValue::from_str("hex"), &JsValue::from_str(&entry.rgb.to_hex()))?;
        out.push(&item);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_extract_palette_bytes_hex() {
        let img = RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 { image::Rgb([255, 0, 0]) } else { image::Rgb([16, 32, 48]) }
        });
        let hex = extract_palette_bytes(&png_bytes(img), &ExtractOptions::default()).unwrap();
        assert_eq!(hex, vec!["#102030".to_string(), "#ff0000".to_string()]);
    }

    #[test]
    fn test_match_palette_bytes_names_are_css() {
        let img = RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 { image::Rgb([250, 10, 5]) } else { image::Rgb([10, 10, 200]) }
        });
        let matches =
            match_palette_bytes(&png_bytes(img), &ExtractOptions::default(), &MatchOptions::default())
                .unwrap();
        assert_eq!(matches.len(), 2);
        for m in &matches {
            assert_eq!(Catalog::css4().get(&m.name), Some(m.rgb));
            assert!(DEFAULT_EXCLUDE.iter().all(|u| !m.name.contains(u)));
        }
    }

    #[test]
    fn test_bytes_helpers_reject_garbage() {
        let err = extract_palette_bytes(b"garbage", &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, PaletteError::Decode(_)));
    }
}
