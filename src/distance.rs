//! Scoring functions between two colors.

use crate::color::Rgb;

/// Scoring strategy used when comparing a query color to catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Weighted channel product: `2*R1*R2 + 4*G1*G2 + 3*B1*B2`.
    ///
    /// Not a true distance. It is unbounded, grows with brightness as well as
    /// similarity, and `score(a, a)` is the weighted sum of squares rather than
    /// zero. This is the metric catalog matching uses.
    #[default]
    WeightedProduct,

    /// Plain Euclidean distance in RGB space.
    Euclidean,

    /// Euclidean distance with each channel difference scaled by its NTSC
    /// luma coefficient (0.299, 0.587, 0.114).
    LumaWeighted,
}

impl Metric {
    pub fn distance(self, a: Rgb, b: Rgb) -> f64 {
        match self {
            Metric::WeightedProduct => weighted_product(a, b),
            Metric::Euclidean => euclidean(a, b),
            Metric::LumaWeighted => luma_weighted(a, b),
        }
    }
}

pub fn weighted_product(a: Rgb, b: Rgb) -> f64 {
    let p = |x: u8, y: u8| x as f64 * y as f64;
    2.0 * p(a.r(), b.r()) + 4.0 * p(a.g(), b.g()) + 3.0 * p(a.b(), b.b())
}

pub fn euclidean(a: Rgb, b: Rgb) -> f64 {
    let d = |x: u8, y: u8| y as f64 - x as f64;
    let (dr, dg, db) = (d(a.r(), b.r()), d(a.g(), b.g()), d(a.b(), b.b()));
    (dr * dr + dg * dg + db * db).sqrt()
}

pub fn luma_weighted(a: Rgb, b: Rgb) -> f64 {
    let d = |x: u8, y: u8, w: f64| (y as f64 - x as f64) * w;
    let dr = d(a.r(), b.r(), 0.299);
    let dg = d(a.g(), b.g(), 0.587);
    let db = d(a.b(), b.b(), 0.114);
    (dr * dr + dg * dg + db * db).sqrt()
}
