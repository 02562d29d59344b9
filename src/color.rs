//! The RGB triple shared by every stage of the pipeline, plus hex and HSV helpers.

use std::fmt;
use std::str::FromStr;

use palette::{FromColor, Hsv, Srgb};

use crate::error::{PaletteError, Result};

/// An 8-bit sRGB color. Immutable value type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    pub const fn r(self) -> u8 {
        self.0[0]
    }

    pub const fn g(self) -> u8 {
        self.0[1]
    }

    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb2hex(self.r(), self.g(), self.b())
    }

    /// Parse `#rrggbb` or `rrggbb`, either case.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PaletteError::ParseColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PaletteError::ParseColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// `(hue, saturation, value)`, each in `[0, 1]`.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let rgb: Srgb<f32> = Srgb::<u8>::from(self).into_format();
        let hsv: Hsv = Hsv::from_color(rgb);
        let hue = hsv.hue.into_positive_degrees() / 360.0;
        // A hue of exactly 360 can fall out of the float round trip.
        let hue = if hue >= 1.0 { 0.0 } else { hue };
        (hue, hsv.saturation, hsv.value)
    }
}

pub fn rgb2hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Rgb(channels)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Rgb::new(c.red, c.green, c.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(c: Rgb) -> Self {
        Srgb::new(c.r(), c.g(), c.b())
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb(c.0)
    }
}
