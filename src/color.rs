// src/color.rs
//! HSV to RGB conversion for the frame colors.

use std::fmt;

/// A color in the cylindrical hue/saturation/value model.
///
/// `hue` is in degrees and is not required to be inside `[0, 360)`;
/// [`hsv_to_rgb`] wraps it before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorHsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl ColorHsv {
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    pub fn to_rgb(self) -> ColorRgb {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorRgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Attach an opacity, producing a gradient stop color.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            color: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// An RGB color with a straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: ColorRgb,
    pub alpha: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.color.red, self.color.green, self.color.blue, self.alpha
        )
    }
}

/// Wrap a hue in degrees into `[0, 360)`. Non-finite hues map to 0.
pub fn normalize_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert HSV to 8-bit RGB using the six-sector formula.
///
/// `h` is in degrees (any real number), `s` and `v` are clamped into `[0, 1]`.
/// Each channel is rounded half away from zero independently.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> ColorRgb {
    let s = if s.is_nan() { 0.0 } else { s.clamp(0.0, 1.0) };
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let h = normalize_hue(h) / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    ColorRgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}
