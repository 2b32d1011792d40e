// File: crates/dash-core/src/color.rs
// Summary: RGBA colour, palettes, and the quantile/ordinal colour scales the views call.

use crate::geometry::lerp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const HIGHLIGHT: Color = Color::rgb(0xe3, 0x1a, 0x1c);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 {
            return None;
        }
        let v = u32::from_str_radix(h, 16).ok()?;
        Some(Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        let ch = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
        Color::rgba(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b), ch(self.a, other.a))
    }
}

/// White followed by the six-class ColorBrewer "Purples" ramp.
pub const PURPLES: [Color; 7] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0xf2, 0xf0, 0xf7),
    Color::rgb(0xda, 0xda, 0xeb),
    Color::rgb(0xbc, 0xbd, 0xdc),
    Color::rgb(0x9e, 0x9a, 0xc8),
    Color::rgb(0x75, 0x6b, 0xb1),
    Color::rgb(0x54, 0x27, 0x8f),
];

/// Ten-colour categorical palette.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// Quantile scale: the sorted domain is cut into `range.len()` equally populated buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantile {
    domain: Vec<f64>,
    thresholds: Vec<f64>,
    range: Vec<Color>,
}

impl Quantile {
    pub fn new(domain: &[f64], range: &[Color]) -> Self {
        let mut sorted: Vec<f64> = domain.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);
        let k = range.len();
        let thresholds = if sorted.is_empty() || k < 2 {
            Vec::new()
        } else {
            (1..k).map(|i| quantile(&sorted, i as f64 / k as f64)).collect()
        };
        Self { domain: sorted, thresholds, range: range.to_vec() }
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn color(&self, v: f64) -> Color {
        if self.range.is_empty() {
            return Color::BLACK;
        }
        let idx = self.thresholds.partition_point(|t| *t <= v);
        self.range[idx.min(self.range.len() - 1)]
    }
}

/// R-7 quantile of an ascending slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    lerp(sorted[lo], sorted[hi], h - lo as f64)
}

/// Categorical scale with a fixed domain; keys cycle through the range in domain order.
#[derive(Clone, Debug, PartialEq)]
pub struct Ordinal {
    domain: Vec<String>,
    range: Vec<Color>,
}

impl Ordinal {
    pub fn new(domain: Vec<String>, range: &[Color]) -> Self {
        Self { domain, range: range.to_vec() }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn color(&self, key: &str) -> Color {
        if self.range.is_empty() {
            return Color::BLACK;
        }
        match self.domain.iter().position(|d| d == key) {
            Some(i) => self.range[i % self.range.len()],
            None => {
                log::trace!("ordinal scale: unknown key '{key}'");
                self.range[0]
            }
        }
    }
}
