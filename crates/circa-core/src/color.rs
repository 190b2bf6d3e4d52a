//! Color utilities for the circle field.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An RGBA color with an alpha channel in `[0.0, 1.0]`.
///
/// Terminals have no alpha blending, so translucent circle colors are
/// composited over the page background with [`Rgba::composite_over`] at
/// draw time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create an opaque or translucent RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a neutral gray from a single channel value.
    pub const fn gray(value: u8, alpha: f32) -> Self {
        Self::new(value, value, value, alpha)
    }

    /// Create a color from HSL components plus alpha.
    ///
    /// `hue` is in degrees (0-360), `saturation` and `lightness` in
    /// `[0.0, 1.0]`.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let (h, s, l) = (hue, saturation, lightness);

        if s == 0.0 {
            let v = (l * 255.0) as u8;
            return Self::new(v, v, v, alpha);
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        let h = h / 360.0;

        let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
        let g = hue_to_rgb(p, q, h);
        let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

        Self::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            alpha,
        )
    }

    /// Composite this color over an opaque background, producing a
    /// terminal color.
    pub fn composite_over(self, background: Rgba) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let blend = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8
        };

        Color::Rgb(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }

    /// Perceived relative lightness in `[0.0, 1.0]`, ignoring alpha.
    pub fn luma(self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
