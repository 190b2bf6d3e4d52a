//! Circle color generation.
//!
//! Every circle samples one brightness seed and derives its light and dark
//! colors from it, so a theme switch changes the palette without
//! re-rolling relative lightness across the field.

use circa_core::{Rgba, ThemePair};

use crate::config::FieldColors;

/// Derive a circle color from a brightness seed in `[0, 1)`.
pub fn color_from_seed(is_colored: bool, seed: f64, colors: &FieldColors) -> Rgba {
    let seed = seed as f32;

    if is_colored {
        let lightness =
            colors.colored_light_min + seed * (colors.colored_light_max - colors.colored_light_min);

        return Rgba::from_hsla(
            colors.colored_hue,
            colors.colored_saturation / 100.0,
            lightness / 100.0,
            colors.colored_alpha,
        );
    }

    let gray = colors.grayscale_min as f32
        + seed * (colors.grayscale_max as f32 - colors.grayscale_min as f32);

    Rgba::gray(gray.round() as u8, colors.grayscale_alpha)
}

/// Derive the light/dark color pair for a circle from one shared seed.
pub fn color_pair(is_colored: bool, seed: f64, palettes: &ThemePair<FieldColors>) -> ThemePair<Rgba> {
    ThemePair {
        light: color_from_seed(is_colored, seed, &palettes.light),
        dark: color_from_seed(is_colored, seed, &palettes.dark),
    }
}
