//! Circle field configuration.
//!
//! [`FieldConfig`] is the immutable per-instance parameter set. Callers
//! start from [`FieldConfig::default`] and merge partial overrides with
//! [`FieldConfig::with_overrides`]; every field can be overridden
//! independently, including each palette channel.

use circa_core::ThemePair;
use serde::{Deserialize, Serialize};

/// Color palette for one theme variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldColors {
    /// Darkest channel value for plain grayscale circles.
    pub grayscale_min: u8,
    /// Brightest channel value for plain grayscale circles.
    pub grayscale_max: u8,
    /// Alpha applied to grayscale circles.
    pub grayscale_alpha: f32,

    /// Hue of accent circles, in degrees (0-360).
    pub colored_hue: f32,
    /// Saturation of accent circles (0-100).
    pub colored_saturation: f32,
    /// Lower bound of the accent lightness range (0-100).
    pub colored_light_min: f32,
    /// Upper bound of the accent lightness range (0-100).
    pub colored_light_max: f32,
    /// Alpha applied to accent circles.
    pub colored_alpha: f32,
}

fn default_palettes() -> ThemePair<FieldColors> {
    ThemePair {
        light: FieldColors {
            grayscale_min: 255 - 48 + 10,
            grayscale_max: 255 - 16 + 10,
            grayscale_alpha: 0.6,

            colored_hue: 220.0,
            colored_saturation: 70.0,
            colored_light_min: 55.0,
            colored_light_max: 75.0,
            colored_alpha: 0.4,
        },
        dark: FieldColors {
            grayscale_min: 16,
            grayscale_max: 48,
            grayscale_alpha: 0.6,

            colored_hue: 220.0,
            colored_saturation: 70.0,
            colored_light_min: 55.0,
            colored_light_max: 75.0,
            colored_alpha: 0.32,
        },
    }
}

/// Tunable parameters of a circle field, fixed for the lifetime of an
/// instance.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Multiplier on the base drift speed of every circle.
    pub animation_speed: f64,
    /// Strength of the attraction toward an active pointer.
    pub pointer_gravity_strength: f64,
    /// Strength of the pairwise soft repulsion.
    pub repulsion_strength: f64,
    /// Preferred separation between two circles, as a factor of their
    /// summed radii.
    pub spread_factor: f64,

    /// Fraction of size-eligible circles that become accents.
    pub colored_fraction: f64,
    /// Circles at or above this radius are never accents.
    pub max_colored_radius: f64,
    /// Minimum spawn separation between two accents, as a factor of
    /// their summed radii.
    pub colored_min_separation_factor: f64,
    /// Repulsion multiplier applied between two accents.
    pub color_repulsion_mult: f64,

    /// Hard cap on the number of circles.
    pub max_circles: usize,
    /// Smallest circle radius.
    pub min_radius: f64,
    /// Largest circle radius.
    pub max_radius: f64,
    /// Surface area (in square pixels) allotted to each circle.
    pub base_density: f64,

    /// Palettes for the light and dark theme variants.
    pub colors: ThemePair<FieldColors>,

    /// Fixed RNG seed for deterministic layouts; `None` seeds from
    /// entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            animation_speed: 0.1,
            pointer_gravity_strength: 0.0016,
            repulsion_strength: 0.02,
            spread_factor: 1.6,

            colored_fraction: 0.35,
            max_colored_radius: 4.0 * 3.0 + 10.0,
            colored_min_separation_factor: 2.4,
            color_repulsion_mult: 1.8,

            max_circles: 90,
            min_radius: 4.0 * 3.0,
            max_radius: 18.0 * 3.0,
            base_density: 24000.0,

            colors: default_palettes(),

            seed: None,
        }
    }
}

impl FieldConfig {
    /// Defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &FieldOverrides) -> Self {
        let mut config = Self::default();
        overrides.apply_to(&mut config);
        config
    }
}

/// Partial palette override; unset fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldColorsOverrides {
    pub grayscale_min: Option<u8>,
    pub grayscale_max: Option<u8>,
    pub grayscale_alpha: Option<f32>,
    pub colored_hue: Option<f32>,
    pub colored_saturation: Option<f32>,
    pub colored_light_min: Option<f32>,
    pub colored_light_max: Option<f32>,
    pub colored_alpha: Option<f32>,
}

impl FieldColorsOverrides {
    fn apply_to(&self, colors: &mut FieldColors) {
        if let Some(v) = self.grayscale_min {
            colors.grayscale_min = v;
        }
        if let Some(v) = self.grayscale_max {
            colors.grayscale_max = v;
        }
        if let Some(v) = self.grayscale_alpha {
            colors.grayscale_alpha = v;
        }
        if let Some(v) = self.colored_hue {
            colors.colored_hue = v;
        }
        if let Some(v) = self.colored_saturation {
            colors.colored_saturation = v;
        }
        if let Some(v) = self.colored_light_min {
            colors.colored_light_min = v;
        }
        if let Some(v) = self.colored_light_max {
            colors.colored_light_max = v;
        }
        if let Some(v) = self.colored_alpha {
            colors.colored_alpha = v;
        }
    }
}

/// Partial [`FieldConfig`] override; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOverrides {
    pub animation_speed: Option<f64>,
    pub pointer_gravity_strength: Option<f64>,
    pub repulsion_strength: Option<f64>,
    pub spread_factor: Option<f64>,

    pub colored_fraction: Option<f64>,
    pub max_colored_radius: Option<f64>,
    pub colored_min_separation_factor: Option<f64>,
    pub color_repulsion_mult: Option<f64>,

    pub max_circles: Option<usize>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub base_density: Option<f64>,

    #[serde(default)]
    pub light_colors: FieldColorsOverrides,
    #[serde(default)]
    pub dark_colors: FieldColorsOverrides,

    pub seed: Option<u64>,
}

impl FieldOverrides {
    /// Merge these overrides into `config`.
    pub fn apply_to(&self, config: &mut FieldConfig) {
        if let Some(v) = self.animation_speed {
            config.animation_speed = v;
        }
        if let Some(v) = self.pointer_gravity_strength {
            config.pointer_gravity_strength = v;
        }
        if let Some(v) = self.repulsion_strength {
            config.repulsion_strength = v;
        }
        if let Some(v) = self.spread_factor {
            config.spread_factor = v;
        }
        if let Some(v) = self.colored_fraction {
            config.colored_fraction = v;
        }
        if let Some(v) = self.max_colored_radius {
            config.max_colored_radius = v;
        }
        if let Some(v) = self.colored_min_separation_factor {
            config.colored_min_separation_factor = v;
        }
        if let Some(v) = self.color_repulsion_mult {
            config.color_repulsion_mult = v;
        }
        if let Some(v) = self.max_circles {
            config.max_circles = v;
        }
        if let Some(v) = self.min_radius {
            config.min_radius = v;
        }
        if let Some(v) = self.max_radius {
            config.max_radius = v;
        }
        if let Some(v) = self.base_density {
            config.base_density = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }

        self.light_colors.apply_to(&mut config.colors.light);
        self.dark_colors.apply_to(&mut config.colors.dark);
    }
}
