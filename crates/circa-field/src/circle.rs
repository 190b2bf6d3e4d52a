//! The circle particle record.

use circa_core::{Rgba, ThemePair};

/// A single circle in the field.
#[derive(Debug, Clone)]
pub struct Circle {
    /// Center x position in surface-local pixels.
    pub x: f64,
    /// Center y position in surface-local pixels.
    pub y: f64,
    /// Radius in surface-local pixels.
    pub radius: f64,

    /// Constant drift velocity. Boundary reflection flips its sign so the
    /// bounce persists across frames.
    pub base_velocity_x: f64,
    pub base_velocity_y: f64,

    /// Instantaneous velocity, recomputed from drift plus forces every
    /// frame.
    pub velocity_x: f64,
    pub velocity_y: f64,

    /// Per-theme color, both variants derived from the same brightness
    /// seed.
    pub color: ThemePair<Rgba>,
    /// Accent circle: colored instead of grayscale, with wider spacing
    /// against other accents.
    pub is_colored: bool,
}
