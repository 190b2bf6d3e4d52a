//! Initial circle placement.
//!
//! Circles are placed by rejection sampling: positions are drawn until one
//! clears every already-placed circle (with extra padding, and a wider
//! minimum between two accents) or the attempt cap runs out. A capped-out
//! circle is placed at one more freshly sampled position even if it
//! overlaps; the pair repulsion untangles it within a few frames.

use rand::Rng;

use crate::circle::Circle;
use crate::config::FieldConfig;
use crate::palette;

/// Rejection sampling attempt cap. Tunable, not load-bearing: exhausting
/// it degrades to an overlapping placement, not an error.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 2000;

/// Extra clearance (in pixels) required between freshly placed circles.
pub const EXTRA_SPAWN_PADDING: f64 = 6.0;

/// Number of circles to spawn for a surface of the given size.
///
/// One circle per `base_density` square pixels, with a floor of 20 and a
/// ceiling of `max_circles`.
pub fn circle_count(width: f64, height: f64, config: &FieldConfig) -> usize {
    let by_area = ((width * height) / config.base_density).floor() as usize;
    config.max_circles.min(by_area.max(20))
}

/// Spawn the full initial circle set for a surface of the given size.
pub fn spawn_circles(
    width: f64,
    height: f64,
    config: &FieldConfig,
    rng: &mut impl Rng,
) -> Vec<Circle> {
    let count = circle_count(width, height, config);
    let mut circles: Vec<Circle> = Vec::with_capacity(count);

    for _ in 0..count {
        let radius = config.min_radius
            + rng.gen_range(0.0..1.0) * (config.max_radius - config.min_radius);

        let speed = (0.05 + rng.gen_range(0.0..1.0) * 0.25) * config.animation_speed;
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);

        let base_velocity_x = angle.cos() * speed;
        let base_velocity_y = angle.sin() * speed;

        let is_colored =
            radius < config.max_colored_radius && rng.gen_range(0.0..1.0) < config.colored_fraction;

        let mut x = 0.0;
        let mut y = 0.0;
        let mut placed = false;

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            x = radius + rng.gen_range(0.0..1.0) * (width - 2.0 * radius);
            y = radius + rng.gen_range(0.0..1.0) * (height - 2.0 * radius);

            if placement_is_valid(x, y, radius, is_colored, &circles, config) {
                placed = true;
                break;
            }
        }

        if !placed {
            // Overlapping fallback; repulsion will fix it later.
            x = radius + rng.gen_range(0.0..1.0) * (width - 2.0 * radius);
            y = radius + rng.gen_range(0.0..1.0) * (height - 2.0 * radius);
        }

        let seed = rng.gen_range(0.0..1.0);

        circles.push(Circle {
            x,
            y,
            radius,
            base_velocity_x,
            base_velocity_y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            color: palette::color_pair(is_colored, seed, &config.colors),
            is_colored,
        });
    }

    circles
}

fn placement_is_valid(
    x: f64,
    y: f64,
    radius: f64,
    is_colored: bool,
    placed: &[Circle],
    config: &FieldConfig,
) -> bool {
    for other in placed {
        let delta_x = x - other.x;
        let delta_y = y - other.y;
        let distance_squared = delta_x * delta_x + delta_y * delta_y;

        let min_distance = radius + other.radius + EXTRA_SPAWN_PADDING;
        if distance_squared < min_distance * min_distance {
            return false;
        }

        if is_colored && other.is_colored {
            let min_accent_distance =
                (radius + other.radius) * config.colored_min_separation_factor;
            if distance_squared < min_accent_distance * min_accent_distance {
                return false;
            }
        }
    }

    true
}
