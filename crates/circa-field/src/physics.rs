//! Per-frame physics for the circle field.
//!
//! Each frame resets every circle's velocity to its base drift, adds
//! pointer attraction and pairwise soft repulsion, integrates positions by
//! one step, and reflects circles off the surface edges.

use crate::circle::Circle;
use crate::config::FieldConfig;

/// Distance around the pointer within which circles are attracted.
pub const POINTER_ATTRACTION_RADIUS: f64 = 200.0;

/// Last known pointer position in surface-local coordinates.
///
/// Input handlers mutate this record between frames; the next physics
/// step reads it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    /// Cleared once the pointer leaves the tracked region.
    pub active: bool,
}

/// Run one full physics step over `circles`.
///
/// A zero-area surface leaves all circles untouched.
pub fn step(
    circles: &mut [Circle],
    pointer: &PointerState,
    config: &FieldConfig,
    width: f64,
    height: f64,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    reset_velocities(circles);
    if pointer.active {
        apply_pointer_attraction(circles, pointer, config.pointer_gravity_strength);
    }
    apply_pair_repulsion(circles, config);
    integrate_and_bounce(circles, width, height);
}

/// Reset every circle's velocity to its base drift vector.
pub fn reset_velocities(circles: &mut [Circle]) {
    for circle in circles {
        circle.velocity_x = circle.base_velocity_x;
        circle.velocity_y = circle.base_velocity_y;
    }
}

/// Pull circles near the pointer toward it.
///
/// The attraction fades linearly to zero at
/// [`POINTER_ATTRACTION_RADIUS`]; circles essentially on top of the
/// pointer are skipped to avoid a division blow-up.
pub fn apply_pointer_attraction(circles: &mut [Circle], pointer: &PointerState, strength: f64) {
    for circle in circles {
        let delta_x = pointer.x - circle.x;
        let delta_y = pointer.y - circle.y;
        let distance_squared = delta_x * delta_x + delta_y * delta_y;

        if distance_squared > 1.0
            && distance_squared < POINTER_ATTRACTION_RADIUS * POINTER_ATTRACTION_RADIUS
        {
            let distance = distance_squared.sqrt();
            let attraction = (1.0 - distance / POINTER_ATTRACTION_RADIUS) * strength;

            circle.velocity_x += delta_x * attraction;
            circle.velocity_y += delta_y * attraction;
        }
    }
}

/// Apply the symmetric soft repulsion between every close pair.
///
/// A pair interacts when its center distance is below
/// `(ra + rb) × spread_factor`; the impulse grows with the remaining
/// overlap and is multiplied by `color_repulsion_mult` between two
/// accents. Coincident pairs are skipped (undefined direction).
pub fn apply_pair_repulsion(circles: &mut [Circle], config: &FieldConfig) {
    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let (left, right) = circles.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            let delta_x = b.x - a.x;
            let delta_y = b.y - a.y;
            let distance_squared = delta_x * delta_x + delta_y * delta_y;

            if distance_squared <= 0.0 {
                continue;
            }

            let preferred = (a.radius + b.radius) * config.spread_factor;
            if distance_squared >= preferred * preferred {
                continue;
            }

            let distance = distance_squared.sqrt();
            let unit_x = delta_x / distance;
            let unit_y = delta_y / distance;

            let overlap = preferred - distance;
            let mut impulse = config.repulsion_strength * overlap;
            if a.is_colored && b.is_colored {
                impulse *= config.color_repulsion_mult;
            }

            a.velocity_x -= unit_x * impulse;
            a.velocity_y -= unit_y * impulse;
            b.velocity_x += unit_x * impulse;
            b.velocity_y += unit_y * impulse;
        }
    }
}

/// Integrate one step and reflect circles off the surface edges.
///
/// Positions are clamped so every circle stays fully inside, and the base
/// drift component on the clamped axis is pointed back inward.
pub fn integrate_and_bounce(circles: &mut [Circle], width: f64, height: f64) {
    for circle in circles {
        circle.x += circle.velocity_x;
        circle.y += circle.velocity_y;

        if circle.x - circle.radius < 0.0 {
            circle.x = circle.radius;
            circle.base_velocity_x = circle.base_velocity_x.abs();
        } else if circle.x + circle.radius > width {
            circle.x = width - circle.radius;
            circle.base_velocity_x = -circle.base_velocity_x.abs();
        }

        if circle.y - circle.radius < 0.0 {
            circle.y = circle.radius;
            circle.base_velocity_y = circle.base_velocity_y.abs();
        } else if circle.y + circle.radius > height {
            circle.y = height - circle.radius;
            circle.base_velocity_y = -circle.base_velocity_y.abs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circa_core::{Rgba, ThemePair};

    fn plain_circle(x: f64, y: f64, radius: f64) -> Circle {
        Circle {
            x,
            y,
            radius,
            base_velocity_x: 0.0,
            base_velocity_y: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            color: ThemePair {
                light: Rgba::gray(200, 0.6),
                dark: Rgba::gray(40, 0.6),
            },
            is_colored: false,
        }
    }

    #[test]
    fn repulsion_impulses_are_symmetric() {
        let config = FieldConfig::default();
        let mut circles = vec![plain_circle(100.0, 100.0, 10.0), plain_circle(110.0, 104.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pair_repulsion(&mut circles, &config);

        assert!(circles[0].velocity_x != 0.0 || circles[0].velocity_y != 0.0);
        assert!((circles[0].velocity_x + circles[1].velocity_x).abs() < 1e-12);
        assert!((circles[0].velocity_y + circles[1].velocity_y).abs() < 1e-12);
    }

    #[test]
    fn coincident_pairs_are_skipped() {
        let config = FieldConfig::default();
        let mut circles = vec![plain_circle(50.0, 50.0, 10.0), plain_circle(50.0, 50.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pair_repulsion(&mut circles, &config);

        assert_eq!(circles[0].velocity_x, 0.0);
        assert_eq!(circles[1].velocity_y, 0.0);
    }

    #[test]
    fn distant_pairs_do_not_interact() {
        let config = FieldConfig::default();
        // Separation just past (ra + rb) * spread_factor.
        let gap = (10.0 + 10.0) * config.spread_factor + 1.0;
        let mut circles = vec![plain_circle(0.0, 50.0, 10.0), plain_circle(gap, 50.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pair_repulsion(&mut circles, &config);

        assert_eq!(circles[0].velocity_x, 0.0);
        assert_eq!(circles[1].velocity_x, 0.0);
    }

    #[test]
    fn accent_pairs_repel_harder() {
        let config = FieldConfig::default();

        let mut plain = vec![plain_circle(100.0, 100.0, 10.0), plain_circle(112.0, 100.0, 10.0)];
        let mut accents = plain.clone();
        for circle in &mut accents {
            circle.is_colored = true;
        }

        apply_pair_repulsion(&mut plain, &config);
        apply_pair_repulsion(&mut accents, &config);

        let plain_impulse = plain[1].velocity_x;
        let accent_impulse = accents[1].velocity_x;
        assert!((accent_impulse - plain_impulse * config.color_repulsion_mult).abs() < 1e-12);
    }

    #[test]
    fn pointer_outside_attraction_radius_has_no_effect() {
        let pointer = PointerState {
            x: 0.0,
            y: 0.0,
            active: true,
        };
        let mut circles = vec![plain_circle(POINTER_ATTRACTION_RADIUS + 5.0, 0.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pointer_attraction(&mut circles, &pointer, 0.0016);

        assert_eq!(circles[0].velocity_x, 0.0);
        assert_eq!(circles[0].velocity_y, 0.0);
    }

    #[test]
    fn pointer_at_epsilon_distance_is_skipped() {
        let pointer = PointerState {
            x: 100.0,
            y: 100.0,
            active: true,
        };
        let mut circles = vec![plain_circle(100.5, 100.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pointer_attraction(&mut circles, &pointer, 0.0016);

        assert_eq!(circles[0].velocity_x, 0.0);
    }

    #[test]
    fn pointer_attraction_points_toward_the_pointer() {
        let pointer = PointerState {
            x: 150.0,
            y: 100.0,
            active: true,
        };
        let mut circles = vec![plain_circle(100.0, 100.0, 10.0)];

        reset_velocities(&mut circles);
        apply_pointer_attraction(&mut circles, &pointer, 0.0016);

        assert!(circles[0].velocity_x > 0.0);
        assert_eq!(circles[0].velocity_y, 0.0);
    }

    #[test]
    fn bounce_clamps_and_reflects_base_drift() {
        let mut circles = vec![plain_circle(15.0, 50.0, 10.0)];
        circles[0].base_velocity_x = -8.0;
        circles[0].velocity_x = -8.0;

        integrate_and_bounce(&mut circles, 200.0, 200.0);

        // Clamped fully inside the left edge, drift now pointing inward.
        assert_eq!(circles[0].x, 10.0);
        assert_eq!(circles[0].base_velocity_x, 8.0);
    }

    #[test]
    fn bounce_handles_each_axis_independently() {
        let mut circles = vec![plain_circle(195.0, 5.0, 10.0)];
        circles[0].base_velocity_x = 8.0;
        circles[0].base_velocity_y = -4.0;
        circles[0].velocity_x = 8.0;
        circles[0].velocity_y = -4.0;

        integrate_and_bounce(&mut circles, 200.0, 200.0);

        assert_eq!(circles[0].x, 190.0);
        assert_eq!(circles[0].base_velocity_x, -8.0);
        assert_eq!(circles[0].y, 10.0);
        assert_eq!(circles[0].base_velocity_y, 4.0);
    }

    #[test]
    fn step_with_inactive_pointer_adds_no_velocity() {
        let config = FieldConfig::default();
        let pointer = PointerState {
            x: 100.0,
            y: 100.0,
            active: false,
        };
        // Far enough apart that repulsion stays silent too.
        let mut circles = vec![plain_circle(50.0, 50.0, 10.0), plain_circle(300.0, 300.0, 10.0)];

        step(&mut circles, &pointer, &config, 400.0, 400.0);

        for circle in &circles {
            assert_eq!(circle.velocity_x, circle.base_velocity_x);
            assert_eq!(circle.velocity_y, circle.base_velocity_y);
        }
    }

    #[test]
    fn zero_area_surface_freezes_the_field() {
        let config = FieldConfig::default();
        let pointer = PointerState::default();
        let mut circles = vec![plain_circle(50.0, 50.0, 10.0)];
        circles[0].base_velocity_x = 3.0;

        step(&mut circles, &pointer, &config, 0.0, 200.0);

        assert_eq!(circles[0].x, 50.0);
    }
}
