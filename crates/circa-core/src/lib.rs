//! Core types shared across the circa landing card crates.
//!
//! This crate holds the leaf types the other crates agree on: RGBA colors
//! with HSL construction and compositing, the light/dark theme variant, an
//! observable theme state with change subscriptions, and the animation
//! speed setting.

mod color;
mod theme;

pub use color::Rgba;
pub use theme::{AnimationSpeed, ThemePair, ThemeState, ThemeSubscription, ThemeVariant};
