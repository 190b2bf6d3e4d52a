//! Animated circle field background simulation.
//!
//! A set of circular particles drifts across a drawing surface, softly
//! repelling each other and gravitating toward the pointer. The
//! [`CircleField`] instance owns the particles and the surface binding and
//! drives one `update → render` step per frame; the embedding application
//! supplies the frame cadence, pointer events and resize notifications.
//!
//! Lifecycle: [`CircleField::create`] → loop (`on_resize` ↔
//! `advance_frame`) → [`CircleField::destroy`].

mod circle;
mod config;
mod error;
mod field;
mod palette;
mod physics;
mod placement;
mod surface;

pub use circle::Circle;
pub use config::{FieldColors, FieldColorsOverrides, FieldConfig, FieldOverrides};
pub use error::{DisposalError, FieldError};
pub use field::CircleField;
pub use physics::{POINTER_ATTRACTION_RADIUS, PointerState, step as physics_step};
pub use placement::{
    EXTRA_SPAWN_PADDING, MAX_PLACEMENT_ATTEMPTS, circle_count, spawn_circles,
};
pub use surface::{Context2d, Surface};
