//! The drawing surface abstraction.
//!
//! The field draws through these traits so the binary can back it with a
//! braille-resolution terminal canvas while tests drive it against an
//! in-memory surface.

use circa_core::Rgba;

/// A rectangular pixel-addressable drawing target.
pub trait Surface {
    /// Current layout size in surface-local pixels.
    fn layout_size(&self) -> (f64, f64);

    /// Ratio between backing pixels and layout pixels.
    fn pixel_ratio(&self) -> f64;

    /// Resize the backing pixel buffer and coordinate transform to match
    /// the given layout size and pixel ratio.
    fn reset_backing(&mut self, width: f64, height: f64, pixel_ratio: f64);

    /// Borrow the 2D drawing context, if the surface provides one.
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;
}

/// Immediate-mode 2D drawing operations.
pub trait Context2d {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Draw a filled circle centered at (`x`, `y`).
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
}
