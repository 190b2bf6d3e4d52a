//! Braille-resolution terminal surface for the circle field.
//!
//! The field draws into a command buffer between terminal frames; the
//! canvas paint closure replays it. Surface-local coordinates are braille
//! dots (2×4 per terminal cell) with the origin at the top-left, so the
//! paint pass flips the y axis into canvas space.

use circa_core::Rgba;
use circa_field::{Context2d, Surface};
use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Painter, Shape};

/// Horizontal braille dots per terminal cell.
pub const DOTS_PER_CELL_X: f64 = 2.0;
/// Vertical braille dots per terminal cell.
pub const DOTS_PER_CELL_Y: f64 = 4.0;

/// One buffered draw command, already composited to an opaque color.
#[derive(Debug, Clone, Copy)]
struct CircleOp {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
}

/// Drawing surface backed by the ratatui braille canvas.
#[derive(Debug)]
pub struct BrailleSurface {
    cell_width: u16,
    cell_height: u16,
    backing_width: f64,
    backing_height: f64,
    pixel_ratio: f64,
    background: Rgba,
    ops: Vec<CircleOp>,
}

impl BrailleSurface {
    pub fn new() -> Self {
        Self {
            cell_width: 0,
            cell_height: 0,
            backing_width: 0.0,
            backing_height: 0.0,
            pixel_ratio: 1.0,
            background: Rgba::gray(0, 1.0),
            ops: Vec::new(),
        }
    }

    /// Track the terminal size in cells.
    pub fn set_cell_size(&mut self, width: u16, height: u16) {
        self.cell_width = width;
        self.cell_height = height;
    }

    /// Set the opaque page background the translucent circle colors are
    /// composited over.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// Surface width in braille dots.
    pub fn dot_width(&self) -> f64 {
        self.cell_width as f64 * DOTS_PER_CELL_X
    }

    /// Surface height in braille dots.
    pub fn dot_height(&self) -> f64 {
        self.cell_height as f64 * DOTS_PER_CELL_Y
    }

    /// Surface-local position of a pointer event at a terminal cell.
    pub fn dot_position(&self, column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * DOTS_PER_CELL_X,
            (row as f64 + 0.5) * DOTS_PER_CELL_Y,
        )
    }

    /// Replay the buffered circles into a canvas paint pass.
    pub fn paint(&self, ctx: &mut Context<'_>) {
        let height = self.dot_height();
        for op in &self.ops {
            ctx.draw(&FilledCircle {
                x: op.x,
                y: height - op.y,
                radius: op.radius,
                color: op.color,
            });
        }
    }

    #[cfg(test)]
    fn op_count(&self) -> usize {
        self.ops.len()
    }
}

impl Default for BrailleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for BrailleSurface {
    fn layout_size(&self) -> (f64, f64) {
        (self.dot_width(), self.dot_height())
    }

    // Canvas coordinates are already dot-resolution.
    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn reset_backing(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        self.backing_width = width * pixel_ratio;
        self.backing_height = height * pixel_ratio;
        self.ops.clear();
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        Some(self)
    }
}

impl Context2d for BrailleSurface {
    fn clear(&mut self) {
        self.ops.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ops.push(CircleOp {
            x,
            y,
            radius,
            color: color.composite_over(self.background),
        });
    }
}

/// A filled circle shape for the braille canvas.
#[derive(Debug, Clone, Copy)]
pub struct FilledCircle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl Shape for FilledCircle {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        // Canvas bounds are dot units, so stepping by one dot visits
        // every point of the disc.
        let radius = self.radius;
        let mut dy = -radius;
        while dy <= radius {
            let span = (radius * radius - dy * dy).sqrt();
            let mut dx = -span;
            while dx <= span {
                if let Some((px, py)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(px, py, self.color);
                }
                dx += 1.0;
            }
            dy += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_size_is_dot_resolution() {
        let mut surface = BrailleSurface::new();
        surface.set_cell_size(80, 24);
        assert_eq!(surface.layout_size(), (160.0, 96.0));
    }

    #[test]
    fn pointer_cells_map_to_dot_centers() {
        let mut surface = BrailleSurface::new();
        surface.set_cell_size(80, 24);
        assert_eq!(surface.dot_position(0, 0), (1.0, 2.0));
        assert_eq!(surface.dot_position(10, 5), (21.0, 22.0));
    }

    #[test]
    fn fill_composites_over_the_background() {
        let mut surface = BrailleSurface::new();
        surface.set_cell_size(80, 24);
        surface.set_background(Rgba::gray(0, 1.0));

        surface.fill_circle(10.0, 10.0, 3.0, Rgba::gray(100, 0.5));
        assert_eq!(surface.op_count(), 1);
        assert_eq!(surface.ops[0].color, Color::Rgb(50, 50, 50));
    }

    #[test]
    fn clear_and_reset_drop_buffered_commands() {
        let mut surface = BrailleSurface::new();
        surface.set_cell_size(80, 24);
        surface.fill_circle(10.0, 10.0, 3.0, Rgba::gray(100, 1.0));

        surface.clear();
        assert_eq!(surface.op_count(), 0);

        surface.fill_circle(10.0, 10.0, 3.0, Rgba::gray(100, 1.0));
        surface.reset_backing(160.0, 96.0, 1.0);
        assert_eq!(surface.op_count(), 0);
        assert_eq!(surface.backing_width, 160.0);
        assert_eq!(surface.backing_height, 96.0);
    }
}
