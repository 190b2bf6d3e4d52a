//! The live circle field instance.

use std::cell::Cell;
use std::rc::Rc;

use circa_core::ThemeState;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::circle::Circle;
use crate::config::FieldConfig;
use crate::error::{DisposalError, FieldError};
use crate::physics::{self, PointerState};
use crate::placement;
use crate::surface::Surface;

type Cleanup = Box<dyn FnOnce() -> Result<(), DisposalError>>;

/// A circle field simulation bound to one drawing surface.
///
/// The field exclusively owns its circles and pointer state. It reads the
/// shared [`ThemeState`] on every render and subscribes to its changes so
/// a theme switch repaints without waiting for the next tick; the
/// subscription is released in [`CircleField::destroy`].
pub struct CircleField<S: Surface> {
    surface: S,
    config: FieldConfig,
    circles: Vec<Circle>,
    pointer: PointerState,
    width: f64,
    height: f64,
    rng: StdRng,
    theme: ThemeState,
    theme_dirty: Rc<Cell<bool>>,
    cleanup: Vec<Cleanup>,
    destroyed: bool,
}

impl<S: Surface> CircleField<S> {
    /// Bind a new field to `surface` and run the initial sizing, spawn
    /// and render.
    ///
    /// Fails with [`FieldError::ContextUnavailable`] when the surface
    /// cannot provide a 2D drawing context. A zero-area surface is not an
    /// error; spawning is deferred until the surface has a size.
    pub fn create(
        mut surface: S,
        config: FieldConfig,
        theme: ThemeState,
    ) -> Result<Self, FieldError> {
        if surface.context_2d().is_none() {
            return Err(FieldError::ContextUnavailable);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let theme_dirty = Rc::new(Cell::new(false));
        let dirty = Rc::clone(&theme_dirty);
        let subscription = theme.subscribe(move || dirty.set(true));

        let mut field = Self {
            surface,
            config,
            circles: Vec::new(),
            pointer: PointerState::default(),
            width: 0.0,
            height: 0.0,
            rng,
            theme,
            theme_dirty,
            cleanup: Vec::new(),
            destroyed: false,
        };

        field
            .cleanup
            .push(Box::new(move || {
                subscription.unsubscribe();
                Ok(())
            }));

        field.on_resize();
        field.ensure_spawned();
        field.render();

        Ok(field)
    }

    /// Re-read the surface layout size, rescale every circle position
    /// proportionally to the size change, and reset the backing buffer
    /// to match the surface pixel ratio.
    ///
    /// Safe to call before any circles exist and at any frequency; a
    /// zero-area layout only defers sizing.
    pub fn on_resize(&mut self) {
        if self.destroyed {
            return;
        }

        let (layout_width, layout_height) = self.surface.layout_size();

        let previous_width = match (self.width, layout_width) {
            (w, _) if w > 0.0 => w,
            (_, w) if w > 0.0 => w,
            _ => 1.0,
        };
        let previous_height = match (self.height, layout_height) {
            (h, _) if h > 0.0 => h,
            (_, h) if h > 0.0 => h,
            _ => 1.0,
        };

        self.width = layout_width;
        self.height = layout_height;

        if layout_width <= 0.0 || layout_height <= 0.0 {
            debug!("circle field sizing deferred: zero-area surface");
            return;
        }

        let scale_x = layout_width / previous_width;
        let scale_y = layout_height / previous_height;
        for circle in &mut self.circles {
            circle.x *= scale_x;
            circle.y *= scale_y;
        }

        let ratio = self.surface.pixel_ratio();
        self.surface.reset_backing(layout_width, layout_height, ratio);
    }

    /// Run one `update → render` frame. No-op once destroyed.
    pub fn advance_frame(&mut self) {
        if self.destroyed {
            return;
        }

        self.ensure_spawned();
        physics::step(
            &mut self.circles,
            &self.pointer,
            &self.config,
            self.width,
            self.height,
        );
        self.render();
    }

    /// Repaint once, without stepping, when the theme changed since the
    /// last render. Returns whether a repaint happened; otherwise the
    /// field stays idle between ticks.
    pub fn sync_theme(&mut self) -> bool {
        if self.destroyed || !self.theme_dirty.get() {
            return false;
        }
        self.render();
        true
    }

    /// Record a pointer position in surface-local coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.x = x;
        self.pointer.y = y;
        self.pointer.active = true;
    }

    /// Mark the pointer as having left the tracked region.
    pub fn pointer_left(&mut self) {
        self.pointer.active = false;
    }

    /// Tear the field down: run the cleanup handlers in registration
    /// order and drop the circle set.
    ///
    /// Idempotent; repeated calls are no-ops. A failing cleanup handler
    /// is logged and swallowed so the remaining handlers and the
    /// surrounding teardown still run.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        for cleanup in self.cleanup.drain(..) {
            if let Err(err) = cleanup() {
                warn!("circle field teardown: {err}");
            }
        }

        self.circles.clear();
    }

    /// Whether [`CircleField::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Read-only view of the current circle set.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// The current pointer record.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The current surface-local size the field simulates in.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The configuration this field was created with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The drawing surface the field is bound to.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface, for adapters that track
    /// external layout changes.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn ensure_spawned(&mut self) {
        if !self.circles.is_empty() {
            return;
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            self.on_resize();
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        self.circles =
            placement::spawn_circles(self.width, self.height, &self.config, &mut self.rng);
    }

    fn render(&mut self) {
        self.theme_dirty.set(false);
        let variant = self.theme.get();

        let Some(context) = self.surface.context_2d() else {
            return;
        };

        context.clear();
        for circle in &self.circles {
            context.fill_circle(
                circle.x,
                circle.y,
                circle.radius,
                *circle.color.get(variant),
            );
        }
    }

    #[cfg(test)]
    fn push_cleanup(&mut self, cleanup: Cleanup) {
        self.cleanup.push(cleanup);
    }
}

impl<S: Surface> Drop for CircleField<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circa_core::{Rgba, ThemeVariant};
    use crate::surface::Context2d;

    /// Headless surface recording draw calls.
    struct StubSurface {
        width: f64,
        height: f64,
        ratio: f64,
        backing: Option<(f64, f64, f64)>,
        clears: usize,
        fills: Vec<(f64, f64, f64, Rgba)>,
        has_context: bool,
    }

    impl StubSurface {
        fn sized(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ratio: 1.0,
                backing: None,
                clears: 0,
                fills: Vec::new(),
                has_context: true,
            }
        }

        fn without_context() -> Self {
            Self {
                has_context: false,
                ..Self::sized(100.0, 100.0)
            }
        }
    }

    impl Surface for StubSurface {
        fn layout_size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn pixel_ratio(&self) -> f64 {
            self.ratio
        }

        fn reset_backing(&mut self, width: f64, height: f64, pixel_ratio: f64) {
            self.backing = Some((width, height, pixel_ratio));
        }

        fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
            if self.has_context {
                Some(self)
            } else {
                None
            }
        }
    }

    impl Context2d for StubSurface {
        fn clear(&mut self) {
            self.clears += 1;
            self.fills.clear();
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
            self.fills.push((x, y, radius, color));
        }
    }

    fn seeded_config() -> FieldConfig {
        FieldConfig {
            seed: Some(99),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn create_fails_without_a_drawing_context() {
        let result = CircleField::create(
            StubSurface::without_context(),
            seeded_config(),
            ThemeState::default(),
        );
        assert!(matches!(result, Err(FieldError::ContextUnavailable)));
    }

    #[test]
    fn create_spawns_sizes_and_renders() {
        let field = CircleField::create(
            StubSurface::sized(800.0, 600.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        assert!(!field.circles().is_empty());
        assert_eq!(field.size(), (800.0, 600.0));
        assert_eq!(field.surface().backing, Some((800.0, 600.0, 1.0)));
        assert_eq!(field.surface().fills.len(), field.circles().len());
    }

    #[test]
    fn zero_area_surface_defers_spawning() {
        let mut field = CircleField::create(
            StubSurface::sized(0.0, 0.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        assert!(field.circles().is_empty());

        // The surface gains a size; the next frame spawns.
        field.surface_mut().width = 640.0;
        field.surface_mut().height = 480.0;
        field.advance_frame();

        assert!(!field.circles().is_empty());
        assert_eq!(field.size(), (640.0, 480.0));
    }

    #[test]
    fn resize_rescales_positions_proportionally() {
        let mut field = CircleField::create(
            StubSurface::sized(400.0, 300.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        let before: Vec<(f64, f64)> = field.circles().iter().map(|c| (c.x, c.y)).collect();

        field.surface_mut().width = 800.0;
        field.surface_mut().height = 900.0;
        field.on_resize();

        for (circle, (x, y)) in field.circles().iter().zip(&before) {
            assert!((circle.x - x * 2.0).abs() < 1e-9);
            assert!((circle.y - y * 3.0).abs() < 1e-9);
        }
        assert_eq!(field.surface().backing, Some((800.0, 900.0, 1.0)));
    }

    #[test]
    fn destroy_is_idempotent_and_runs_cleanups_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let theme = ThemeState::default();
        let mut field =
            CircleField::create(StubSurface::sized(400.0, 300.0), seeded_config(), theme.clone())
                .unwrap();

        let runs = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&runs);
        field.push_cleanup(Box::new(move || {
            counter.set(counter.get() + 1);
            Ok(())
        }));

        assert_eq!(theme.listener_count(), 1);

        field.destroy();
        assert!(field.is_destroyed());
        assert!(field.circles().is_empty());
        assert_eq!(runs.get(), 1);
        assert_eq!(theme.listener_count(), 0);

        field.destroy();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn failing_cleanup_is_swallowed() {
        let mut field = CircleField::create(
            StubSurface::sized(400.0, 300.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        use std::cell::Cell;
        use std::rc::Rc;
        let later_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&later_ran);

        field.push_cleanup(Box::new(|| Err(DisposalError::new("listener removal"))));
        field.push_cleanup(Box::new(move || {
            flag.set(true);
            Ok(())
        }));

        field.destroy();
        assert!(later_ran.get());
    }

    #[test]
    fn frames_after_destroy_are_no_ops() {
        let mut field = CircleField::create(
            StubSurface::sized(400.0, 300.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        field.destroy();
        let clears = field.surface().clears;

        field.advance_frame();
        field.on_resize();
        assert_eq!(field.surface().clears, clears);
    }

    #[test]
    fn theme_change_triggers_one_extra_render() {
        let theme = ThemeState::new(ThemeVariant::Dark);
        let mut field =
            CircleField::create(StubSurface::sized(400.0, 300.0), seeded_config(), theme.clone())
                .unwrap();

        let clears = field.surface().clears;

        // Idle: nothing changed, nothing repaints.
        assert!(!field.sync_theme());
        assert_eq!(field.surface().clears, clears);

        theme.set(ThemeVariant::Light);
        assert!(field.sync_theme());
        assert_eq!(field.surface().clears, clears + 1);

        // Consumed: a second sync stays idle.
        assert!(!field.sync_theme());
        assert_eq!(field.surface().clears, clears + 1);
    }

    #[test]
    fn render_uses_the_color_of_the_active_theme() {
        let theme = ThemeState::new(ThemeVariant::Dark);
        let mut field =
            CircleField::create(StubSurface::sized(400.0, 300.0), seeded_config(), theme.clone())
                .unwrap();

        let dark_first = field.surface().fills[0].3;
        assert_eq!(dark_first, field.circles()[0].color.dark);

        theme.set(ThemeVariant::Light);
        field.sync_theme();

        let light_first = field.surface().fills[0].3;
        assert_eq!(light_first, field.circles()[0].color.light);
    }

    #[test]
    fn pointer_events_mutate_only_the_pointer_record() {
        let mut field = CircleField::create(
            StubSurface::sized(400.0, 300.0),
            seeded_config(),
            ThemeState::default(),
        )
        .unwrap();

        field.pointer_moved(120.0, 80.0);
        assert!(field.pointer().active);
        assert_eq!((field.pointer().x, field.pointer().y), (120.0, 80.0));

        field.pointer_left();
        assert!(!field.pointer().active);
        assert_eq!((field.pointer().x, field.pointer().y), (120.0, 80.0));
    }
}
