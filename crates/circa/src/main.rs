use std::io;
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    style::Color,
    symbols::Marker,
    widgets::canvas::Canvas,
};

use circa_config::Preferences;
use circa_core::ThemeState;
use circa_field::{CircleField, FieldConfig};

mod page;
mod reveal;
mod surface;

use page::Page;
use surface::BrailleSurface;

/// Target delay between animation frames.
const TICK_RATE: Duration = Duration::from_millis(33);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let preferences = match Preferences::load() {
        Ok(preferences) => preferences,
        Err(err) => {
            log::warn!("falling back to default preferences: {err}");
            Preferences::default()
        }
    };

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(From::from)
        .and_then(|()| run(terminal, preferences));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, preferences: Preferences) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(preferences, size.width, size.height)?;
    app.run(&mut terminal)
}

/// Circle field parameters tuned for braille-dot resolution, with the
/// user's preferences merged on top.
fn field_config(preferences: &Preferences) -> FieldConfig {
    let speed = preferences.speed.unwrap_or_default();

    let mut config = FieldConfig {
        animation_speed: 0.25 * speed.multiplier(),
        min_radius: 3.0,
        max_radius: 11.0,
        max_colored_radius: 6.0,
        base_density: 700.0,
        max_circles: 48,
        ..FieldConfig::default()
    };
    preferences.field.apply_to(&mut config);
    config
}

/// The landing card application: page content over the circle field.
struct App {
    /// Is the application running?
    running: bool,
    /// Shared observable theme, toggled with the `d` key.
    theme: ThemeState,
    /// The background simulation bound to the terminal surface.
    field: CircleField<BrailleSurface>,
    /// Foreground page content.
    page: Page,
}

impl App {
    fn new(preferences: Preferences, width: u16, height: u16) -> color_eyre::Result<Self> {
        let theme = ThemeState::new(preferences.theme.unwrap_or_default());

        let mut surface = BrailleSurface::new();
        surface.set_cell_size(width, height);
        surface.set_background(page::background(theme.get()));

        let field = CircleField::create(surface, field_config(&preferences), theme.clone())
            .map_err(|err| eyre!("failed to initialize circle field background: {err}"))?;

        Ok(Self {
            running: false,
            theme,
            field,
            page: Page::new(preferences.page),
        })
    }

    /// Run the application's main loop.
    fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        while self.running {
            self.field.advance_frame();
            terminal.draw(|frame| self.render(frame))?;

            self.handle_events(Instant::now() + TICK_RATE)?;

            // A theme toggle repaints right away instead of waiting for
            // the next tick.
            if self.field.sync_theme() {
                terminal.draw(|frame| self.render(frame))?;
            }
        }

        self.field.destroy();
        Ok(())
    }

    /// Render the background canvas and the page content.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let variant = self.theme.get();

        let background = page::background(variant);
        let surface = self.field.surface();

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(background.r, background.g, background.b))
            .x_bounds([0.0, surface.dot_width()])
            .y_bounds([0.0, surface.dot_height()])
            .paint(|ctx| surface.paint(ctx));
        frame.render_widget(canvas, area);

        self.page.render(frame, area, variant);
    }

    /// Dispatch crossterm events until the frame deadline.
    fn handle_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                return Ok(());
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => {
                    self.field.surface_mut().set_cell_size(width, height);
                    self.field.on_resize();
                }
                Event::FocusLost => self.field.pointer_left(),
                _ => {}
            }

            if !self.running || Instant::now() >= deadline {
                return Ok(());
            }
        }
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('d')) => self.toggle_theme(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let (x, y) = self.field.surface().dot_position(mouse.column, mouse.row);
                self.field.pointer_moved(x, y);
            }
            _ => {}
        }
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle();
        // Recomposite the translucent circle colors against the new
        // page background before the repaint.
        let background = page::background(self.theme.get());
        self.field.surface_mut().set_background(background);
    }

    fn quit(&mut self) {
        self.running = false;
    }
}
