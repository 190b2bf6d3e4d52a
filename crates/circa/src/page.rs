//! The landing page content rendered over the circle field.

use std::time::{Duration, Instant};

use circa_config::PageContent;
use circa_core::{Rgba, ThemeVariant};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::reveal::{RevealEntry, RevealScope};

/// How long an element fades from dim to full color after entering.
const ENTRANCE_FADE: Duration = Duration::from_millis(350);

/// Opaque page background the circle colors are composited over.
pub fn background(variant: ThemeVariant) -> Rgba {
    match variant {
        ThemeVariant::Light => Rgba::gray(250, 1.0),
        ThemeVariant::Dark => Rgba::gray(10, 1.0),
    }
}

fn text_color(variant: ThemeVariant) -> Color {
    match variant {
        ThemeVariant::Light => Color::Rgb(35, 35, 35),
        ThemeVariant::Dark => Color::Rgb(225, 225, 225),
    }
}

fn muted_color(variant: ThemeVariant) -> Color {
    match variant {
        ThemeVariant::Light => Color::Rgb(130, 130, 130),
        ThemeVariant::Dark => Color::Rgb(110, 110, 110),
    }
}

fn accent_color(variant: ThemeVariant) -> Color {
    let lightness = match variant {
        ThemeVariant::Light => 0.45,
        ThemeVariant::Dark => 0.65,
    };
    Rgba::from_hsla(220.0, 0.7, lightness, 1.0).composite_over(background(variant))
}

/// Color of an element mid-entrance: dim before the fade finishes.
fn faded(target: Color, variant: ThemeVariant, progress: f64) -> Color {
    if progress >= 1.0 {
        return target;
    }

    let muted = muted_color(variant);
    let (Color::Rgb(tr, tg, tb), Color::Rgb(mr, mg, mb)) = (target, muted) else {
        return target;
    };

    let mix = |from: u8, to: u8| -> u8 {
        (from as f64 + (to as f64 - from as f64) * progress).round() as u8
    };
    Color::Rgb(mix(mr, tr), mix(mg, tg), mix(mb, tb))
}

/// The landing page: header, project listing and footer, each with a
/// staggered entrance.
#[derive(Debug)]
pub struct Page {
    content: PageContent,
    header_entry: RevealEntry,
    project_entries: Vec<RevealEntry>,
    footer_entry: RevealEntry,
}

impl Page {
    /// Build the page and schedule the entrances.
    pub fn new(content: PageContent) -> Self {
        let mut scope = RevealScope::new(Duration::from_millis(250), Duration::from_millis(50));

        let header_entry = scope.register();
        let project_entries = content.projects.iter().map(|_| scope.register()).collect();
        let footer_entry = scope.register_with(Duration::from_millis(100), Duration::ZERO);

        Self {
            content,
            header_entry,
            project_entries,
            footer_entry,
        }
    }

    /// Render the page over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, variant: ThemeVariant) {
        let now = Instant::now();
        let project_rows = self.content.projects.len() as u16;

        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1), // header
            Constraint::Length(1),
            Constraint::Length(project_rows),
            Constraint::Fill(1),
            Constraint::Length(1), // footer
            Constraint::Length(1), // key hints
        ])
        .split(area);

        self.render_header(frame, chunks[1], variant, now);
        self.render_projects(frame, chunks[3], variant, now);
        self.render_footer(frame, chunks[5], variant, now);
        self.render_hints(frame, chunks[6], variant);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, variant: ThemeVariant, now: Instant) {
        if !self.header_entry.visible(now) {
            return;
        }
        let progress = self.header_entry.fade_progress(now, ENTRANCE_FADE);

        let header = Paragraph::new(self.content.site_name.as_str())
            .style(Style::new().fg(faded(text_color(variant), variant, progress)).bold())
            .alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn render_projects(&self, frame: &mut Frame, area: Rect, variant: ThemeVariant, now: Instant) {
        let lines: Vec<Line> = self
            .content
            .projects
            .iter()
            .zip(&self.project_entries)
            .filter(|(_, entry)| entry.visible(now))
            .map(|(project, entry)| {
                let progress = entry.fade_progress(now, ENTRANCE_FADE);

                Line::from(vec![
                    Span::styled(
                        project.title.clone(),
                        Style::new()
                            .fg(faded(accent_color(variant), variant, progress))
                            .bold(),
                    ),
                    Span::styled(" - ", Style::new().fg(muted_color(variant))),
                    Span::styled(
                        project.description.clone(),
                        Style::new().fg(faded(text_color(variant), variant, progress)),
                    ),
                    Span::styled(
                        format!("  {}", project.url),
                        Style::new().fg(muted_color(variant)),
                    ),
                ])
            })
            .collect();

        let projects = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(projects, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, variant: ThemeVariant, now: Instant) {
        if !self.footer_entry.visible(now) {
            return;
        }
        let progress = self.footer_entry.fade_progress(now, ENTRANCE_FADE);

        let footer = Paragraph::new(self.content.footer.as_str())
            .style(Style::new().fg(faded(muted_color(variant), variant, progress)))
            .alignment(Alignment::Center);
        frame.render_widget(footer, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, variant: ThemeVariant) {
        let hints = Line::from(vec![
            Span::styled("q", Style::new().fg(accent_color(variant)).bold()),
            Span::styled(" quit  ", Style::new().fg(muted_color(variant))),
            Span::styled("d", Style::new().fg(accent_color(variant)).bold()),
            Span::styled(" toggle theme", Style::new().fg(muted_color(variant))),
        ])
        .centered();
        frame.render_widget(hints, area);
    }
}
