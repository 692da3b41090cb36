pub mod screen;
pub mod settings;
pub mod sidebar;
pub mod stats;
pub mod workout;

use std::time::Instant;

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::{
    app::{App, StatusKind, View},
    celebration::Celebration,
    color::Rgb,
};

use self::screen::current_screen;

const SIDEBAR_WIDTH: u16 = 24;

/// Clock readings shared by every screen during one draw
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: Instant,
    pub today: NaiveDate,
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Draw the whole frame: sidebar, the active view and the status line
pub fn draw(app: &App, ctx: &RenderContext, f: &mut Frame) {
    let [side, main] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .areas(f.area());
    let [body, status] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(main);

    sidebar::render(app, f, side);
    current_screen(&app.view).render(app, ctx, f, body);
    render_status(app, f, status);

    if let View::Completed(done) = &app.view {
        if done.celebration.is_active {
            let area = f.area();
            render_celebration(&done.celebration, area, f.buffer_mut());
        }
    }
}

fn render_status(app: &App, f: &mut Frame, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => Style::default().fg(Color::Green),
        StatusKind::Error => bold().fg(Color::Red),
    };
    f.render_widget(Paragraph::new(Span::styled(status.text.as_str(), style)), area);
}

/// Paint celebration particles straight into the buffer, on top of whatever is there
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let alpha = 1.0 - (particle.age / particle.max_age).min(1.0);
        let mut style = Style::default().fg(to_color(particle.color()));
        if particle.is_letter() || alpha > 0.6 {
            style = style.add_modifier(Modifier::BOLD);
        } else if alpha < 0.3 {
            style = style.add_modifier(Modifier::DIM);
        }

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::storage::DataDir;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    pub fn seeded_app() -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        data.seed_defaults().unwrap();
        (dir, App::load(data))
    }

    pub fn ctx() -> RenderContext {
        RenderContext {
            now: Instant::now(),
            today: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    /// Render `app` and flatten the buffer into one string
    pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(app, &ctx(), f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::app::Status;

    #[test]
    fn renders_status_line() {
        let (_dir, mut app) = seeded_app();
        app.status = Some(Status {
            kind: StatusKind::Error,
            text: "disk full".into(),
        });
        let content = render_to_string(&app, 100, 30);
        assert!(content.contains("disk full"));
    }

    #[test]
    fn celebration_particles_stay_in_bounds() {
        let mut celebration = Celebration::new();
        celebration.start(40, 12);
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);

        render_celebration(&celebration, area, &mut buf);
        assert_eq!(*buf.area(), area);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (_dir, app) = seeded_app();
        render_to_string(&app, 10, 4);
    }
}
