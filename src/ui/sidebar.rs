use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    app::{App, Screen},
    ui::{bold, dim, to_color},
    util::truncate_to_width,
};

pub const LOGO: &str = "FITNESS PRO";

const NAV: [(char, Screen); 3] = [
    ('1', Screen::Workout),
    ('2', Screen::Stats),
    ('3', Screen::Settings),
];

pub fn render(app: &App, f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::RIGHT);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [logo, nav, user, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(NAV.len() as u16 + 1),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(Span::styled(LOGO, bold().fg(to_color(app.logo.color())))),
        logo,
    );

    let current = app.view.screen();
    let items: Vec<Line> = NAV
        .iter()
        .map(|(key, screen)| {
            let style = if *screen == current {
                bold().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {key} {screen:<12}"), style))
        })
        .collect();
    f.render_widget(Paragraph::new(items), nav);

    let width = inner.width.saturating_sub(4) as usize;
    let mut lines = match &app.settings {
        Some(settings) => vec![
            Line::from(vec![
                Span::styled(format!("({}) ", settings.user.initials()), bold().fg(Color::Cyan)),
                Span::styled(truncate_to_width(&settings.user.name, width), bold()),
            ]),
            Line::from(Span::styled(settings.user.summary(), dim())),
        ],
        None => vec![Line::from(Span::styled("profile unavailable", dim()))],
    };
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Sessions this run: {}", app.timer_completions)));
    f.render_widget(Paragraph::new(lines), user);

    f.render_widget(Paragraph::new(Span::styled("q quit  ^C exit", dim())), footer);
}
