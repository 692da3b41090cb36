use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Gauge, Paragraph, Wrap,
    },
    Frame,
};

use crate::{
    app::{App, View},
    color::{dash_offset, ring_phase, timer_pulse_color, RING_COUNT},
    ui::{bold, dim, to_color, RenderContext},
    util::{format_clock, truncate_to_width},
};

const BASE_RING_RADIUS: f64 = 14.0;
const DASH_PATTERN: &str = "━━━━━━━━━━          ";

fn unavailable(f: &mut Frame, area: Rect, what: &str) {
    let msg = Paragraph::new(vec![
        Line::from(Span::styled(format!("The {what} could not be loaded."), bold().fg(Color::Red))),
        Line::from(Span::styled("Check the log file for details.", dim())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(msg, area);
}

pub fn render_catalog(app: &App, f: &mut Frame, area: Rect) {
    let View::Catalog(state) = &app.view else {
        return;
    };
    let Some(catalog) = &app.catalog else {
        unavailable(f, area, "workout catalog");
        return;
    };

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let name_width = list_area.width.saturating_sub(6) as usize;
    let programs: Vec<Line> = catalog
        .iter()
        .enumerate()
        .map(|(idx, (_, program))| {
            let name = truncate_to_width(&program.name, name_width);
            if idx == state.program {
                Line::from(Span::styled(format!("▶ {name}"), bold().fg(Color::Cyan)))
            } else {
                Line::from(format!("  {name}"))
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(programs).block(Block::default().borders(Borders::ALL).title(" Programs ")),
        list_area,
    );

    let Some((_, program)) = catalog.get_index(state.program) else {
        f.render_widget(
            Paragraph::new("No programs yet. Add one under Settings → Programs.")
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL)),
            detail_area,
        );
        return;
    };

    let durations: Vec<Span> = program
        .durations
        .iter()
        .enumerate()
        .flat_map(|(idx, d)| {
            let style = if idx == state.duration {
                bold().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Green)
            };
            [Span::styled(format!(" {} ", d.name), style), Span::raw(" ")]
        })
        .collect();

    let mut lines = vec![
        Line::from(Span::styled(program.name.as_str(), bold())),
        Line::from(Span::styled(program.description.as_str(), dim())),
        Line::from(""),
        Line::from(durations),
    ];
    if let Some(d) = program.durations.get(state.duration) {
        lines.push(Line::from(format!("≈ {} kcal", d.calories)));
    }
    if !program.exercises.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Exercises", bold())));
        lines.extend(program.exercises.iter().map(|ex| {
            let label = ex
                .as_str()
                .map(str::to_string)
                .or_else(|| ex.get("name").and_then(|n| n.as_str()).map(str::to_string))
                .unwrap_or_else(|| ex.to_string());
            Line::from(format!(" • {label}"))
        }));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ program  ←/→ duration  Enter start",
        dim(),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL)),
        detail_area,
    );
}

/// `DASH_PATTERN` rotated left by `offset` characters
fn dashes(offset: usize, width: usize) -> String {
    let pattern: Vec<char> = DASH_PATTERN.chars().collect();
    (0..width)
        .map(|i| pattern[(i + offset) % pattern.len()])
        .collect()
}

pub fn render_session(app: &App, ctx: &RenderContext, f: &mut Frame, area: Rect) {
    let View::Session(session) = &app.view else {
        return;
    };
    let secs = session.animation_secs(ctx.now);

    let [header, rings, clock, gauge, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(session.program.name.as_str(), bold()),
            Span::styled(format!("  {}", session.duration.name), dim()),
        ]))
        .alignment(Alignment::Center),
        header,
    );

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-50.0, 50.0])
        .y_bounds([-30.0, 30.0])
        .paint(move |c| {
            for idx in 0..RING_COUNT {
                let ring = ring_phase(secs, idx);
                c.draw(&Circle {
                    x: ring.orbit_offset_x,
                    y: ring.orbit_offset_y,
                    radius: BASE_RING_RADIUS * ring.radius_scale,
                    color: to_color(ring.color()),
                });
            }
        });
    f.render_widget(canvas, rings);

    let timer = &session.timer;
    let mut clock_line = vec![Span::styled(
        format_clock(timer.remaining_seconds()),
        bold().fg(to_color(timer_pulse_color(secs))),
    )];
    if !timer.is_running() {
        clock_line.push(Span::styled(
            "  PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ));
    }
    f.render_widget(
        Paragraph::new(vec![
            Line::from(clock_line),
            Line::from(Span::styled(
                dashes(dash_offset(secs), clock.width as usize),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center),
        clock,
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(timer.progress().clamp(0.0, 1.0))
            .label(format!(
                "{} / {}",
                format_clock(timer.elapsed_seconds()),
                format_clock(timer.total_seconds())
            )),
        gauge,
    );

    let hint = if timer.is_running() {
        "Space pause  Esc abandon"
    } else {
        "Space resume  Esc abandon"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, dim())).alignment(Alignment::Center),
        footer,
    );
}

pub fn render_completed(app: &App, f: &mut Frame, area: Rect) {
    let View::Completed(done) = &app.view else {
        return;
    };
    let workout = &done.workout;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Workout complete!", bold().fg(Color::Green))),
        Line::from(""),
        Line::from(format!("{}  ·  {}", workout.program_name, workout.duration_label)),
        Line::from(format!(
            "{} kcal  ·  {} active",
            workout.calories,
            format_clock(workout.elapsed_seconds)
        )),
    ];
    match (&done.record, &app.ledger) {
        (Some(_), Some(ledger)) => {
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Streak: {} day(s)  ·  Best: {}",
                ledger.stats.streak, ledger.stats.best_streak
            )));
            lines.push(Line::from(format!(
                "Total workouts: {}",
                ledger.stats.total_workouts
            )));
        }
        _ => lines.push(Line::from(Span::styled(
            "This workout was not recorded.",
            bold().fg(Color::Red),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Enter back to programs", dim())));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::ui::test_support::*;
    use chrono::NaiveDate;
    use std::time::Instant;

    #[test]
    fn dashes_rotate() {
        assert_eq!(dashes(0, 3), "━━━");
        assert_eq!(dashes(10, 3), "   ");
        assert_eq!(dashes(9, 2), "━ ");
    }

    #[test]
    fn catalog_lists_programs_and_durations() {
        let (_dir, app) = seeded_app();
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("HIIT Express"));
        assert!(content.contains("Yoga Flow"));
        assert!(content.contains("15 sec"));
        assert!(content.contains("Burpees"));
    }

    #[test]
    fn catalog_failure_is_shown() {
        let (_dir, mut app) = seeded_app();
        app.catalog = None;
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("could not be loaded"));
    }

    #[test]
    fn session_shows_countdown() {
        let (_dir, mut app) = seeded_app();
        app.start_session(Instant::now()).unwrap();
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("00:15"));
        assert!(content.contains("Space pause"));
    }

    #[test]
    fn completion_summary() {
        let (_dir, mut app) = seeded_app();
        app.start_session(Instant::now()).unwrap();
        app.apply_ticks(15, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(app.view.screen(), Screen::Workout);
        // particles land at random cells and could cover the summary
        if let View::Completed(done) = &mut app.view {
            done.celebration.is_active = false;
        }

        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Workout complete!"));
        assert!(content.contains("Streak: 1"));
    }
}
