use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::{
    app::App,
    ledger::ProgressLedger,
    ui::{bold, dim, RenderContext},
    util::{days_ago, format_clock},
};

const CHART_DAYS: usize = 7;
const RECENT_ROWS: usize = 5;

fn card<'a>(title: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(value, bold().fg(color))),
        Line::from(Span::styled(title, dim())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
}

pub fn render_stats(app: &App, ctx: &RenderContext, f: &mut Frame, area: Rect) {
    let Some(ledger) = &app.ledger else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Progress could not be loaded.",
                bold().fg(Color::Red),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let [cards, summary, middle, recent] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Min(8),
        Constraint::Length(RECENT_ROWS as u16 + 3),
    ])
    .areas(area);

    render_cards(ledger, f, cards);

    let last = ledger
        .days_since_last(ctx.today)
        .map(days_ago)
        .unwrap_or_else(|| "never".to_string());
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Last workout: "),
            Span::styled(last, bold()),
            Span::raw(format!("   Completed this run: {}", app.timer_completions)),
        ])),
        summary,
    );

    let [chart, counts] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(middle);
    render_calorie_chart(ledger, f, chart);
    render_counts(ledger, f, counts);
    render_recent(ledger, f, recent);
}

fn render_cards(ledger: &ProgressLedger, f: &mut Frame, area: Rect) {
    let stats = &ledger.stats;
    let slots: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);
    let values = [
        ("Workouts", stats.total_workouts.to_string(), Color::Cyan),
        ("Calories", stats.total_calories.to_string(), Color::LightRed),
        ("Streak", format!("{} d", stats.streak), Color::Yellow),
        ("Best streak", format!("{} d", stats.best_streak), Color::Green),
    ];
    for ((title, value, color), slot) in values.into_iter().zip(slots) {
        f.render_widget(card(title, value, color), slot);
    }
}

fn render_calorie_chart(ledger: &ProgressLedger, f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Calories by day ");
    let days = ledger.calories_by_day(CHART_DAYS);
    if days.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No workouts yet", dim())).block(block),
            area,
        );
        return;
    }

    let labels: Vec<String> = days.iter().map(|(date, _)| date.format("%d/%m").to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&days)
        .map(|(label, (_, kcal))| (label.as_str(), u64::from(*kcal)))
        .collect();

    f.render_widget(
        BarChart::default()
            .block(block)
            .data(data.as_slice())
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::LightRed))
            .value_style(bold().fg(Color::Black).bg(Color::LightRed)),
        area,
    );
}

fn render_counts(ledger: &ProgressLedger, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ledger
        .workout_counts
        .iter()
        .map(|(kind, count)| Line::from(format!("{kind:<10} {count:>4}")))
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" By type ")),
        area,
    );
}

fn render_recent(ledger: &ProgressLedger, f: &mut Frame, area: Rect) {
    let rows: Vec<Row> = ledger
        .recent_history(RECENT_ROWS)
        .map(|r| {
            Row::new(vec![
                r.date.format("%Y-%m-%d").to_string(),
                r.program_name.clone(),
                r.duration_label.clone(),
                format!("{} kcal", r.calories),
                format_clock(r.elapsed_seconds),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Date", "Workout", "Length", "Burned", "Time"]).style(bold()))
        .block(Block::default().borders(Borders::ALL).title(" Recent "));
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use crate::app::Screen;
    use crate::ledger::CompletedWorkout;
    use crate::ui::test_support::*;
    use chrono::NaiveDate;

    fn workout(name: &str, calories: u32) -> CompletedWorkout {
        CompletedWorkout {
            program_name: name.to_string(),
            duration_label: "15 sec".to_string(),
            calories,
            elapsed_seconds: 15,
            exercise_count: 4,
        }
    }

    #[test]
    fn empty_ledger() {
        let (_dir, mut app) = seeded_app();
        app.navigate(Screen::Stats);
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Last workout: never"));
        assert!(content.contains("No workouts yet"));
        assert!(content.contains("HIIT"));
    }

    #[test]
    fn populated_ledger() {
        let (_dir, mut app) = seeded_app();
        let ledger = app.ledger.as_mut().unwrap();
        ledger.apply_completion(
            workout("HIIT Express", 20),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        );
        ledger.apply_completion(
            workout("Yoga Flow", 35),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        app.navigate(Screen::Stats);

        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Last workout: today"));
        assert!(content.contains("Yoga Flow"));
        assert!(content.contains("2 d"));
        assert!(content.contains("31/12"));
    }

    #[test]
    fn missing_progress_is_reported() {
        let (_dir, mut app) = seeded_app();
        app.ledger = None;
        app.navigate(Screen::Stats);
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Progress could not be loaded."));
    }
}
