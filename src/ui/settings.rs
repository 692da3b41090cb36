use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::{
    app::{App, SettingsState, SettingsTab, View},
    form::Form,
    ui::{bold, dim},
};

const TABS: [SettingsTab; 2] = [SettingsTab::General, SettingsTab::Programs];

pub fn render_settings(app: &App, f: &mut Frame, area: Rect) {
    let View::Settings(state) = &app.view else {
        return;
    };

    let [tabs_area, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);
    let selected = TABS.iter().position(|t| *t == state.tab).unwrap_or(0);
    f.render_widget(
        Tabs::new(TABS.iter().map(|t| t.to_string()))
            .select(selected)
            .highlight_style(bold().fg(Color::Cyan))
            .block(Block::default().borders(Borders::BOTTOM)),
        tabs_area,
    );

    match state.tab {
        SettingsTab::General => render_general(state, f, body),
        SettingsTab::Programs => render_programs(app, state, f, body),
    }
}

/// One line per field; the field being edited gets a cursor
fn form_lines(form: &Form) -> Vec<Line<'_>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let selected = idx == form.selected;
            let marker = if selected { "▶ " } else { "  " };
            let value_style = if selected && form.is_editing() {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if selected {
                bold().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let cursor = if selected && form.is_editing() { "▏" } else { "" };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<14}", field.label), dim()),
                Span::styled(format!("{}{cursor}", field.value), value_style),
            ])
        })
        .collect()
}

fn render_general(state: &SettingsState, f: &mut Frame, area: Rect) {
    let Some(form) = &state.profile else {
        f.render_widget(
            Paragraph::new(Span::styled("Settings could not be loaded.", bold().fg(Color::Red))),
            area,
        );
        return;
    };

    let mut lines = form_lines(form);
    lines.push(Line::from(""));
    let hint = if form.is_editing() {
        "Enter keep  Esc discard"
    } else {
        "↑/↓ field  Enter edit  s save  Tab programs"
    };
    lines.push(Line::from(Span::styled(hint, dim())));

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Profile ")),
        area,
    );
}

fn render_programs(app: &App, state: &SettingsState, f: &mut Frame, area: Rect) {
    let Some(catalog) = &app.catalog else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Workout programs could not be loaded.",
                bold().fg(Color::Red),
            )),
            area,
        );
        return;
    };
    let programs = &state.programs;

    let mut lines: Vec<Line> = catalog
        .iter()
        .enumerate()
        .map(|(idx, (id, program))| {
            if idx == programs.selected {
                Line::from(vec![
                    Span::styled(format!("▶ {}", program.name), bold().fg(Color::Cyan)),
                    Span::styled(format!("  ({id})"), dim()),
                ])
            } else {
                Line::from(format!("  {}", program.name))
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No programs", dim())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select  n new  e edit  d delete  Tab profile",
        dim(),
    )));
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Programs ")),
        area,
    );

    if let Some(editor) = &programs.editor {
        let title = if editor.id.is_some() { " Edit program " } else { " New program " };
        let mut lines = form_lines(&editor.form);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Enter edit field  s save  Esc close", dim())));
        let popup = centered(area, 60, 8);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
            popup,
        );
    }

    if let Some(id) = &programs.confirm_delete {
        let name = catalog.get(id).map_or(id.as_str(), |p| p.name.as_str());
        let popup = centered(area, 50, 5);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(vec![
                Line::from(format!("Delete \"{name}\"?")),
                Line::from(Span::styled("y confirm  any other key cancels", dim())),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
            popup,
        );
    }
}

/// A `width` x `height` box centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
