//! Top-level rendering of the app state.

use daybar_engine::{format_clock, format_duration};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{App, Focus, MessageLevel};
use crate::layout::AppLayout;
use crate::text::truncate_to_width;
use crate::widgets::{
    hints_for_focus, BarWidget, EditorLine, FooterHints, RowsTable, StatusBar, StatusBarContent,
};

/// Render the whole screen.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Style::default().bg(app.theme.base));

    if app.is_too_small() {
        render_too_small(app, area, buf);
        return;
    }

    let layout = AppLayout::new(area);
    let rows = app.model.rows();
    let selected_row = app.selected_row();

    let status = StatusBarContent::for_model(&app.model);
    StatusBar::new(&status, &app.theme).render(layout.status, buf);

    BarWidget::new(&app.model, &app.theme)
        .selected(Some(app.selected_marker))
        .focused(app.focus == Focus::Bar)
        .render(layout.bar, buf);

    render_sessions(app, layout.sessions, buf);

    RowsTable::new(&rows, &app.theme)
        .selected(selected_row)
        .offset(app.table_offset)
        .focused(app.focus == Focus::Table)
        .render(layout.table, buf);

    render_message(app, selected_row, layout.message, buf);

    let hints = hints_for_focus(app.focus, app.editor.is_some());
    let selection = match app.model.time_of(app.selected_marker) {
        Some(hour) => format!("{} {}", app.selected_marker, format_clock(hour)),
        None => app.selected_marker.to_string(),
    };
    FooterHints::new(&hints, &app.theme)
        .focus(app.focus)
        .selection(selection)
        .render(layout.footer, buf);
}

fn render_too_small(app: &App, area: Rect, buf: &mut Buffer) {
    let status = StatusBarContent::too_small();
    StatusBar::new(&status, &app.theme).render(Rect::new(area.x, area.y, area.width, 1), buf);

    if area.height > 2 {
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        Paragraph::new(format!("{}x{}", area.width, area.height))
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .render(middle, buf);
    }
}

/// `Session 1: 00:00 │ Session 2: 05:15 │ ...` in insertion order.
fn render_sessions(app: &App, area: Rect, buf: &mut Buffer) {
    let text = app
        .model
        .session_durations()
        .iter()
        .enumerate()
        .map(|(i, (_, minutes))| format!("Session {}: {}", i + 1, format_duration(*minutes)))
        .collect::<Vec<_>>()
        .join(" │ ");
    let text = truncate_to_width(&text, area.width as usize);
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(app.theme.subtext),
    )))
    .render(area, buf);
}

fn render_message(app: &App, selected_row: Option<usize>, area: Rect, buf: &mut Buffer) {
    if let Some(editor) = &app.editor {
        let ordinal = app
            .model
            .rows()
            .iter()
            .find(|row| row.marker == editor.marker)
            .map(|row| row.ordinal);
        EditorLine::new(editor, &app.theme)
            .ordinal(ordinal.or(selected_row.map(|i| i + 1)))
            .render(area, buf);
        return;
    }

    let (text, color) = match &app.message {
        Some(message) => {
            let color = match message.level {
                MessageLevel::Info => app.theme.success,
                MessageLevel::Warning => app.theme.warning,
                MessageLevel::Error => app.theme.error,
            };
            (message.text.clone(), color)
        }
        None => (
            "Click a row number to toggle lunch, double-click to flag".to_string(),
            app.theme.muted,
        ),
    };
    let text = truncate_to_width(&text, area.width as usize);
    Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))).render(area, buf);
}
