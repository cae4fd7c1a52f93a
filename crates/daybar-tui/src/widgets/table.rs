//! The rows table: one line per derived row.
//!
//! Columns: `No │ Problem │ Solution │ Time Range │ Duration`.

use daybar_engine::Row;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::layout::row_columns;
use crate::text::pad_to_width;
use crate::theme::Theme;
use crate::widgets::editor::EditField;

const HEADERS: [&str; 5] = ["No", "Problem", "Solution", "Time Range", "Duration"];

/// Marker appended to the ordinal of a lunch row.
pub const LUNCH_GLYPH: &str = "🍽";

/// Adjust a scroll offset so `selected` is within `visible` lines.
///
/// The offset only moves when the selection would leave the window.
pub fn keep_visible(offset: usize, selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < offset {
        return selected;
    }
    if selected >= offset + visible {
        return selected + 1 - visible;
    }
    offset
}

/// Widget rendering derived rows.
pub struct RowsTable<'a> {
    rows: &'a [Row],
    theme: &'a Theme,
    selected: Option<usize>,
    offset: usize,
    focused: bool,
}

impl<'a> RowsTable<'a> {
    pub fn new(rows: &'a [Row], theme: &'a Theme) -> Self {
        Self {
            rows,
            theme,
            selected: None,
            offset: 0,
            focused: false,
        }
    }

    /// First row to show.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn row_style(&self, row: &Row, selected: bool) -> Style {
        let mut style = Style::default().fg(self.theme.text);
        if row.lunch_break {
            style = style.fg(self.theme.warning);
        }
        if row.flagged {
            style = style.fg(self.theme.error).add_modifier(Modifier::BOLD);
        }
        if selected {
            let bg = if self.focused {
                self.theme.overlay
            } else {
                self.theme.surface
            };
            style = style.bg(bg);
        }
        style
    }

    fn render_row(&self, row: &Row, y: u16, inner: Rect, selected: bool, buf: &mut Buffer) {
        let style = self.row_style(row, selected);
        if selected {
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
        }

        let ordinal = if row.lunch_break {
            format!("{} {LUNCH_GLYPH}", row.ordinal)
        } else {
            row.ordinal.to_string()
        };
        let placeholder = Style::default().fg(self.theme.muted);
        let text_cell = |text: &str, field: EditField| {
            if text.is_empty() {
                (field.placeholder().to_string(), style.patch(placeholder))
            } else {
                (text.to_string(), style)
            }
        };

        let cells = [
            (ordinal, style),
            text_cell(&row.problem, EditField::Problem),
            text_cell(&row.solution, EditField::Solution),
            (row.time_range.clone(), style),
            (row.duration.clone(), style),
        ];

        for (column, (text, cell_style)) in row_columns(inner, y).iter().zip(cells) {
            let text = pad_to_width(&text, column.width as usize);
            buf.set_string(column.x, y, text, cell_style);
        }
    }
}

impl Widget for RowsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Rows ({}) ", self.rows.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let header = Style::default()
            .fg(self.theme.subtext)
            .add_modifier(Modifier::BOLD);
        for (column, title) in row_columns(inner, inner.y).iter().zip(HEADERS) {
            buf.set_string(
                column.x,
                inner.y,
                pad_to_width(title, column.width as usize),
                header,
            );
        }

        let visible = inner.height.saturating_sub(1) as usize;
        if self.rows.is_empty() {
            if visible > 0 {
                buf.set_string(
                    inner.x,
                    inner.y + 1,
                    "No rows",
                    Style::default().fg(self.theme.muted),
                );
            }
            return;
        }

        let offset = match self.selected {
            Some(selected) => keep_visible(self.offset, selected, visible),
            None => self.offset.min(self.rows.len() - 1),
        };
        for (line, (index, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + 1 + line as u16;
            self.render_row(row, y, inner, self.selected == Some(index), buf);
        }
    }
}
