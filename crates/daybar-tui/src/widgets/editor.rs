//! Single-line editor for a row's problem or solution text.

use daybar_engine::MarkerId;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Which annotation field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Problem,
    Solution,
}

impl EditField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Problem => "Problem",
            Self::Solution => "Solution",
        }
    }

    /// Placeholder shown in empty table cells.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Problem => "Enter problem",
            Self::Solution => "Enter solution",
        }
    }
}

/// Editing state: which row field, the buffer, and a cursor.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Marker whose row is being edited.
    pub marker: MarkerId,
    pub field: EditField,
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl EditorState {
    /// Start editing with existing text; the cursor goes to the end.
    pub fn new(marker: MarkerId, field: EditField, content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self {
            marker,
            field,
            content,
            cursor,
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(offset, _)| offset)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Consume the state, returning the edited text.
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Widget rendering the editor line: `Problem (row 2) > text|`.
pub struct EditorLine<'a> {
    state: &'a EditorState,
    ordinal: Option<usize>,
    theme: &'a Theme,
}

impl<'a> EditorLine<'a> {
    pub fn new(state: &'a EditorState, theme: &'a Theme) -> Self {
        Self {
            state,
            ordinal: None,
            theme,
        }
    }

    /// Row number shown in the prompt.
    #[must_use]
    pub fn ordinal(mut self, ordinal: Option<usize>) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl Widget for EditorLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prompt = match self.ordinal {
            Some(n) => format!("{} (row {n}) > ", self.state.field.label()),
            None => format!("{} ({}) > ", self.state.field.label(), self.state.marker),
        };

        let split = self.state.byte_offset(self.state.cursor);
        let (before, after) = self.state.content.split_at(split);
        let mut after_chars = after.chars();
        let under_cursor = after_chars.next().map_or(" ".to_string(), String::from);

        let line = Line::from(vec![
            Span::styled(prompt, Style::default().fg(self.theme.primary)),
            Span::styled(before.to_string(), Style::default().fg(self.theme.text)),
            Span::styled(
                under_cursor,
                Style::default()
                    .fg(self.theme.base)
                    .bg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                after_chars.as_str().to_string(),
                Style::default().fg(self.theme.text),
            ),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
