//! Footer hints widget.
//!
//! Format: `Bar │ #2 12:15            [←/→] move │ [b] lunch │ [Tab] focus`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::Focus;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Ctrl+E").
    pub key: String,
    /// The action description (e.g., "focus", "copy").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer widget: focus and selection on the left, hints right-aligned.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    focus: Option<Focus>,
    selection: Option<String>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            focus: None,
            selection: None,
        }
    }

    /// Set focused pane to display.
    #[must_use]
    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Set the selection summary to display.
    #[must_use]
    pub fn selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }
}

/// Hints for the focused pane.
pub fn hints_for_focus(focus: Focus, editing: bool) -> Vec<KeyHint> {
    if editing {
        return vec![
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ];
    }

    match focus {
        Focus::Bar => vec![
            KeyHint::new("←/→", "move"),
            KeyHint::new("a/x", "add/remove"),
            KeyHint::new("y", "copy"),
            KeyHint::new("Tab", "focus"),
            KeyHint::new("q", "quit"),
        ],
        Focus::Table => vec![
            KeyHint::new("p/s", "edit"),
            KeyHint::new("b", "lunch"),
            KeyHint::new("f", "flag"),
            KeyHint::new("y", "copy"),
            KeyHint::new("Tab", "focus"),
        ],
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(focus) = self.focus {
            left_spans.push(Span::styled(
                focus.label(),
                Style::default().fg(self.theme.primary),
            ));
        }

        if let Some(ref selection) = self.selection {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            left_spans.push(Span::styled(
                selection.clone(),
                Style::default().fg(self.theme.subtext),
            ));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(widget: FooterHints<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..width)
            .map(|x| buf.cell((x, 0)).map_or(" ", |c| c.symbol()).to_string())
            .collect()
    }

    #[test]
    fn test_hints_depend_on_focus() {
        let bar = hints_for_focus(Focus::Bar, false);
        let table = hints_for_focus(Focus::Table, false);
        assert!(bar.iter().any(|h| h.action == "move"));
        assert!(table.iter().any(|h| h.action == "lunch"));
        assert!(!bar.iter().any(|h| h.action == "lunch"));
    }

    #[test]
    fn test_editing_hints() {
        let hints = hints_for_focus(Focus::Table, true);
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0].key, "Enter");
    }

    #[test]
    fn test_hints_right_aligned() {
        let theme = Theme::default();
        let hints = vec![KeyHint::new("q", "quit")];
        let line = render_line(
            FooterHints::new(&hints, &theme).focus(Focus::Bar).selection("#1"),
            40,
        );
        assert!(line.starts_with("Bar │ #1"));
        assert!(line.ends_with("[q] quit"));
    }
}
