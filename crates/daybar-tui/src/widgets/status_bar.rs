//! Status bar widget for the top of the TUI.
//!
//! Format: `● daybar │ 07:00-17:30 │ 3 markers │ 2 rows │ total 10:00 │ boundary`

use daybar_engine::{format_clock, format_duration, TimelineModel, MAX_MARKERS};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::theme::Theme;

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Leading label.
    pub title: String,
    /// Visible range, e.g. `07:00-17:30`.
    pub range: Option<String>,
    /// Marker count, e.g. `3/10 markers`.
    pub markers: Option<String>,
    /// Row count and total duration.
    pub metric: Option<String>,
    /// First-row policy label.
    pub policy: Option<String>,
    /// Trailing hint.
    pub hint: Option<String>,
}

impl StatusBarContent {
    /// Summarize a model.
    pub fn for_model(model: &TimelineModel) -> Self {
        let range = model.range();
        let rows = model.rows().len();
        Self {
            title: "daybar".into(),
            range: Some(format!(
                "{}-{}",
                format_clock(range.min_hour),
                format_clock(range.max_hour)
            )),
            markers: Some(format!("{}/{MAX_MARKERS} markers", model.len())),
            metric: Some(format!(
                "{rows} rows │ total {}",
                format_duration(model.total_minutes())
            )),
            policy: Some(model.policy().label().into()),
            hint: None,
        }
    }

    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            title: "Terminal too small".into(),
            hint: Some(format!("Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}")),
            ..Self::default()
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget.
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme) -> Self {
        Self { content, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = || Span::styled(" │ ", Style::default().fg(self.theme.muted));
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(self.theme.primary)),
            Span::styled(&self.content.title, Style::default().fg(self.theme.text)),
        ];

        if let Some(ref range) = self.content.range {
            spans.push(separator());
            spans.push(Span::styled(range, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref markers) = self.content.markers {
            spans.push(separator());
            spans.push(Span::styled(markers, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref metric) = self.content.metric {
            spans.push(separator());
            spans.push(Span::styled(metric, Style::default().fg(self.theme.info)));
        }

        if let Some(ref policy) = self.content.policy {
            spans.push(separator());
            spans.push(Span::styled(policy, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref hint) = self.content.hint {
            spans.push(separator());
            spans.push(Span::styled(
                format!("→ {hint}"),
                Style::default().fg(self.theme.secondary),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
