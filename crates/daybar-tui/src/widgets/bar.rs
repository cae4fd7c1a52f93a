//! The day bar: time ruler, colored strip, and marker glyphs.

use daybar_engine::{format_clock, MarkerId, TimelineModel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::layout::BarGeometry;
use crate::theme::Theme;

/// Glyph for a filled strip cell.
const FILLED: &str = "█";
/// Glyph for strip cells after the last marker.
const EMPTY: &str = "░";
/// Glyph for a marker handle.
const HANDLE: &str = "▲";

/// Widget rendering the bar inside a bordered block.
pub struct BarWidget<'a> {
    model: &'a TimelineModel,
    theme: &'a Theme,
    selected: Option<MarkerId>,
    focused: bool,
}

impl<'a> BarWidget<'a> {
    pub fn new(model: &'a TimelineModel, theme: &'a Theme) -> Self {
        Self {
            model,
            theme,
            selected: None,
            focused: false,
        }
    }

    /// Highlight a marker.
    #[must_use]
    pub fn selected(mut self, selected: Option<MarkerId>) -> Self {
        self.selected = selected;
        self
    }

    /// Draw the focused border.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> String {
        match self.selected.and_then(|id| Some((id, self.model.time_of(id)?))) {
            Some((id, hour)) => format!(" Day · {id} {} ", format_clock(hour)),
            None => " Day ".to_string(),
        }
    }

    fn render_ruler(&self, area: Rect, geometry: BarGeometry, buf: &mut Buffer) {
        let right_edge = area.x + area.width;
        let mut next_free = area.x;

        for label in self.model.range().labels() {
            let width = label.text.width() as u16;
            if width > area.width {
                break;
            }
            let center = geometry.column_of(label.position);
            let start = center
                .saturating_sub(width / 2)
                .max(area.x)
                .min(right_edge - width);
            if start < next_free {
                continue;
            }

            let color = if label.major {
                self.theme.subtext
            } else {
                self.theme.muted
            };
            buf.set_string(start, area.y, &label.text, Style::default().fg(color));
            next_free = start + width + 1;
        }
    }

    fn render_strip(&self, area: Rect, geometry: BarGeometry, buf: &mut Buffer) {
        let segments = self.model.segments();

        for column in area.x..area.x + area.width {
            let position = geometry.cell_position(column);
            let segment = segments
                .iter()
                .find(|segment| segment.width() > 0.0 && position <= segment.end);
            let (symbol, color) = match segment {
                Some(segment) => (FILLED, self.theme.marker_color(segment.color)),
                None => (EMPTY, self.theme.muted),
            };
            if let Some(cell) = buf.cell_mut((column, area.y)) {
                cell.set_symbol(symbol).set_fg(color);
            }
        }
    }

    fn render_markers(&self, area: Rect, geometry: BarGeometry, buf: &mut Buffer) {
        // The selected marker is drawn last so it stays visible when stacked.
        let markers = self.model.markers();
        let ordered = markers
            .iter()
            .filter(|m| Some(m.id()) != self.selected)
            .chain(markers.iter().filter(|m| Some(m.id()) == self.selected));

        for marker in ordered {
            let column = geometry.column_of(marker.position());
            let mut style = Style::default().fg(self.theme.marker_color(marker.color()));
            if Some(marker.id()) == self.selected {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            buf.set_string(column, area.y, HANDLE, style);
        }
    }
}

impl Widget for BarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height < 3 {
            return;
        }

        let geometry = BarGeometry {
            x: inner.x,
            width: inner.width,
        };
        let line = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
        self.render_ruler(line(0), geometry, buf);
        self.render_strip(line(1), geometry, buf);
        self.render_markers(line(2), geometry, buf);
    }
}
