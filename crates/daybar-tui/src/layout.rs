//! Screen layout and hit testing.
//!
//! Regions, top to bottom:
//! 1. Status bar (1 line)
//! 2. Day bar (bordered, 3 inner lines: ruler, colored strip, markers)
//! 3. Session line (1 line)
//! 4. Rows table (bordered, fills remaining space)
//! 5. Message / editor line (1 line)
//! 6. Footer hints (1 line)
//!
//! Rendering and mouse handling both derive their geometry from here, so a
//! cell that is drawn at a column is also the cell that is hit there.

use std::rc::Rc;

use daybar_engine::clamp_position;
use ratatui::layout::{Constraint, Layout, Rect};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 50;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 16;

/// Width of the `No` column, wide enough for `10 🍽`.
pub const ORDINAL_WIDTH: u16 = 6;
/// Width of the time range column (`07:00 - 12:00`).
pub const RANGE_WIDTH: u16 = 13;
/// Width of the duration column (`Duration`).
pub const DURATION_WIDTH: u16 = 8;

/// Computed regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub status: Rect,
    pub bar: Rect,
    pub sessions: Rect,
    pub table: Rect,
    pub message: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Split the full terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Status bar
            Constraint::Length(5), // Day bar
            Constraint::Length(1), // Sessions
            Constraint::Min(3),    // Table (expands)
            Constraint::Length(1), // Message / editor
            Constraint::Length(1), // Footer hints
        ])
        .split(area);

        Self {
            status: chunks[0],
            bar: chunks[1],
            sessions: chunks[2],
            table: chunks[3],
            message: chunks[4],
            footer: chunks[5],
        }
    }

    /// Area inside the day bar's border.
    pub fn bar_inner(&self) -> Rect {
        inner(self.bar)
    }

    /// Line holding the time labels.
    pub fn ruler_line(&self) -> Rect {
        line(self.bar_inner(), 0)
    }

    /// Line holding the colored strip.
    pub fn strip_line(&self) -> Rect {
        line(self.bar_inner(), 1)
    }

    /// Line holding the marker glyphs.
    pub fn marker_line(&self) -> Rect {
        line(self.bar_inner(), 2)
    }

    /// Column mapping of the strip.
    pub fn bar_geometry(&self) -> BarGeometry {
        let strip = self.strip_line();
        BarGeometry {
            x: strip.x,
            width: strip.width,
        }
    }

    /// Area inside the table's border.
    pub fn table_inner(&self) -> Rect {
        inner(self.table)
    }

    /// Column rects (No, Problem, Solution, Time Range, Duration) for a line.
    pub fn table_columns(&self, y: u16) -> Rc<[Rect]> {
        row_columns(self.table_inner(), y)
    }

    /// Number of data rows that fit under the table header.
    pub fn visible_rows(&self) -> usize {
        self.table_inner().height.saturating_sub(1) as usize
    }

    /// Row index under a point inside the `No` column, if any.
    pub fn ordinal_hit(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.table_inner();
        let first = inner.y + 1;
        let in_column = column >= inner.x && column < inner.x + ORDINAL_WIDTH.min(inner.width);
        if !in_column || row < first || row >= inner.y + inner.height {
            return None;
        }
        Some((row - first) as usize)
    }

    /// Whether a point is on the strip or marker line.
    pub fn bar_hit(&self, column: u16, row: u16) -> bool {
        let strip = self.strip_line();
        let markers = self.marker_line();
        column >= strip.x
            && column < strip.x + strip.width
            && (row == strip.y || row == markers.y)
    }
}

/// Column rects for line `y` of a table whose inner area is `inner`.
pub fn row_columns(inner: Rect, y: u16) -> Rc<[Rect]> {
    Layout::horizontal([
        Constraint::Length(ORDINAL_WIDTH),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(RANGE_WIDTH),
        Constraint::Length(DURATION_WIDTH),
    ])
    .spacing(1)
    .split(Rect::new(inner.x, y, inner.width, 1))
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

fn line(area: Rect, offset: u16) -> Rect {
    Rect::new(area.x, area.y + offset.min(area.height.saturating_sub(1)), area.width, 1)
}

/// Mapping between strip columns and marker positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    /// First column of the strip.
    pub x: u16,
    /// Strip width in columns.
    pub width: u16,
}

impl BarGeometry {
    /// Column at which a position is drawn.
    pub fn column_of(&self, position: f64) -> u16 {
        let span = f64::from(self.width.saturating_sub(1));
        self.x + (clamp_position(position) / 100.0 * span).round() as u16
    }

    /// Position under a column, clamped to the strip.
    ///
    /// Takes a signed column so drag offsets may push it past either edge.
    pub fn position_at(&self, column: i32) -> f64 {
        let span = f64::from(self.width.saturating_sub(1));
        if span <= 0.0 {
            return 0.0;
        }
        let offset = f64::from(column - i32::from(self.x));
        clamp_position(offset / span * 100.0)
    }

    /// Position covered by a strip cell, taken at the cell's center.
    pub fn cell_position(&self, column: u16) -> f64 {
        self.position_at(i32::from(column))
    }
}
