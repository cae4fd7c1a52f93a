//! Test utilities for daybar-tui rendering and interaction tests.

use std::time::Duration;

use daybar_engine::TimelineModel;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::App;
use crate::clipboard::MemoryClipboard;

/// Create a test app over the default model, with an in-memory clipboard.
///
/// The returned clipboard shares contents with the one inside the app.
pub fn create_test_app() -> (App, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    let app = App::new(
        TimelineModel::default(),
        Duration::from_millis(300),
        Box::new(clipboard.clone()),
    );
    (app, clipboard)
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// Trailing spaces are trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the app into a `width` x `height` buffer and return it as a string.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    crate::ui::render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string_trims_lines() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 2));
        buffer.set_string(0, 0, "ab", ratatui::style::Style::default());
        buffer.set_string(2, 1, "c", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buffer), "ab\n  c");
    }

    #[test]
    fn test_render_app_to_string_dimensions() {
        let (app, _) = create_test_app();
        let output = render_app_to_string(&app, 80, 24);
        assert_eq!(output.lines().count(), 24);
    }
}
