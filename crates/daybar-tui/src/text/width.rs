//! Text width and truncation utilities.
//!
//! Table cells hold free text, so widths are measured in terminal cells
//! rather than bytes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Get the visual width of a string in terminal cells.
///
/// Accounts for wide characters (CJK, emoji) that take 2 cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within a maximum visual width.
///
/// Returns the truncated string with "..." appended if truncation occurred.
/// Line breaks are flattened to spaces first so a cell stays on one line.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let flat: String = s
        .chars()
        .map(|ch| if ch == '\n' || ch == '\t' { ' ' } else { ch })
        .collect();

    if visual_width(&flat) <= max_width {
        return flat;
    }

    // Need to truncate - account for "..." suffix (3 chars)
    let target_width = max_width.saturating_sub(3);
    if target_width == 0 {
        return ".".repeat(max_width.min(3));
    }

    let mut result = String::new();
    let mut width = 0;

    for ch in flat.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str("...");
    result
}

/// Truncate then right-pad with spaces to exactly `width` cells.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = visual_width(&out);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
