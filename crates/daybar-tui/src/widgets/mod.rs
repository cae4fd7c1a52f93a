//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`StatusBar`] - Top status bar with range, counts, and totals
//! - [`BarWidget`] - The day bar with ruler, strip, and marker handles
//! - [`RowsTable`] - The derived rows
//! - [`EditorLine`] - Inline editor for a row's text
//! - [`FooterHints`] - Bottom keybinding hints

mod bar;
mod editor;
mod footer_hints;
mod status_bar;
mod table;

pub use bar::BarWidget;
pub use editor::{EditField, EditorLine, EditorState};
pub use footer_hints::{hints_for_focus, FooterHints, KeyHint};
pub use status_bar::{StatusBar, StatusBarContent};
pub use table::{keep_visible, RowsTable, LUNCH_GLYPH};
