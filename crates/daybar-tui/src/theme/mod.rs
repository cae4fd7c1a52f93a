//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha/High Contrast) and marker colors

mod colors;

pub use colors::{hsl_to_rgb, Theme};
