//! daybar-engine: Headless timeline model for the daybar day editor
//!
//! This crate provides the core logic behind the bar, including:
//! - Position to wall-clock mapping and `HH:MM` formatting
//! - The marker model with add/remove/move and per-row flags
//! - Row derivation, including the pinned lunch break
//! - Single/double click disambiguation
//! - Tab-separated export and configuration

pub mod click;
pub mod config;
pub mod export;
pub mod marker;
pub mod model;
pub mod rows;
pub mod time;

// Re-export commonly used types
pub use click::{ClickDisambiguator, ClickGesture, ClickPhase, Deadline, DEFAULT_CLICK_WINDOW};
pub use config::{Config, ConfigError, LunchBreak};
pub use export::{rows_to_tsv, EXPORT_HEADER};
pub use marker::{Annotation, Marker, MarkerColor, MarkerId};
pub use model::{
    LunchToggle, MoveOutcome, Segment, TimelineError, TimelineModel, MAX_MARKERS, MIN_MARKERS,
};
pub use rows::{FirstRowPolicy, Row, RowState};
pub use time::{
    clamp_position, duration_between, format_clock, format_duration, parse_clock,
    parse_clock_hours, TimeError, TimeLabel, TimeRange,
};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
