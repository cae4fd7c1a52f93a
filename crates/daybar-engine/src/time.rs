//! Position to wall-clock mapping.
//!
//! Marker positions are percentages of the bar (0.0 to 100.0). A
//! [`TimeRange`] maps them onto fractional hours of the day, and the
//! formatting helpers turn those hours and minute counts into the
//! `HH:MM` strings shown in the table and in exports.

use serde::{Deserialize, Serialize};

/// Leftmost marker position.
pub const MIN_POSITION: f64 = 0.0;

/// Rightmost marker position.
pub const MAX_POSITION: f64 = 100.0;

/// Clamp a position into `[0, 100]`.
///
/// Non-finite input (a malformed position) maps to 0.
pub fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        return MIN_POSITION;
    }
    position.clamp(MIN_POSITION, MAX_POSITION)
}

/// The mapped domain of the bar, in fractional hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Hour at position 0 (e.g. 7.0 for 07:00).
    #[serde(default = "default_min_hour")]
    pub min_hour: f64,

    /// Hour at position 100 (e.g. 17.5 for 17:30).
    #[serde(default = "default_max_hour")]
    pub max_hour: f64,
}

fn default_min_hour() -> f64 {
    7.0
}

fn default_max_hour() -> f64 {
    17.5
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            min_hour: default_min_hour(),
            max_hour: default_max_hour(),
        }
    }
}

impl TimeRange {
    /// Create a range from two hours.
    pub fn new(min_hour: f64, max_hour: f64) -> Self {
        Self { min_hour, max_hour }
    }

    /// Length of the range in hours.
    pub fn hour_range(&self) -> f64 {
        self.max_hour - self.min_hour
    }

    /// Length of the range in whole minutes.
    pub fn total_minutes(&self) -> i64 {
        (self.hour_range() * 60.0).round() as i64
    }

    /// Map a position to a fractional hour.
    pub fn time_of(&self, position: f64) -> f64 {
        self.min_hour + (clamp_position(position) / 100.0) * self.hour_range()
    }

    /// Map a fractional hour back to a clamped position.
    pub fn position_of(&self, hour: f64) -> f64 {
        let span = self.hour_range();
        if span <= 0.0 {
            return MIN_POSITION;
        }
        clamp_position((hour - self.min_hour) / span * 100.0)
    }

    /// Whether an hour lies inside the range (inclusive).
    pub fn contains(&self, hour: f64) -> bool {
        hour >= self.min_hour && hour <= self.max_hour
    }

    /// Ruler labels: every full and half hour within the range.
    pub fn labels(&self) -> Vec<TimeLabel> {
        let total = self.hour_range() * 60.0;
        if total <= 0.0 {
            return Vec::new();
        }

        let start = (self.min_hour * 60.0).round() as i64;
        let end = (self.max_hour * 60.0).round() as i64;
        // First half-hour boundary at or after the start.
        let first = start + (30 - start.rem_euclid(30)) % 30;

        (first..=end)
            .step_by(30)
            .map(|minute_of_day| {
                let offset = (minute_of_day - start) as f64;
                TimeLabel {
                    text: format_clock_minutes(minute_of_day),
                    position: offset / total * 100.0,
                    major: minute_of_day % 60 == 0,
                }
            })
            .collect()
    }
}

/// A ruler label above the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLabel {
    /// Clock text, e.g. `07:30`.
    pub text: String,
    /// Position along the bar in percent.
    pub position: f64,
    /// Full-hour labels are major ticks.
    pub major: bool,
}

/// Format a fractional hour as `HH:MM`.
///
/// Minutes are rounded; a rounded value of 60 carries into the hour.
pub fn format_clock(hours: f64) -> String {
    let mut whole = hours.floor() as i64;
    let mut minutes = ((hours - hours.floor()) * 60.0).round() as i64;
    if minutes >= 60 {
        whole += minutes / 60;
        minutes %= 60;
    }
    format!("{whole:02}:{minutes:02}")
}

fn format_clock_minutes(minute_of_day: i64) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Format a minute count as `HH:MM`.
pub fn format_duration(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Whole minutes between two fractional hours.
pub fn minutes_between(start_hour: f64, end_hour: f64) -> i64 {
    ((end_hour - start_hour) * 60.0).round() as i64
}

/// Parse an `H:MM` / `HH:MM` clock string into minutes since midnight.
pub fn parse_clock(text: &str) -> Result<i64, TimeError> {
    let malformed = || TimeError::Malformed(text.to_string());

    let (hours, minutes) = text.trim().split_once(':').ok_or_else(malformed)?;
    let hours: i64 = hours.parse().map_err(|_| malformed())?;
    let minutes: i64 = minutes.parse().map_err(|_| malformed())?;

    if hours < 0 || !(0..60).contains(&minutes) {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

/// Parse a clock string into fractional hours.
pub fn parse_clock_hours(text: &str) -> Result<f64, TimeError> {
    parse_clock(text).map(|minutes| minutes as f64 / 60.0)
}

/// Minutes between two clock strings.
pub fn duration_between(start: &str, end: &str) -> Result<i64, TimeError> {
    Ok(parse_clock(end)? - parse_clock(start)?)
}

/// Errors from parsing clock strings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeError {
    /// Not of the form `HH:MM`.
    #[error("malformed clock time: {0:?}")]
    Malformed(String),
}
