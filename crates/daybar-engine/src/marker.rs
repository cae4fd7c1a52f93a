//! Marker records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::clamp_position;

/// Stable identifier of a marker.
///
/// Allocated from a counter starting at 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Color tag of a marker and of the bar segment it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    Red,
    Orange,
    Green,
    Blue,
    /// Hue in degrees, for markers added after startup.
    Hue(u16),
    /// Start of a pinned lunch break.
    LunchStart,
    /// End of a pinned lunch break.
    LunchEnd,
}

impl MarkerColor {
    /// Base color for the marker seeded at `index`.
    pub fn for_seed(index: usize, id: MarkerId) -> Self {
        match index {
            0 => Self::Red,
            1 => Self::Orange,
            2 => Self::Green,
            _ => Self::for_added(id),
        }
    }

    /// Base color for a marker added at runtime.
    ///
    /// Spread around the wheel by the golden angle so neighbours differ.
    pub fn for_added(id: MarkerId) -> Self {
        Self::Hue(((id.0 * 137) % 360) as u16)
    }

    /// Whether this is one of the lunch-break tags.
    pub fn is_lunch(self) -> bool {
        matches!(self, Self::LunchStart | Self::LunchEnd)
    }
}

/// Free-text notes attached to a marker's row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub problem: String,
    pub solution: String,
}

impl Annotation {
    /// Create an annotation from two strings.
    pub fn new(problem: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            solution: solution.into(),
        }
    }
}

/// A movable point on the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    id: MarkerId,
    position: f64,
    color: MarkerColor,
    base_color: MarkerColor,
    annotation: Annotation,
}

impl Marker {
    /// Create a marker; the position is clamped.
    pub fn new(id: MarkerId, position: f64, color: MarkerColor) -> Self {
        Self {
            id,
            position: clamp_position(position),
            color,
            base_color: color,
            annotation: Annotation::default(),
        }
    }

    /// Attach an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Position in percent of the bar.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current color, including lunch styling.
    pub fn color(&self) -> MarkerColor {
        self.color
    }

    /// Color the marker reverts to when lunch styling is dropped.
    pub fn base_color(&self) -> MarkerColor {
        self.base_color
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub(crate) fn set_position(&mut self, position: f64) {
        self.position = clamp_position(position);
    }

    pub(crate) fn set_color(&mut self, color: MarkerColor) {
        self.color = color;
    }

    pub(crate) fn reset_color(&mut self) {
        self.color = self.base_color;
    }

    pub(crate) fn annotation_mut(&mut self) -> &mut Annotation {
        &mut self.annotation
    }
}
