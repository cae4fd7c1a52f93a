//! Row derivation.
//!
//! Markers are sorted by time and each adjacent pair becomes one row of the
//! table. Sorting is stable: markers at equal positions keep insertion order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::LunchBreak;
use crate::marker::{Marker, MarkerId};
use crate::time::{format_clock, format_duration, minutes_between, TimeRange};

/// How the first marker in sort order becomes a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FirstRowPolicy {
    /// The first marker only opens the first interval; it has no row.
    #[default]
    BoundaryOnly,
    /// The first marker closes a row that starts at the range start.
    FromRangeStart,
}

impl FirstRowPolicy {
    /// The other policy.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::BoundaryOnly => Self::FromRangeStart,
            Self::FromRangeStart => Self::BoundaryOnly,
        }
    }

    /// Short label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::BoundaryOnly => "boundary",
            Self::FromRangeStart => "from start",
        }
    }
}

/// Per-marker row flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowState {
    /// Highlighted row (double click).
    pub flagged: bool,
    /// Row pinned to the lunch break (single click).
    pub lunch_break: bool,
}

impl RowState {
    /// Whether the state carries no flags and can be dropped.
    pub fn is_clear(&self) -> bool {
        !self.flagged && !self.lunch_break
    }
}

/// One derived table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// 1-based row number.
    pub ordinal: usize,
    /// Marker whose position closes this row.
    pub marker: MarkerId,
    pub problem: String,
    pub solution: String,
    pub start_hour: f64,
    pub end_hour: f64,
    pub duration_minutes: i64,
    /// `HH:MM - HH:MM`.
    pub time_range: String,
    /// `HH:MM`.
    pub duration: String,
    pub flagged: bool,
    pub lunch_break: bool,
}

/// Indices into `markers`, sorted by time with ties kept in insertion order.
pub fn sorted_indices(markers: &[Marker], range: &TimeRange) -> Vec<usize> {
    let mut timed: Vec<(usize, f64)> = markers
        .iter()
        .enumerate()
        .map(|(index, marker)| (index, range.time_of(marker.position())))
        .collect();
    // slice::sort_by is stable
    timed.sort_by(|a, b| a.1.total_cmp(&b.1));
    timed.into_iter().map(|(index, _)| index).collect()
}

/// Derive the table rows for a marker set.
pub fn derive_rows(
    markers: &[Marker],
    states: &BTreeMap<MarkerId, RowState>,
    range: &TimeRange,
    lunch: &LunchBreak,
    policy: FirstRowPolicy,
) -> Vec<Row> {
    let order = sorted_indices(markers, range);
    let times: Vec<f64> = order
        .iter()
        .map(|&index| range.time_of(markers[index].position()))
        .collect();

    let first = match policy {
        FirstRowPolicy::BoundaryOnly => 1,
        FirstRowPolicy::FromRangeStart => 0,
    };

    (first..order.len())
        .enumerate()
        .map(|(row_index, sorted_index)| {
            let marker = &markers[order[sorted_index]];
            let state = states.get(&marker.id()).copied().unwrap_or_default();

            let start_hour = if sorted_index == 0 {
                range.min_hour
            } else {
                times[sorted_index - 1]
            };
            let end_hour = times[sorted_index];

            let (start_hour, end_hour, duration_minutes) = if state.lunch_break {
                (lunch.start_hour, lunch.end_hour, lunch.minutes())
            } else {
                (start_hour, end_hour, minutes_between(start_hour, end_hour))
            };

            Row {
                ordinal: row_index + 1,
                marker: marker.id(),
                problem: marker.annotation().problem.clone(),
                solution: marker.annotation().solution.clone(),
                start_hour,
                end_hour,
                duration_minutes,
                time_range: format!("{} - {}", format_clock(start_hour), format_clock(end_hour)),
                duration: format_duration(duration_minutes),
                flagged: state.flagged,
                lunch_break: state.lunch_break,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{Annotation, MarkerColor};
    use insta::assert_snapshot;

    fn markers_at(positions: &[f64]) -> Vec<Marker> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Marker::new(MarkerId(i as u32 + 1), p, MarkerColor::Blue))
            .collect()
    }

    fn summary(rows: &[Row]) -> String {
        rows.iter()
            .map(|r| format!("{} {} {} {}", r.ordinal, r.marker, r.time_range, r.duration))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_boundary_only_three_markers() {
        let markers = markers_at(&[0.0, 50.0, 100.0]);
        let rows = derive_rows(
            &markers,
            &BTreeMap::new(),
            &TimeRange::new(7.0, 17.0),
            &LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
        );
        assert_snapshot!(summary(&rows), @r"
        1 #2 07:00 - 12:00 05:00
        2 #3 12:00 - 17:00 05:00
        ");
    }

    #[test]
    fn test_from_range_start_three_markers() {
        let markers = markers_at(&[0.0, 50.0, 100.0]);
        let rows = derive_rows(
            &markers,
            &BTreeMap::new(),
            &TimeRange::new(7.0, 17.0),
            &LunchBreak::default(),
            FirstRowPolicy::FromRangeStart,
        );
        assert_snapshot!(summary(&rows), @r"
        1 #1 07:00 - 07:00 00:00
        2 #2 07:00 - 12:00 05:00
        3 #3 12:00 - 17:00 05:00
        ");
    }

    #[test]
    fn test_rows_follow_time_not_insertion() {
        let markers = markers_at(&[80.0, 20.0, 40.0]);
        let rows = derive_rows(
            &markers,
            &BTreeMap::new(),
            &TimeRange::new(8.0, 18.0),
            &LunchBreak::default(),
            FirstRowPolicy::FromRangeStart,
        );
        let ids: Vec<MarkerId> = rows.iter().map(|r| r.marker).collect();
        assert_eq!(ids, vec![MarkerId(2), MarkerId(3), MarkerId(1)]);
        assert_eq!(rows[0].time_range, "08:00 - 10:00");
        assert_eq!(rows[2].duration, "04:00");
    }

    #[test]
    fn test_equal_positions_keep_insertion_order() {
        let markers = markers_at(&[30.0, 30.0, 10.0, 30.0]);
        let order = sorted_indices(&markers, &TimeRange::default());
        assert_eq!(order, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_annotation_follows_marker_id() {
        let mut markers = markers_at(&[90.0, 10.0]);
        markers[0] = markers[0]
            .clone()
            .with_annotation(Annotation::new("late", "fixed"));
        let rows = derive_rows(
            &markers,
            &BTreeMap::new(),
            &TimeRange::default(),
            &LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].marker, MarkerId(1));
        assert_eq!(rows[0].problem, "late");
        assert_eq!(rows[0].solution, "fixed");
    }

    #[test]
    fn test_lunch_row_overrides_range_and_duration() {
        let markers = markers_at(&[0.0, 30.0, 100.0]);
        let mut states = BTreeMap::new();
        states.insert(
            MarkerId(2),
            RowState {
                flagged: false,
                lunch_break: true,
            },
        );
        let rows = derive_rows(
            &markers,
            &states,
            &TimeRange::new(7.0, 17.0),
            &LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
        );
        assert!(rows[0].lunch_break);
        assert_eq!(rows[0].time_range, "12:00 - 13:00");
        assert_eq!(rows[0].duration, "01:00");
        assert_eq!(rows[0].duration_minutes, 60);
        assert!(!rows[1].lunch_break);
    }

    #[test]
    fn test_durations_sum_to_span() {
        let range = TimeRange::default();
        let positions = [3.3, 17.1, 42.0, 42.0, 66.6, 91.9];
        let markers = markers_at(&positions);
        let rows = derive_rows(
            &markers,
            &BTreeMap::new(),
            &range,
            &LunchBreak::default(),
            FirstRowPolicy::FromRangeStart,
        );
        let sum: i64 = rows.iter().map(|r| r.duration_minutes).sum();
        let expected = minutes_between(range.min_hour, range.time_of(91.9));
        assert!((sum - expected).abs() <= rows.len() as i64);
    }

    #[test]
    fn test_policy_toggle() {
        assert_eq!(
            FirstRowPolicy::BoundaryOnly.toggle(),
            FirstRowPolicy::FromRangeStart
        );
        assert_eq!(
            FirstRowPolicy::FromRangeStart.toggle(),
            FirstRowPolicy::BoundaryOnly
        );
    }
}
