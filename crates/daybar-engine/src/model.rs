//! The timeline model.
//!
//! [`TimelineModel`] owns the markers and their row flags. Every mutation
//! goes through a method here; rows, bar segments and exports are derived
//! on demand so they always reflect the latest positions.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Config, LunchBreak};
use crate::export::rows_to_tsv;
use crate::marker::{Annotation, Marker, MarkerColor, MarkerId};
use crate::rows::{derive_rows, sorted_indices, FirstRowPolicy, Row, RowState};
use crate::time::{clamp_position, minutes_between, TimeRange};

/// Fewest markers the bar keeps.
pub const MIN_MARKERS: usize = 2;

/// Most markers the bar holds.
pub const MAX_MARKERS: usize = 10;

/// Distance right of the rightmost marker at which new markers appear.
pub const ADD_STEP: f64 = 10.0;

/// Rightmost position a newly added marker is placed at.
pub const ADD_CAP: f64 = 98.0;

/// A colored stretch of the bar, closed by `marker`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub marker: MarkerId,
    /// Start position in percent.
    pub start: f64,
    /// End position in percent.
    pub end: f64,
    pub color: MarkerColor,
}

impl Segment {
    /// Width in percent.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Result of moving a marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Markers whose lunch break was cancelled by the move.
    pub cancelled_lunch: Vec<MarkerId>,
}

/// Result of toggling a lunch break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunchToggle {
    /// The break was pinned.
    Enabled {
        /// Marker placed at the break start, if any.
        start: Option<MarkerId>,
        /// Whether `start` was created for the break.
        synthesized: bool,
    },
    /// The break was removed.
    Disabled,
}

/// Ordered markers plus per-marker row flags.
#[derive(Debug, Clone)]
pub struct TimelineModel {
    range: TimeRange,
    lunch: LunchBreak,
    policy: FirstRowPolicy,
    /// Markers in insertion order.
    markers: Vec<Marker>,
    /// Row flags; absent entries are all-false.
    states: BTreeMap<MarkerId, RowState>,
    /// Lunch end marker -> the marker pinned to the break start.
    lunch_starts: BTreeMap<MarkerId, MarkerId>,
    /// Next marker id to assign.
    next_id: u32,
}

impl Default for TimelineModel {
    fn default() -> Self {
        let config = Config::default();
        Self::seeded(
            config.range,
            config.lunch,
            config.first_row,
            &config.seed_positions,
        )
    }
}

impl TimelineModel {
    /// Create a model seeded with markers at `positions`.
    pub fn new(
        range: TimeRange,
        lunch: LunchBreak,
        policy: FirstRowPolicy,
        positions: &[f64],
    ) -> Result<Self, TimelineError> {
        if !(MIN_MARKERS..=MAX_MARKERS).contains(&positions.len()) {
            return Err(TimelineError::InvalidSeedCount(positions.len()));
        }
        Ok(Self::seeded(range, lunch, policy, positions))
    }

    fn seeded(
        range: TimeRange,
        lunch: LunchBreak,
        policy: FirstRowPolicy,
        positions: &[f64],
    ) -> Self {
        let mut model = Self {
            range,
            lunch,
            policy,
            markers: Vec::with_capacity(MAX_MARKERS),
            states: BTreeMap::new(),
            lunch_starts: BTreeMap::new(),
            next_id: 1,
        };
        for (index, &position) in positions.iter().enumerate() {
            let id = model.allocate_id();
            model
                .markers
                .push(Marker::new(id, position, MarkerColor::for_seed(index, id)));
        }
        model
    }

    /// Create a model from configuration.
    pub fn from_config(config: &Config) -> Result<Self, TimelineError> {
        Self::new(
            config.range,
            config.lunch,
            config.first_row,
            &config.seed_positions,
        )
    }

    fn allocate_id(&mut self) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn lunch(&self) -> &LunchBreak {
        &self.lunch
    }

    pub fn policy(&self) -> FirstRowPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FirstRowPolicy) {
        self.policy = policy;
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.markers.len() < MAX_MARKERS
    }

    pub fn can_remove(&self) -> bool {
        self.markers.len() > MIN_MARKERS
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id() == id)
    }

    fn index_of(&self, id: MarkerId) -> Result<usize, TimelineError> {
        self.markers
            .iter()
            .position(|m| m.id() == id)
            .ok_or(TimelineError::UnknownMarker(id))
    }

    /// Flags for a marker's row.
    pub fn row_state(&self, id: MarkerId) -> RowState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    fn update_state(&mut self, id: MarkerId, f: impl FnOnce(&mut RowState)) {
        let state = self.states.entry(id).or_default();
        f(state);
        if state.is_clear() {
            self.states.remove(&id);
        }
    }

    /// Time of a marker in fractional hours.
    pub fn time_of(&self, id: MarkerId) -> Option<f64> {
        self.marker(id).map(|m| self.range.time_of(m.position()))
    }

    /// Marker ids in time order.
    pub fn sorted_ids(&self) -> Vec<MarkerId> {
        sorted_indices(&self.markers, &self.range)
            .into_iter()
            .map(|index| self.markers[index].id())
            .collect()
    }

    /// The marker directly before `id` in time order.
    pub fn predecessor(&self, id: MarkerId) -> Option<MarkerId> {
        let order = self.sorted_ids();
        let at = order.iter().position(|&m| m == id)?;
        at.checked_sub(1).map(|prev| order[prev])
    }

    /// Append a marker right of the rightmost one.
    ///
    /// Returns `None` when the bar is full.
    pub fn add_marker(&mut self) -> Option<MarkerId> {
        if !self.can_add() {
            debug!(count = self.markers.len(), "Marker limit reached, not adding");
            return None;
        }

        let rightmost = self
            .markers
            .iter()
            .map(Marker::position)
            .fold(0.0_f64, f64::max);
        let position = (rightmost + ADD_STEP).min(ADD_CAP);

        let id = self.allocate_id();
        self.markers
            .push(Marker::new(id, position, MarkerColor::for_added(id)));
        debug!(marker = %id, position, "Added marker");
        Some(id)
    }

    /// Remove the most recently inserted marker.
    ///
    /// Returns `None` when only the minimum number of markers remain.
    pub fn remove_marker(&mut self) -> Option<Marker> {
        if !self.can_remove() {
            debug!(count = self.markers.len(), "Marker minimum reached, not removing");
            return None;
        }

        let id = self.markers.last()?.id();
        let cancelled = self.release_lunch(id);
        if !cancelled.is_empty() {
            info!(removed = %id, ?cancelled, "Lunch break cancelled by removal");
        }

        let removed = self.markers.pop()?;
        self.states.remove(&removed.id());
        debug!(marker = %removed.id(), "Removed marker");
        Some(removed)
    }

    /// Move a marker to a new position.
    ///
    /// A marker that actually changes position cancels its own lunch break
    /// and that of the marker it opens.
    pub fn move_marker(
        &mut self,
        id: MarkerId,
        position: f64,
    ) -> Result<MoveOutcome, TimelineError> {
        let index = self.index_of(id)?;
        let position = clamp_position(position);
        let mut outcome = MoveOutcome::default();

        if (self.markers[index].position() - position).abs() < f64::EPSILON {
            return Ok(outcome);
        }

        outcome.cancelled_lunch = self.release_lunch(id);
        if !outcome.cancelled_lunch.is_empty() {
            info!(marker = %id, cancelled = ?outcome.cancelled_lunch, "Lunch break cancelled by move");
        }

        self.markers[index].set_position(position);
        debug!(marker = %id, position, "Moved marker");
        Ok(outcome)
    }

    /// Move a marker to a clock time.
    pub fn move_marker_to_hour(
        &mut self,
        id: MarkerId,
        hour: f64,
    ) -> Result<MoveOutcome, TimelineError> {
        let position = self.range.position_of(hour);
        self.move_marker(id, position)
    }

    /// Replace the problem text of a marker's row.
    pub fn set_problem(
        &mut self,
        id: MarkerId,
        problem: impl Into<String>,
    ) -> Result<(), TimelineError> {
        let index = self.index_of(id)?;
        self.markers[index].annotation_mut().problem = problem.into();
        Ok(())
    }

    /// Replace the solution text of a marker's row.
    pub fn set_solution(
        &mut self,
        id: MarkerId,
        solution: impl Into<String>,
    ) -> Result<(), TimelineError> {
        let index = self.index_of(id)?;
        self.markers[index].annotation_mut().solution = solution.into();
        Ok(())
    }

    /// Replace both texts at once.
    pub fn annotate(&mut self, id: MarkerId, annotation: Annotation) -> Result<(), TimelineError> {
        let index = self.index_of(id)?;
        *self.markers[index].annotation_mut() = annotation;
        Ok(())
    }

    /// Toggle the highlight flag of a row. Returns the new value.
    pub fn toggle_flag(&mut self, id: MarkerId) -> Result<bool, TimelineError> {
        self.index_of(id)?;
        let flagged = !self.row_state(id).flagged;
        self.update_state(id, |state| state.flagged = flagged);
        debug!(marker = %id, flagged, "Toggled row flag");
        Ok(flagged)
    }

    /// Toggle the lunch break on a row.
    ///
    /// Enabling pins the marker to the break end and its predecessor to the
    /// break start, creating a start marker when there is no predecessor.
    /// Disabling only reverts colors; positions stay where they are.
    pub fn toggle_lunch_break(&mut self, id: MarkerId) -> Result<LunchToggle, TimelineError> {
        let index = self.index_of(id)?;

        if self.row_state(id).lunch_break {
            self.clear_lunch(id);
            info!(marker = %id, "Lunch break removed");
            return Ok(LunchToggle::Disabled);
        }

        let start_position = self.range.position_of(self.lunch.start_hour);
        let end_position = self.range.position_of(self.lunch.end_hour);
        // Predecessor is taken from the order before anything moves.
        let predecessor = self.predecessor(id);

        // Markers about to be pinned leave any break they already belong to.
        let mut cancelled = self.release_lunch(id);
        if let Some(prev) = predecessor {
            cancelled.extend(self.release_lunch(prev));
        }
        if !cancelled.is_empty() {
            info!(marker = %id, ?cancelled, "Lunch break cancelled by new lunch break");
        }

        self.update_state(id, |state| state.lunch_break = true);
        let marker = &mut self.markers[index];
        marker.set_position(end_position);
        marker.set_color(MarkerColor::LunchEnd);

        let toggle = match predecessor {
            Some(prev) => {
                let prev_index = self.index_of(prev)?;
                let marker = &mut self.markers[prev_index];
                marker.set_position(start_position);
                marker.set_color(MarkerColor::LunchStart);
                self.lunch_starts.insert(id, prev);
                LunchToggle::Enabled {
                    start: Some(prev),
                    synthesized: false,
                }
            }
            None if self.can_add() => {
                let start = self.allocate_id();
                let mut marker = Marker::new(start, start_position, MarkerColor::for_added(start))
                    .with_annotation(Annotation::new("Lunch Break Start", "Meal time begins"));
                marker.set_color(MarkerColor::LunchStart);
                self.markers.push(marker);
                self.lunch_starts.insert(id, start);
                LunchToggle::Enabled {
                    start: Some(start),
                    synthesized: true,
                }
            }
            None => {
                warn!(marker = %id, "Cannot add lunch start marker, marker limit reached");
                LunchToggle::Enabled {
                    start: None,
                    synthesized: false,
                }
            }
        };

        info!(marker = %id, ?toggle, "Lunch break set");
        Ok(toggle)
    }

    /// Markers currently flagged as lunch break.
    pub fn lunch_markers(&self) -> Vec<MarkerId> {
        self.states
            .iter()
            .filter(|(_, state)| state.lunch_break)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Marker pinned to the start of `id`'s lunch break.
    pub fn lunch_start(&self, id: MarkerId) -> Option<MarkerId> {
        self.lunch_starts.get(&id).copied()
    }

    /// Cancel every lunch break `id` is pinned into, as its end or its start.
    /// Returns the lunch end markers that were cleared.
    fn release_lunch(&mut self, id: MarkerId) -> Vec<MarkerId> {
        let mut cancelled = Vec::new();
        if self.row_state(id).lunch_break {
            cancelled.push(id);
        }
        cancelled.extend(
            self.lunch_starts
                .iter()
                .filter(|&(_, &start)| start == id)
                .map(|(&end, _)| end),
        );
        for &end in &cancelled {
            self.clear_lunch(end);
        }
        cancelled
    }

    /// Clear the lunch flag on `id` and revert the styling of its pair.
    fn clear_lunch(&mut self, id: MarkerId) {
        self.update_state(id, |state| state.lunch_break = false);

        if let Ok(index) = self.index_of(id) {
            self.markers[index].reset_color();
        }
        if let Some(start) = self.lunch_starts.remove(&id) {
            if let Ok(start_index) = self.index_of(start) {
                if self.markers[start_index].color() == MarkerColor::LunchStart {
                    self.markers[start_index].reset_color();
                }
            }
        }
    }

    /// Derived table rows.
    pub fn rows(&self) -> Vec<Row> {
        derive_rows(
            &self.markers,
            &self.states,
            &self.range,
            &self.lunch,
            self.policy,
        )
    }

    /// Sum of all row durations in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.rows().iter().map(|row| row.duration_minutes).sum()
    }

    /// Colored bar segments in time order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut start = 0.0;
        sorted_indices(&self.markers, &self.range)
            .into_iter()
            .map(|index| {
                let marker = &self.markers[index];
                let segment = Segment {
                    marker: marker.id(),
                    start,
                    end: marker.position(),
                    color: marker.color(),
                };
                start = marker.position();
                segment
            })
            .collect()
    }

    /// Per-marker session lengths in insertion order.
    ///
    /// Each marker is measured from the previously inserted marker (the
    /// first from the range start), not from its neighbour on the bar.
    pub fn session_durations(&self) -> Vec<(MarkerId, i64)> {
        let mut previous = self.range.min_hour;
        self.markers
            .iter()
            .map(|marker| {
                let time = self.range.time_of(marker.position());
                let minutes = minutes_between(previous, time);
                previous = time;
                (marker.id(), minutes)
            })
            .collect()
    }

    /// Tab-separated export of the current rows.
    pub fn export_tsv(&self) -> String {
        rows_to_tsv(&self.rows())
    }
}

/// Errors from model operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimelineError {
    /// No marker with this id.
    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),

    /// Seed list outside the allowed marker count.
    #[error("{0} seed markers given, expected {MIN_MARKERS} to {MAX_MARKERS}")]
    InvalidSeedCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_at(positions: &[f64]) -> TimelineModel {
        TimelineModel::new(
            TimeRange::new(7.0, 17.0),
            LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
            positions,
        )
        .unwrap()
    }

    fn position(model: &TimelineModel, id: u32) -> f64 {
        model.marker(MarkerId(id)).unwrap().position()
    }

    #[test]
    fn test_default_model_has_three_seeds() {
        let model = TimelineModel::default();
        assert_eq!(model.len(), 3);
        let colors: Vec<MarkerColor> = model.markers().iter().map(Marker::color).collect();
        assert_eq!(
            colors,
            vec![MarkerColor::Red, MarkerColor::Orange, MarkerColor::Green]
        );
    }

    #[test]
    fn test_rejects_bad_seed_count() {
        let err = TimelineModel::new(
            TimeRange::default(),
            LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
            &[50.0],
        )
        .unwrap_err();
        assert_eq!(err, TimelineError::InvalidSeedCount(1));
    }

    #[test]
    fn test_add_places_right_of_rightmost() {
        let mut model = model_at(&[0.0, 40.0]);
        let id = model.add_marker().unwrap();
        assert_eq!(id, MarkerId(3));
        assert!((position(&model, 3) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_caps_at_98() {
        let mut model = model_at(&[0.0, 100.0]);
        model.add_marker().unwrap();
        assert!((position(&model, 3) - ADD_CAP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_is_noop_at_limit() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        while model.can_add() {
            model.add_marker().unwrap();
        }
        assert_eq!(model.len(), MAX_MARKERS);
        assert_eq!(model.add_marker(), None);
        assert_eq!(model.len(), MAX_MARKERS);
    }

    #[test]
    fn test_remove_is_noop_at_minimum() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        let removed = model.remove_marker().unwrap();
        assert_eq!(removed.id(), MarkerId(3));
        assert_eq!(model.remove_marker(), None);
        assert_eq!(model.len(), MIN_MARKERS);
    }

    #[test]
    fn test_remove_drops_row_state() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        model.toggle_flag(MarkerId(3)).unwrap();
        model.remove_marker().unwrap();
        assert_eq!(model.row_state(MarkerId(3)), RowState::default());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        model.remove_marker().unwrap();
        assert_eq!(model.add_marker(), Some(MarkerId(4)));
    }

    #[test]
    fn test_move_clamps_and_reorders_rows() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        model.move_marker(MarkerId(2), 150.0).unwrap();
        assert!((position(&model, 2) - 100.0).abs() < f64::EPSILON);

        // #3 was inserted later but ties keep insertion order.
        let order = model.sorted_ids();
        assert_eq!(order, vec![MarkerId(1), MarkerId(2), MarkerId(3)]);
    }

    #[test]
    fn test_move_unknown_marker() {
        let mut model = model_at(&[0.0, 50.0]);
        assert_eq!(
            model.move_marker(MarkerId(9), 10.0),
            Err(TimelineError::UnknownMarker(MarkerId(9)))
        );
    }

    #[test]
    fn test_toggle_flag() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        assert!(model.toggle_flag(MarkerId(2)).unwrap());
        assert!(model.row_state(MarkerId(2)).flagged);
        assert!(model.rows()[0].flagged);
        assert!(!model.toggle_flag(MarkerId(2)).unwrap());
        assert!(!model.row_state(MarkerId(2)).flagged);
    }

    #[test]
    fn test_lunch_moves_marker_and_predecessor() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        let toggle = model.toggle_lunch_break(MarkerId(3)).unwrap();
        assert_eq!(
            toggle,
            LunchToggle::Enabled {
                start: Some(MarkerId(2)),
                synthesized: false
            }
        );

        // 12:00 and 13:00 on a 07:00-17:00 bar
        assert!((position(&model, 2) - 50.0).abs() < 1e-9);
        assert!((position(&model, 3) - 60.0).abs() < 1e-9);
        assert_eq!(
            model.marker(MarkerId(2)).unwrap().color(),
            MarkerColor::LunchStart
        );
        assert_eq!(
            model.marker(MarkerId(3)).unwrap().color(),
            MarkerColor::LunchEnd
        );

        let rows = model.rows();
        let lunch = rows.iter().find(|r| r.marker == MarkerId(3)).unwrap();
        assert!(lunch.lunch_break);
        assert_eq!(lunch.time_range, "12:00 - 13:00");
        assert_eq!(lunch.duration, "01:00");
    }

    #[test]
    fn test_lunch_on_first_marker_synthesizes_start() {
        let mut model = TimelineModel::new(
            TimeRange::new(7.0, 17.0),
            LunchBreak::default(),
            FirstRowPolicy::FromRangeStart,
            &[10.0, 90.0],
        )
        .unwrap();

        let toggle = model.toggle_lunch_break(MarkerId(1)).unwrap();
        assert_eq!(
            toggle,
            LunchToggle::Enabled {
                start: Some(MarkerId(3)),
                synthesized: true
            }
        );
        assert_eq!(model.len(), 3);

        let start = model.marker(MarkerId(3)).unwrap();
        assert!((start.position() - 50.0).abs() < 1e-9);
        assert_eq!(start.annotation().problem, "Lunch Break Start");
        assert_eq!(start.annotation().solution, "Meal time begins");
        assert_eq!(start.color(), MarkerColor::LunchStart);
    }

    #[test]
    fn test_lunch_synthesis_skipped_when_full() {
        let mut model = TimelineModel::new(
            TimeRange::new(7.0, 17.0),
            LunchBreak::default(),
            FirstRowPolicy::FromRangeStart,
            &[5.0, 90.0, 91.0, 92.0, 93.0, 94.0, 95.0, 96.0, 97.0, 98.0],
        )
        .unwrap();

        let toggle = model.toggle_lunch_break(MarkerId(1)).unwrap();
        assert_eq!(
            toggle,
            LunchToggle::Enabled {
                start: None,
                synthesized: false
            }
        );
        assert_eq!(model.len(), MAX_MARKERS);
        assert!(model.row_state(MarkerId(1)).lunch_break);
    }

    #[test]
    fn test_lunch_off_resets_color_not_position() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();
        let toggle = model.toggle_lunch_break(MarkerId(3)).unwrap();
        assert_eq!(toggle, LunchToggle::Disabled);

        // Pre-lunch positions (30 %, 100 %) are not restored.
        assert!((position(&model, 2) - 50.0).abs() < 1e-9);
        assert!((position(&model, 3) - 60.0).abs() < 1e-9);
        assert_eq!(model.marker(MarkerId(2)).unwrap().color(), MarkerColor::Orange);
        assert_eq!(model.marker(MarkerId(3)).unwrap().color(), MarkerColor::Green);
        assert!(!model.row_state(MarkerId(3)).lunch_break);

        let rows = model.rows();
        let row = rows.iter().find(|r| r.marker == MarkerId(3)).unwrap();
        assert_eq!(row.time_range, "12:00 - 13:00");
        assert!(!row.lunch_break);
    }

    #[test]
    fn test_moving_lunch_end_cancels() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();

        let outcome = model.move_marker(MarkerId(3), 80.0).unwrap();
        assert_eq!(outcome.cancelled_lunch, vec![MarkerId(3)]);
        assert!(!model.row_state(MarkerId(3)).lunch_break);
        assert_eq!(model.marker(MarkerId(2)).unwrap().color(), MarkerColor::Orange);
        assert_eq!(model.marker(MarkerId(3)).unwrap().color(), MarkerColor::Green);
    }

    #[test]
    fn test_moving_lunch_start_cancels_follower() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();

        let outcome = model.move_marker(MarkerId(2), 45.0).unwrap();
        assert_eq!(outcome.cancelled_lunch, vec![MarkerId(3)]);
        assert!(!model.row_state(MarkerId(3)).lunch_break);
        assert_eq!(model.marker(MarkerId(2)).unwrap().color(), MarkerColor::Orange);
    }

    #[test]
    fn test_moving_unrelated_marker_keeps_lunch() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();

        let outcome = model.move_marker(MarkerId(1), 5.0).unwrap();
        assert!(outcome.cancelled_lunch.is_empty());
        assert!(model.row_state(MarkerId(3)).lunch_break);
    }

    #[test]
    fn test_move_to_same_position_keeps_lunch() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();
        let current = position(&model, 3);

        let outcome = model.move_marker(MarkerId(3), current).unwrap();
        assert!(outcome.cancelled_lunch.is_empty());
        assert!(model.row_state(MarkerId(3)).lunch_break);
    }

    #[test]
    fn test_removing_lunch_start_cancels_follower() {
        let mut model = model_at(&[0.0, 100.0, 30.0]);
        // #2 at 100 % is preceded by #3 at 30 %.
        model.toggle_lunch_break(MarkerId(2)).unwrap();
        assert_eq!(model.predecessor(MarkerId(2)), Some(MarkerId(3)));

        model.remove_marker().unwrap();
        assert!(!model.row_state(MarkerId(2)).lunch_break);
        assert_eq!(model.marker(MarkerId(2)).unwrap().color(), MarkerColor::Orange);
    }

    #[test]
    fn test_removing_lunch_end_resets_start_color() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        model.toggle_lunch_break(MarkerId(3)).unwrap();
        assert_eq!(model.lunch_start(MarkerId(3)), Some(MarkerId(2)));

        let removed = model.remove_marker().unwrap();
        assert_eq!(removed.id(), MarkerId(3));
        assert_eq!(model.marker(MarkerId(2)).unwrap().color(), MarkerColor::Orange);
        assert_eq!(model.lunch_start(MarkerId(3)), None);
        assert!(model.lunch_markers().is_empty());
    }

    #[test]
    fn test_pinned_start_survives_marker_inside_break() {
        // #3 at 55 % (12:30) ends up between the pinned pair.
        let mut model = model_at(&[0.0, 30.0, 55.0]);
        model.toggle_lunch_break(MarkerId(2)).unwrap();
        assert!((position(&model, 1) - 50.0).abs() < 1e-9);
        assert!((position(&model, 2) - 60.0).abs() < 1e-9);
        assert_eq!(model.predecessor(MarkerId(2)), Some(MarkerId(3)));
        assert_eq!(model.lunch_start(MarkerId(2)), Some(MarkerId(1)));

        let outcome = model.move_marker(MarkerId(1), 10.0).unwrap();
        assert_eq!(outcome.cancelled_lunch, vec![MarkerId(2)]);
        assert!(!model.row_state(MarkerId(2)).lunch_break);
        assert_eq!(model.marker(MarkerId(1)).unwrap().color(), MarkerColor::Red);
    }

    #[test]
    fn test_lunch_off_resets_pinned_start_not_neighbour() {
        let mut model = model_at(&[0.0, 30.0, 55.0]);
        model.toggle_lunch_break(MarkerId(2)).unwrap();

        model.toggle_lunch_break(MarkerId(2)).unwrap();
        assert_eq!(model.marker(MarkerId(1)).unwrap().color(), MarkerColor::Red);
        assert_eq!(model.marker(MarkerId(3)).unwrap().color(), MarkerColor::Green);
    }

    #[test]
    fn test_second_lunch_cancels_first() {
        let mut model = model_at(&[0.0, 30.0, 80.0]);
        model.toggle_lunch_break(MarkerId(2)).unwrap();

        // #2, the first break's end, becomes the new break's start.
        let toggle = model.toggle_lunch_break(MarkerId(3)).unwrap();
        assert_eq!(
            toggle,
            LunchToggle::Enabled {
                start: Some(MarkerId(2)),
                synthesized: false
            }
        );
        assert_eq!(model.lunch_markers(), vec![MarkerId(3)]);
        assert_eq!(model.lunch_start(MarkerId(2)), None);
        assert_eq!(model.marker(MarkerId(1)).unwrap().color(), MarkerColor::Red);
        assert_eq!(
            model.marker(MarkerId(2)).unwrap().color(),
            MarkerColor::LunchStart
        );

        let lunch_rows = model.rows().iter().filter(|row| row.lunch_break).count();
        assert_eq!(lunch_rows, 1);
        assert_eq!(model.total_minutes(), 60);
    }

    #[test]
    fn test_segments_span_previous_marker() {
        let model = model_at(&[60.0, 20.0, 100.0]);
        let segments = model.segments();
        let spans: Vec<(MarkerId, f64, f64)> = segments
            .iter()
            .map(|s| (s.marker, s.start, s.end))
            .collect();
        assert_eq!(
            spans,
            vec![
                (MarkerId(2), 0.0, 20.0),
                (MarkerId(1), 20.0, 60.0),
                (MarkerId(3), 60.0, 100.0),
            ]
        );
        assert_eq!(segments[0].color, MarkerColor::Orange);
        assert!((segments[1].width() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_session_durations_follow_insertion_order() {
        let model = model_at(&[50.0, 20.0, 100.0]);
        let sessions = model.session_durations();
        assert_eq!(
            sessions,
            vec![
                (MarkerId(1), 300),
                (MarkerId(2), -180),
                (MarkerId(3), 480),
            ]
        );
    }

    #[test]
    fn test_total_minutes_with_lunch_row() {
        let mut model = model_at(&[0.0, 30.0, 100.0]);
        assert_eq!(model.total_minutes(), 600);

        model.toggle_lunch_break(MarkerId(2)).unwrap();
        // #1 pinned to 12:00, #2 to 13:00 and shown as a 60 minute row.
        let rows = model.rows();
        assert_eq!(rows[0].duration_minutes, 60);
        assert_eq!(rows[1].time_range, "13:00 - 17:00");
        assert_eq!(model.total_minutes(), 60 + 240);
    }

    #[test]
    fn test_annotations_survive_reordering() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        model.set_problem(MarkerId(3), "printer jam").unwrap();
        model.set_solution(MarkerId(3), "new toner").unwrap();
        model.move_marker(MarkerId(3), 25.0).unwrap();

        let rows = model.rows();
        assert_eq!(rows[0].marker, MarkerId(3));
        assert_eq!(rows[0].problem, "printer jam");
        assert_eq!(rows[1].problem, "");
    }

    #[test]
    fn test_move_marker_to_hour() {
        let mut model = model_at(&[0.0, 50.0, 100.0]);
        model.move_marker_to_hour(MarkerId(2), 9.5).unwrap();
        assert!((position(&model, 2) - 25.0).abs() < 1e-9);
        assert_eq!(model.rows()[0].time_range, "07:00 - 09:30");
    }
}
