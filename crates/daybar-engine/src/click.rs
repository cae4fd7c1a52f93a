//! Single/double click disambiguation.
//!
//! A click arms a [`Deadline`]. A second click on the same target before the
//! deadline is a double click; otherwise the first click fires as a single
//! click once the deadline passes. Callers drive time explicitly by passing
//! `now`, so the machine is deterministic under test.
//!
//! ```text
//! Idle ──click──▶ PendingSingle ──click (same target, in time)──▶ Idle   => Double
//!                      │
//!                      └──poll past deadline──▶ Fired                   => Single
//! ```

use std::time::{Duration, Instant};

/// Default double-click window.
pub const DEFAULT_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// A cancellable one-shot timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Arm the timer to expire `after` from `now`.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.at = Some(now + after);
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Whether an armed timer has run out at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Time left before expiry, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(now))
    }
}

/// A resolved gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickGesture<T> {
    Single(T),
    Double(T),
}

impl<T> ClickGesture<T> {
    pub fn target(&self) -> &T {
        match self {
            Self::Single(target) | Self::Double(target) => target,
        }
    }
}

/// Where the machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPhase {
    Idle,
    PendingSingle,
    Fired,
}

#[derive(Debug, Clone)]
enum State<T> {
    Idle,
    PendingSingle(T),
    Fired(T),
}

/// Click state machine for targets of type `T` (e.g. a row's marker id).
#[derive(Debug, Clone)]
pub struct ClickDisambiguator<T> {
    window: Duration,
    state: State<T>,
    timer: Deadline,
}

impl<T> Default for ClickDisambiguator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_WINDOW)
    }
}

impl<T> ClickDisambiguator<T> {
    /// Create a machine with the given double-click window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: State::Idle,
            timer: Deadline::default(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn phase(&self) -> ClickPhase {
        match self.state {
            State::Idle => ClickPhase::Idle,
            State::PendingSingle(_) => ClickPhase::PendingSingle,
            State::Fired(_) => ClickPhase::Fired,
        }
    }

    /// Whether a single click is waiting for the window to close.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::PendingSingle(_))
    }

    /// Target of the single click that fired last, until the next click.
    pub fn last_fired(&self) -> Option<&T> {
        match &self.state {
            State::Fired(target) => Some(target),
            _ => None,
        }
    }

    /// Time until a pending single click fires.
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        if self.is_pending() {
            self.timer.remaining(now)
        } else {
            None
        }
    }

    /// Drop a pending click without firing it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.state = State::Idle;
    }
}

impl<T: PartialEq + Clone> ClickDisambiguator<T> {
    /// Register a click on `target` at `now`.
    ///
    /// Returns a double click when it completes one, or a pending single
    /// click on another target that this click flushes out.
    pub fn click(&mut self, target: T, now: Instant) -> Option<ClickGesture<T>> {
        let previous = std::mem::replace(&mut self.state, State::Idle);

        match previous {
            State::PendingSingle(pending) if pending == target && !self.timer.is_expired(now) => {
                self.timer.cancel();
                Some(ClickGesture::Double(target))
            }
            State::PendingSingle(pending) => {
                self.timer.arm(now, self.window);
                self.state = State::PendingSingle(target);
                Some(ClickGesture::Single(pending))
            }
            State::Idle | State::Fired(_) => {
                self.timer.arm(now, self.window);
                self.state = State::PendingSingle(target);
                None
            }
        }
    }

    /// Fire a pending single click whose window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<ClickGesture<T>> {
        match &self.state {
            State::PendingSingle(pending) if self.timer.is_expired(now) => {
                let pending = pending.clone();
                self.timer.cancel();
                self.state = State::Fired(pending.clone());
                Some(ClickGesture::Single(pending))
            }
            _ => None,
        }
    }
}
