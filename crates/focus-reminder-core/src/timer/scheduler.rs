//! Interval scheduler implementation.
//!
//! The scheduler is a tick-driven state machine. It does not own a thread or
//! a clock - the caller delivers one `tick()` per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Work1 -> Work2 -> Work3 -> Break -> Work1 (one pomodoro completed)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = IntervalScheduler::new(25 * 60);
//! scheduler.start();
//! // Once per second:
//! match scheduler.tick(&mut session) { ... }
//! ```

use serde::{Deserialize, Serialize};

use super::interval::{Interval, SoundCue};
use super::policy;
use crate::session::SessionState;

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Not running, or paused. Nothing changed.
    Idle,
    /// One second was counted down within the current interval.
    Counted { remaining_secs: u64 },
    /// The current interval had run out and the ring advanced.
    IntervalEnded(IntervalEnd),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalEnd {
    pub cue: SoundCue,
    pub next: Interval,
    pub remaining_secs: u64,
    /// Running total when this boundary closed a full pomodoro.
    pub completed_pomodoro: Option<u32>,
}

/// Work/break countdown with adaptive pomodoro length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalScheduler {
    original_pomodoro_secs: u64,
    pomodoro_secs: u64,
    break_secs: u64,
    interval: Interval,
    remaining_secs: u64,
    running: bool,
    paused: bool,
}

impl IntervalScheduler {
    /// Create a scheduler positioned at the start of `Work1`.
    ///
    /// `pomodoro_secs` must be positive; callers validate it beforehand.
    pub fn new(pomodoro_secs: u64) -> Self {
        Self {
            original_pomodoro_secs: pomodoro_secs,
            pomodoro_secs,
            break_secs: policy::break_secs(pomodoro_secs),
            interval: Interval::Work1,
            remaining_secs: policy::work_interval_secs(pomodoro_secs),
            running: false,
            paused: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn original_pomodoro_secs(&self) -> u64 {
        self.original_pomodoro_secs
    }

    pub fn pomodoro_secs(&self) -> u64 {
        self.pomodoro_secs
    }

    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a tick would currently count.
    pub fn is_counting(&self) -> bool {
        self.running && !self.paused
    }

    /// Full length of the current interval.
    pub fn interval_secs(&self) -> u64 {
        if self.interval.is_work() {
            policy::work_interval_secs(self.pomodoro_secs)
        } else {
            self.break_secs
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// First activation. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.paused = false;
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.running || self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.running || !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    /// Stop counting for good. Used when the day is closed.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self, session: &mut SessionState) -> Tick {
        if !self.is_counting() {
            return Tick::Idle;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return Tick::Counted {
                remaining_secs: self.remaining_secs,
            };
        }
        Tick::IntervalEnded(self.end_interval(session))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn end_interval(&mut self, session: &mut SessionState) -> IntervalEnd {
        let cue = self.interval.end_cue();
        self.interval = self.interval.next();

        let mut completed_pomodoro = None;
        if self.interval == Interval::Work1 {
            let count = session.record_pomodoro();
            completed_pomodoro = Some(session.total_pomodoros());
            if let Some(secs) = policy::adjusted_pomodoro_secs(self.original_pomodoro_secs, count) {
                self.pomodoro_secs = secs;
                self.break_secs = policy::break_secs(secs);
            }
        }

        self.remaining_secs = self.interval_secs();
        IntervalEnd {
            cue,
            next: self.interval,
            remaining_secs: self.remaining_secs,
            completed_pomodoro,
        }
    }
}
