use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::DaySnapshot;
use crate::storage::ActivityKind;
use crate::timer::{Interval, SoundCue};

/// Every state change in the system produces an Event.
/// The presentation surface consumes them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    DayStarted {
        intention: String,
        goals: Vec<String>,
        pomodoro_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        seconds_remaining: u64,
        interval: Interval,
        at: DateTime<Utc>,
    },
    TimerPaused {
        reason: Option<String>,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    /// Display refresh, once per counted second and after every boundary.
    Tick {
        seconds_remaining: u64,
        interval: Interval,
        total_pomodoros: u32,
    },
    IntervalEnded {
        cue: SoundCue,
        next: Interval,
        at: DateTime<Utc>,
    },
    PomodoroCompleted {
        number: u32,
        pomodoro_secs: u64,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    GoalCompleted {
        goal: String,
        remarks: Option<String>,
        at: DateTime<Utc>,
    },
    GoalAdded {
        goal: String,
        at: DateTime<Utc>,
    },
    /// Every goal is done; the user should be asked whether the day is over.
    DayGoalsExhausted {
        at: DateTime<Utc>,
    },
    DayFinished {
        rating: u8,
        restart: bool,
        at: DateTime<Utc>,
    },
    /// An activity log write failed. The in-memory change still took effect.
    LogWriteFailed {
        kind: ActivityKind,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot(DaySnapshot),
}
