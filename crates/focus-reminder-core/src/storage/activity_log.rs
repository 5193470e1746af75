//! Append-only, date-partitioned activity log.
//!
//! Every store holds the rows of one calendar day. The first row of a store
//! is always `day_started`; rows are only ever appended.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Timestamp column format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Store key format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    DayStarted,
    GoalCompleted,
    Pause,
    PomodoroCompleted,
    EndOfDay,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::DayStarted => "day_started",
            ActivityKind::GoalCompleted => "goal_completed",
            ActivityKind::Pause => "pause",
            ActivityKind::PomodoroCompleted => "pomodoro_completed",
            ActivityKind::EndOfDay => "end_of_day",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day_started" => Ok(ActivityKind::DayStarted),
            "goal_completed" => Ok(ActivityKind::GoalCompleted),
            "pause" => Ok(ActivityKind::Pause),
            "pomodoro_completed" => Ok(ActivityKind::PomodoroCompleted),
            "end_of_day" => Ok(ActivityKind::EndOfDay),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

/// One row of a day's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub timestamp: NaiveDateTime,
    pub kind: ActivityKind,
    pub detail: String,
    pub remarks: String,
}

impl ActivityRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        kind: ActivityKind,
        detail: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            detail: detail.into(),
            remarks: remarks.into(),
        }
    }

    /// Record stamped with the local wall clock, at whole-second precision.
    pub fn now(kind: ActivityKind, detail: impl Into<String>, remarks: impl Into<String>) -> Self {
        Self::new(local_now(), kind, detail, remarks)
    }

    /// Header row of a day's store.
    pub fn day_started(timestamp: NaiveDateTime, intention: &str, goals: &[String]) -> Self {
        Self::new(timestamp, ActivityKind::DayStarted, intention, goals.join(", "))
    }

    /// Store this record belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

pub(crate) fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Persistence sink for activity records.
pub trait ActivitySink: Send {
    /// Create the store for `header.date()` if it does not exist yet.
    ///
    /// `header` is the `day_started` record that opens a new store. Returns
    /// `true` when the store was created by this call.
    fn ensure_store(&mut self, header: &ActivityRecord) -> Result<bool, PersistenceError>;

    /// Append one record to an existing store.
    fn append(&mut self, date: NaiveDate, record: &ActivityRecord) -> Result<(), PersistenceError>;
}
