//! # Focus Reminder Core Library
//!
//! This library provides the core logic of the Focus Reminder timer: a day
//! of structured work/break intervals, a daily intention with goals, and an
//! append-only activity log. Presentation, sound playback and editors live in
//! the callers; the core decides when state changes and what gets recorded.
//!
//! ## Architecture
//!
//! - **Interval Scheduler**: tick-driven `Work1 -> Work2 -> Work3 -> Break`
//!   ring with an adaptive pomodoro length
//! - **Session**: intention, goals and counters, plus the day lifecycle that
//!   ties them to the scheduler and the log
//! - **Storage**: date-partitioned CSV activity log and TOML configuration
//! - **Controller**: async wrapper that drives the scheduler once per second
//!
//! ## Key Components
//!
//! - [`IntervalScheduler`]: Work/break state machine
//! - [`DayLifecycle`]: Day setup, goals, end-of-day assessment
//! - [`FocusController`]: Tick task and event stream
//! - [`CsvActivityLog`]: Daily activity log files
//! - [`Config`]: Application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use controller::FocusController;
pub use error::{ConfigError, CoreError, NotFoundError, PersistenceError, ValidationError};
pub use events::Event;
pub use session::{DayLifecycle, DayOutcome, DayPhase, DaySnapshot, GoalOutcome, GoalStatus, SessionState};
pub use storage::{
    ActivityKind, ActivityRecord, ActivitySink, Config, CsvActivityLog, MemoryActivityLog,
};
pub use timer::{Interval, IntervalScheduler, SoundCue, Tick};
