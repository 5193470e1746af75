//! Day lifecycle: setup, goal tracking, the interval scheduler and the
//! end-of-day assessment.
//!
//! `DayLifecycle` is synchronous and owns every piece of mutable day state.
//! Each operation queues the [`Event`]s it produced; callers collect them
//! with [`DayLifecycle::drain_events`].
//!
//! ```text
//! Setup --start_day--> Active --finish_day(restart)--> Setup
//!                        \--finish_day--> Finished
//! ```

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{truncate_label, SessionState};
use crate::error::{PersistenceError, Result, ValidationError};
use crate::events::Event;
use crate::storage::{local_now, ActivityKind, ActivityRecord, ActivitySink};
use crate::timer::{Interval, IntervalScheduler, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Setup,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// The goal was already done; nothing changed.
    AlreadyCompleted,
    Completed,
    /// Completed, and it was the last open goal.
    AllCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// State was cleared; the caller should run setup again.
    Restarted,
    /// The session is over.
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatus {
    pub goal: String,
    pub completed: bool,
}

/// Everything the expanded view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub phase: DayPhase,
    pub intention: String,
    pub goals: Vec<GoalStatus>,
    pub total_pomodoros: u32,
    pub interval: Option<Interval>,
    pub seconds_remaining: Option<u64>,
    pub pomodoro_secs: Option<u64>,
    pub break_secs: Option<u64>,
    pub running: bool,
    pub paused: bool,
}

/// Local wall clock used to stamp activity log rows.
pub type Clock = Box<dyn Fn() -> NaiveDateTime + Send>;

pub struct DayLifecycle {
    phase: DayPhase,
    session: SessionState,
    scheduler: Option<IntervalScheduler>,
    log: Box<dyn ActivitySink>,
    clock: Clock,
    pending: Vec<Event>,
}

impl DayLifecycle {
    pub fn new(log: impl ActivitySink + 'static) -> Self {
        Self {
            phase: DayPhase::Setup,
            session: SessionState::default(),
            scheduler: None,
            log: Box::new(log),
            clock: Box::new(local_now),
            pending: Vec::new(),
        }
    }

    /// Replace the clock that stamps log rows.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> DayPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn scheduler(&self) -> Option<&IntervalScheduler> {
        self.scheduler.as_ref()
    }

    pub fn snapshot(&self) -> DaySnapshot {
        let scheduler = self.scheduler.as_ref();
        DaySnapshot {
            phase: self.phase,
            intention: self.session.intention().to_string(),
            goals: self
                .session
                .goals()
                .iter()
                .map(|goal| GoalStatus {
                    goal: goal.clone(),
                    completed: self.session.is_completed(goal),
                })
                .collect(),
            total_pomodoros: self.session.total_pomodoros(),
            interval: scheduler.map(|s| s.interval()),
            seconds_remaining: scheduler.map(|s| s.remaining_secs()),
            pomodoro_secs: scheduler.map(|s| s.pomodoro_secs()),
            break_secs: scheduler.map(|s| s.break_secs()),
            running: scheduler.is_some_and(|s| s.is_running()),
            paused: scheduler.is_some_and(|s| s.is_paused()),
        }
    }

    /// Take the events queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Validate setup input and open the day.
    ///
    /// # Errors
    ///
    /// `ValidationError` for an empty intention, no goals, a non-positive
    /// length, or when a day is already active. Nothing changes on error.
    pub fn start_day(&mut self, intention: &str, goals: &[String], pomodoro_minutes: i64) -> Result<()> {
        if self.phase == DayPhase::Active {
            return Err(ValidationError::DayAlreadyActive.into());
        }
        let session = SessionState::begin(intention, goals)?;
        let pomodoro_secs = u64::try_from(pomodoro_minutes)
            .ok()
            .filter(|m| *m > 0)
            .map(|m| m.saturating_mul(60))
            .ok_or(ValidationError::NonPositiveDuration {
                minutes: pomodoro_minutes,
            })?;

        self.session = session;
        self.scheduler = Some(IntervalScheduler::new(pomodoro_secs));
        self.phase = DayPhase::Active;
        info!(
            intention = self.session.intention(),
            goals = self.session.goals().len(),
            pomodoro_secs,
            "day started"
        );

        let header = ActivityRecord::day_started(
            (self.clock)(),
            self.session.intention(),
            self.session.goals(),
        );
        let written = self
            .log
            .ensure_store(&header)
            .and_then(|created| {
                if created {
                    Ok(())
                } else {
                    self.log.append(header.date(), &header)
                }
            });
        if let Err(err) = written {
            self.report_failure(ActivityKind::DayStarted, &err);
        }

        self.pending.push(Event::DayStarted {
            intention: self.session.intention().to_string(),
            goals: self.session.goals().to_vec(),
            pomodoro_secs,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Mark a goal as done.
    ///
    /// # Errors
    ///
    /// `ValidationError` when no day is active, `NotFoundError` when `goal`
    /// is not one of today's goals.
    pub fn complete_goal(&mut self, goal: &str, remarks: Option<&str>) -> Result<GoalOutcome> {
        self.require_active()?;
        let goal = truncate_label(goal);
        let goal = goal.as_str();
        if !self.session.complete(goal)? {
            return Ok(GoalOutcome::AlreadyCompleted);
        }
        self.record(ActivityKind::GoalCompleted, goal, remarks.unwrap_or_default());
        self.pending.push(Event::GoalCompleted {
            goal: goal.to_string(),
            remarks: remarks.map(str::to_string),
            at: Utc::now(),
        });

        if self.session.all_completed() {
            info!("all goals completed");
            self.pending.push(Event::DayGoalsExhausted { at: Utc::now() });
            return Ok(GoalOutcome::AllCompleted);
        }
        Ok(GoalOutcome::Completed)
    }

    /// Append a goal. Returns the stored (trimmed, truncated) label.
    pub fn add_goal(&mut self, goal: &str) -> Result<String> {
        self.require_active()?;
        let goal = self.session.add_goal(goal)?;
        self.pending.push(Event::GoalAdded {
            goal: goal.clone(),
            at: Utc::now(),
        });
        Ok(goal)
    }

    /// Begin counting. Returns false when there is no day or it already runs.
    pub fn start(&mut self) -> bool {
        if self.phase != DayPhase::Active {
            return false;
        }
        let Some(scheduler) = self.scheduler.as_mut() else {
            return false;
        };
        if !scheduler.start() {
            return false;
        }
        self.pending.push(Event::TimerStarted {
            seconds_remaining: scheduler.remaining_secs(),
            interval: scheduler.interval(),
            at: Utc::now(),
        });
        true
    }

    /// Freeze the countdown. A non-blank `reason` is written to the log.
    pub fn pause(&mut self, reason: Option<&str>) -> bool {
        if self.phase != DayPhase::Active {
            return false;
        }
        let Some(scheduler) = self.scheduler.as_mut() else {
            return false;
        };
        if !scheduler.pause() {
            return false;
        }
        let seconds_remaining = scheduler.remaining_secs();
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if let Some(reason) = reason {
            self.record(ActivityKind::Pause, "Timer paused", reason);
        }
        self.pending.push(Event::TimerPaused {
            reason: reason.map(str::to_string),
            seconds_remaining,
            at: Utc::now(),
        });
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != DayPhase::Active {
            return false;
        }
        let Some(scheduler) = self.scheduler.as_mut() else {
            return false;
        };
        if !scheduler.resume() {
            return false;
        }
        self.pending.push(Event::TimerResumed {
            seconds_remaining: scheduler.remaining_secs(),
            at: Utc::now(),
        });
        true
    }

    /// Deliver one second to the scheduler.
    pub fn tick(&mut self) {
        let tick = match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.tick(&mut self.session),
            None => return,
        };
        let end = match tick {
            Tick::Idle => return,
            Tick::Counted { remaining_secs } => {
                self.push_tick(remaining_secs);
                return;
            }
            Tick::IntervalEnded(end) => end,
        };

        debug!(cue = end.cue.as_str(), next = end.next.label(), "interval ended");
        self.pending.push(Event::IntervalEnded {
            cue: end.cue,
            next: end.next,
            at: Utc::now(),
        });

        if let Some(number) = end.completed_pomodoro {
            self.record(ActivityKind::PomodoroCompleted, format!("Pomodoro #{number}"), "");
            if let Some(scheduler) = &self.scheduler {
                self.pending.push(Event::PomodoroCompleted {
                    number,
                    pomodoro_secs: scheduler.pomodoro_secs(),
                    break_secs: scheduler.break_secs(),
                    at: Utc::now(),
                });
            }
        }
        self.push_tick(end.remaining_secs);
    }

    /// Close the day with a self-assessment.
    ///
    /// With `restart`, all session state is cleared and the lifecycle returns
    /// to setup; otherwise it ends in `Finished`.
    ///
    /// # Errors
    ///
    /// `ValidationError` when no day is active or `rating` is outside 1..=10.
    pub fn finish_day(&mut self, rating: u8, comments: &str, restart: bool) -> Result<DayOutcome> {
        self.require_active()?;
        if !(1..=10).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange { rating }.into());
        }

        self.record(ActivityKind::EndOfDay, format!("Rating: {rating}"), comments.trim());
        self.pending.push(Event::DayFinished {
            rating,
            restart,
            at: Utc::now(),
        });
        info!(rating, restart, total_pomodoros = self.session.total_pomodoros(), "day finished");

        if restart {
            self.session.reset();
            self.scheduler = None;
            self.phase = DayPhase::Setup;
            Ok(DayOutcome::Restarted)
        } else {
            if let Some(scheduler) = self.scheduler.as_mut() {
                scheduler.stop();
            }
            self.phase = DayPhase::Finished;
            Ok(DayOutcome::Terminated)
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn require_active(&self) -> std::result::Result<(), ValidationError> {
        if self.phase == DayPhase::Active {
            Ok(())
        } else {
            Err(ValidationError::NoActiveDay)
        }
    }

    fn push_tick(&mut self, seconds_remaining: u64) {
        if let Some(scheduler) = &self.scheduler {
            self.pending.push(Event::Tick {
                seconds_remaining,
                interval: scheduler.interval(),
                total_pomodoros: self.session.total_pomodoros(),
            });
        }
    }

    /// Write one row. A failure is reported and swallowed.
    fn record(&mut self, kind: ActivityKind, detail: impl Into<String>, remarks: impl Into<String>) {
        let record = ActivityRecord::new((self.clock)(), kind, detail, remarks);
        let header = ActivityRecord::day_started(
            record.timestamp,
            self.session.intention(),
            self.session.goals(),
        );
        let written = self
            .log
            .ensure_store(&header)
            .and_then(|_| self.log.append(record.date(), &record));
        if let Err(err) = written {
            self.report_failure(kind, &err);
        }
    }

    fn report_failure(&mut self, kind: ActivityKind, err: &PersistenceError) {
        warn!(error = %err, event = kind.as_str(), "activity log write failed");
        self.pending.push(Event::LogWriteFailed {
            kind,
            message: err.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, NotFoundError};
    use crate::storage::MemoryActivityLog;
    use crate::timer::SoundCue;

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn active_day() -> (DayLifecycle, MemoryActivityLog) {
        let log = MemoryActivityLog::new();
        let mut day = DayLifecycle::new(log.clone());
        day.start_day("Ship the report", &goals(&["Draft", "Review", "Send"]), 25)
            .unwrap();
        day.drain_events();
        (day, log)
    }

    fn kinds(log: &MemoryActivityLog) -> Vec<ActivityKind> {
        log.all_records().iter().map(|r| r.kind).collect()
    }

    /// Failing sink for persistence error tests.
    struct BrokenSink;

    impl ActivitySink for BrokenSink {
        fn ensure_store(
            &mut self,
            _header: &ActivityRecord,
        ) -> std::result::Result<bool, PersistenceError> {
            Err(PersistenceError::Unavailable("disk gone".into()))
        }

        fn append(
            &mut self,
            _date: chrono::NaiveDate,
            _record: &ActivityRecord,
        ) -> std::result::Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("disk gone".into()))
        }
    }

    #[test]
    fn start_day_initializes_scheduler() {
        let (day, log) = active_day();
        let scheduler = day.scheduler().unwrap();
        assert_eq!(day.phase(), DayPhase::Active);
        assert_eq!(scheduler.remaining_secs(), 500);
        assert_eq!(scheduler.interval(), Interval::Work1);
        assert_eq!(scheduler.original_pomodoro_secs(), 1500);

        let records = log.all_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ActivityKind::DayStarted);
        assert_eq!(records[0].detail, "Ship the report");
        assert_eq!(records[0].remarks, "Draft, Review, Send");
    }

    #[test]
    fn start_day_validation_mutates_nothing() {
        let log = MemoryActivityLog::new();
        let mut day = DayLifecycle::new(log.clone());

        for (intention, goal_list, minutes) in [
            ("", goals(&["Draft"]), 25),
            ("Focus", Vec::new(), 25),
            ("Focus", goals(&["Draft"]), 0),
            ("Focus", goals(&["Draft"]), -3),
        ] {
            let err = day.start_day(intention, &goal_list, minutes).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{err}");
        }
        assert_eq!(day.phase(), DayPhase::Setup);
        assert!(day.scheduler().is_none());
        assert!(day.drain_events().is_empty());
        assert!(log.all_records().is_empty());
    }

    #[test]
    fn start_day_twice_is_rejected() {
        let (mut day, _log) = active_day();
        let err = day.start_day("Again", &goals(&["x"]), 25).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DayAlreadyActive)
        ));
    }

    #[test]
    fn complete_goal_logs_once() {
        let (mut day, log) = active_day();
        assert_eq!(
            day.complete_goal("Draft", Some("first pass")).unwrap(),
            GoalOutcome::Completed
        );
        assert_eq!(
            day.complete_goal("Draft", Some("again")).unwrap(),
            GoalOutcome::AlreadyCompleted
        );

        let completed: Vec<_> = log
            .all_records()
            .into_iter()
            .filter(|r| r.kind == ActivityKind::GoalCompleted)
            .collect();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].detail, "Draft");
        assert_eq!(completed[0].remarks, "first pass");
        assert_eq!(day.session().completed_goals(), &goals(&["Draft"])[..]);
    }

    #[test]
    fn unknown_goal_is_not_found() {
        let (mut day, log) = active_day();
        let err = day.complete_goal("Lunch", None).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(NotFoundError::Goal(_))));
        assert!(day.session().completed_goals().is_empty());
        assert_eq!(kinds(&log), vec![ActivityKind::DayStarted]);
        assert!(day.drain_events().is_empty());
    }

    #[test]
    fn last_goal_signals_exhaustion() {
        let (mut day, _log) = active_day();
        day.complete_goal("Draft", None).unwrap();
        day.complete_goal("Review", None).unwrap();
        day.drain_events();
        assert_eq!(
            day.complete_goal("Send", None).unwrap(),
            GoalOutcome::AllCompleted
        );
        let events = day.drain_events();
        assert!(matches!(events.last(), Some(Event::DayGoalsExhausted { .. })));

        day.add_goal("Celebrate").unwrap();
        assert_eq!(
            day.complete_goal("Celebrate", None).unwrap(),
            GoalOutcome::AllCompleted
        );
    }

    #[test]
    fn pause_logs_only_with_reason() {
        let (mut day, log) = active_day();
        assert!(!day.pause(Some("not running yet")));
        assert!(day.start());
        assert!(day.pause(None));
        assert!(day.resume());
        assert!(day.pause(Some("  ")));
        assert!(day.resume());
        assert!(day.pause(Some("coffee")));

        let pauses: Vec<_> = log
            .all_records()
            .into_iter()
            .filter(|r| r.kind == ActivityKind::Pause)
            .collect();
        assert_eq!(pauses.len(), 1);
        assert_eq!(pauses[0].detail, "Timer paused");
        assert_eq!(pauses[0].remarks, "coffee");
    }

    #[test]
    fn paused_ticks_do_not_count() {
        let (mut day, _log) = active_day();
        day.start();
        day.tick();
        day.pause(None);
        day.drain_events();
        for _ in 0..30 {
            day.tick();
        }
        assert!(day.drain_events().is_empty());
        assert_eq!(day.scheduler().unwrap().remaining_secs(), 499);
    }

    #[test]
    fn tick_events_follow_boundary() {
        let log = MemoryActivityLog::new();
        let mut day = DayLifecycle::new(log);
        day.start_day("Focus", &goals(&["Draft"]), 1).unwrap();
        day.start();
        for _ in 0..20 {
            day.tick();
        }
        day.drain_events();

        day.tick();
        let events = day.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            Event::IntervalEnded {
                cue: SoundCue::WorkEnd,
                next: Interval::Work2,
                ..
            }
        ));
        assert_eq!(
            events[1],
            Event::Tick {
                seconds_remaining: 20,
                interval: Interval::Work2,
                total_pomodoros: 0,
            }
        );
    }

    #[test]
    fn completed_cycle_logs_pomodoro() {
        let (mut day, log) = active_day();
        day.start();
        // Three 500s work intervals and a 360s break, plus one boundary tick each.
        for _ in 0..(3 * 501 + 361) {
            day.tick();
        }
        assert_eq!(day.session().total_pomodoros(), 1);
        assert_eq!(day.scheduler().unwrap().interval(), Interval::Work1);

        let pomodoros: Vec<_> = log
            .all_records()
            .into_iter()
            .filter(|r| r.kind == ActivityKind::PomodoroCompleted)
            .collect();
        assert_eq!(pomodoros.len(), 1);
        assert_eq!(pomodoros[0].detail, "Pomodoro #1");
    }

    #[test]
    fn finish_day_with_restart_clears_state() {
        let (mut day, log) = active_day();
        day.start();
        for _ in 0..(3 * 501 + 361) {
            day.tick();
        }
        day.complete_goal("Draft", None).unwrap();

        assert_eq!(
            day.finish_day(8, "good day", true).unwrap(),
            DayOutcome::Restarted
        );
        assert_eq!(day.phase(), DayPhase::Setup);
        assert!(day.scheduler().is_none());
        assert!(day.session().goals().is_empty());
        assert!(day.session().completed_goals().is_empty());
        assert_eq!(day.session().total_pomodoros(), 0);
        assert_eq!(day.session().pomodoro_count(), 0);

        let end: Vec<_> = log
            .all_records()
            .into_iter()
            .filter(|r| r.kind == ActivityKind::EndOfDay)
            .collect();
        assert_eq!(end.len(), 1);
        assert_eq!(end[0].detail, "Rating: 8");
        assert_eq!(end[0].remarks, "good day");

        day.start_day("Second wind", &goals(&["Inbox"]), 30).unwrap();
        assert_eq!(day.scheduler().unwrap().remaining_secs(), 600);
    }

    #[test]
    fn restart_on_same_day_appends_new_header() {
        let (mut day, log) = active_day();
        day.finish_day(5, "", true).unwrap();
        day.start_day("Second wind", &goals(&["Inbox"]), 30).unwrap();
        assert_eq!(
            kinds(&log),
            vec![
                ActivityKind::DayStarted,
                ActivityKind::EndOfDay,
                ActivityKind::DayStarted
            ]
        );
        assert_eq!(log.all_records()[2].detail, "Second wind");
    }

    #[test]
    fn finish_day_without_restart_terminates() {
        let (mut day, _log) = active_day();
        day.start();
        assert_eq!(
            day.finish_day(10, "", false).unwrap(),
            DayOutcome::Terminated
        );
        assert_eq!(day.phase(), DayPhase::Finished);
        day.tick();
        assert!(!day
            .drain_events()
            .iter()
            .any(|e| matches!(e, Event::Tick { .. })));
    }

    #[test]
    fn finished_day_rejects_further_activity() {
        let (mut day, log) = active_day();
        assert!(day.start());
        day.finish_day(7, "", false).unwrap();
        day.drain_events();

        assert!(!day.start());
        assert!(!day.pause(Some("late call")));
        assert!(!day.resume());
        for _ in 0..(3 * 501 + 361) {
            day.tick();
        }
        assert!(matches!(
            day.complete_goal("Draft", None),
            Err(CoreError::Validation(ValidationError::NoActiveDay))
        ));
        assert!(matches!(
            day.add_goal("Overtime"),
            Err(CoreError::Validation(ValidationError::NoActiveDay))
        ));

        assert!(day.drain_events().is_empty());
        assert_eq!(day.session().total_pomodoros(), 0);
        assert_eq!(
            kinds(&log),
            vec![ActivityKind::DayStarted, ActivityKind::EndOfDay]
        );
    }

    #[test]
    fn setup_phase_rejects_goal_changes() {
        let mut day = DayLifecycle::new(MemoryActivityLog::new());
        assert!(matches!(
            day.add_goal("Inbox"),
            Err(CoreError::Validation(ValidationError::NoActiveDay))
        ));
        assert!(!day.start());
        assert!(day.drain_events().is_empty());

        day.start_day("Focus", &goals(&["Draft"]), 25).unwrap();
        assert_eq!(day.session().goals(), &goals(&["Draft"])[..]);
    }

    #[test]
    fn goal_matches_by_stored_label() {
        let log = MemoryActivityLog::new();
        let mut day = DayLifecycle::new(log.clone());
        let long = "Write the quarterly planning memo for the team";
        day.start_day("Focus", &goals(&[long]), 25).unwrap();
        let stored = day.session().goals()[0].clone();
        assert_eq!(stored.chars().count(), 28);

        assert_eq!(
            day.complete_goal(&format!("  {long} "), None).unwrap(),
            GoalOutcome::AllCompleted
        );
        assert_eq!(log.all_records().last().unwrap().detail, stored);
    }

    #[test]
    fn finish_day_validates_rating() {
        let (mut day, log) = active_day();
        for rating in [0, 11] {
            assert!(matches!(
                day.finish_day(rating, "", false),
                Err(CoreError::Validation(ValidationError::RatingOutOfRange { .. }))
            ));
        }
        assert_eq!(day.phase(), DayPhase::Active);
        assert_eq!(kinds(&log), vec![ActivityKind::DayStarted]);

        let mut fresh = DayLifecycle::new(MemoryActivityLog::new());
        assert!(matches!(
            fresh.finish_day(5, "", false),
            Err(CoreError::Validation(ValidationError::NoActiveDay))
        ));
    }

    #[test]
    fn persistence_failure_is_not_fatal() {
        let mut day = DayLifecycle::new(BrokenSink);
        day.start_day("Focus", &goals(&["Draft"]), 1).unwrap();
        day.start();
        day.complete_goal("Draft", Some("done")).unwrap();
        for _ in 0..(3 * 21 + 361) {
            day.tick();
        }

        assert!(day.session().is_completed("Draft"));
        assert_eq!(day.session().total_pomodoros(), 1);
        let failures = day
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, Event::LogWriteFailed { .. }))
            .count();
        // day_started, goal_completed, pomodoro_completed
        assert_eq!(failures, 3);
    }

    #[test]
    fn snapshot_reports_goal_status() {
        let (mut day, _log) = active_day();
        day.complete_goal("Review", None).unwrap();
        let snapshot = day.snapshot();
        assert_eq!(snapshot.intention, "Ship the report");
        assert_eq!(
            snapshot.goals[1],
            GoalStatus {
                goal: "Review".into(),
                completed: true
            }
        );
        assert_eq!(snapshot.seconds_remaining, Some(500));
        assert!(!snapshot.running);
    }
}
