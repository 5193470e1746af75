//! Per-day session data: intention, goals and pomodoro counters.

mod day;

pub use day::{Clock, DayLifecycle, DayOutcome, DayPhase, DaySnapshot, GoalOutcome, GoalStatus};

use serde::{Deserialize, Serialize};

use crate::error::{NotFoundError, ValidationError};

/// Longest intention or goal label, in characters.
pub const MAX_LABEL_CHARS: usize = 28;

/// Trim and cut a label to [`MAX_LABEL_CHARS`] characters.
pub fn truncate_label(raw: &str) -> String {
    raw.trim().chars().take(MAX_LABEL_CHARS).collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    intention: String,
    /// Display order.
    goals: Vec<String>,
    /// Completion order; never holds a label twice.
    completed: Vec<String>,
    /// Feeds the adaptive timing policy.
    pomodoro_count: u32,
    total_pomodoros: u32,
}

impl SessionState {
    /// Validate and normalize setup input.
    ///
    /// Blank goal entries are dropped before checking that at least one goal
    /// remains.
    pub fn begin(intention: &str, goals: &[String]) -> Result<Self, ValidationError> {
        let intention = truncate_label(intention);
        if intention.is_empty() {
            return Err(ValidationError::EmptyIntention);
        }
        let goals: Vec<String> = goals
            .iter()
            .map(|g| truncate_label(g))
            .filter(|g| !g.is_empty())
            .collect();
        if goals.is_empty() {
            return Err(ValidationError::NoGoals);
        }
        Ok(Self {
            intention,
            goals,
            ..Self::default()
        })
    }

    pub fn intention(&self) -> &str {
        &self.intention
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn completed_goals(&self) -> &[String] {
        &self.completed
    }

    pub fn pending_goals(&self) -> impl Iterator<Item = &String> {
        self.goals.iter().filter(|g| !self.is_completed(g))
    }

    pub fn is_completed(&self, goal: &str) -> bool {
        self.completed.iter().any(|g| g == goal)
    }

    /// Every goal is completed.
    pub fn all_completed(&self) -> bool {
        !self.goals.is_empty() && self.goals.iter().all(|g| self.is_completed(g))
    }

    pub fn pomodoro_count(&self) -> u32 {
        self.pomodoro_count
    }

    pub fn total_pomodoros(&self) -> u32 {
        self.total_pomodoros
    }

    /// Mark `goal` done. Returns `Ok(false)` when it already was.
    pub(crate) fn complete(&mut self, goal: &str) -> Result<bool, NotFoundError> {
        if !self.goals.iter().any(|g| g == goal) {
            return Err(NotFoundError::Goal(goal.to_string()));
        }
        if self.is_completed(goal) {
            return Ok(false);
        }
        self.completed.push(goal.to_string());
        Ok(true)
    }

    /// Append a goal and return its stored label.
    pub(crate) fn add_goal(&mut self, goal: &str) -> Result<String, ValidationError> {
        let goal = truncate_label(goal);
        if goal.is_empty() {
            return Err(ValidationError::EmptyGoal);
        }
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Count a finished pomodoro. Returns the policy count.
    pub(crate) fn record_pomodoro(&mut self) -> u32 {
        self.pomodoro_count += 1;
        self.total_pomodoros += 1;
        self.pomodoro_count
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn begin_truncates_to_28_chars() {
        let long = "a".repeat(40);
        let state = SessionState::begin(&long, &goals(&[&long])).unwrap();
        assert_eq!(state.intention().chars().count(), MAX_LABEL_CHARS);
        assert_eq!(state.goals()[0].chars().count(), MAX_LABEL_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let label = "é".repeat(30);
        assert_eq!(truncate_label(&label), "é".repeat(28));
    }

    #[test]
    fn begin_rejects_blank_input() {
        assert_eq!(
            SessionState::begin("   ", &goals(&["Draft"])).unwrap_err(),
            ValidationError::EmptyIntention
        );
        assert_eq!(
            SessionState::begin("Focus", &goals(&["", "  "])).unwrap_err(),
            ValidationError::NoGoals
        );
        assert_eq!(
            SessionState::begin("Focus", &[]).unwrap_err(),
            ValidationError::NoGoals
        );
    }

    #[test]
    fn begin_drops_blank_goals() {
        let state = SessionState::begin("Focus", &goals(&["Draft", "", "Send"])).unwrap();
        assert_eq!(state.goals(), &goals(&["Draft", "Send"])[..]);
    }

    #[test]
    fn complete_is_idempotent_and_bounded() {
        let mut state = SessionState::begin("Focus", &goals(&["Draft", "Send"])).unwrap();
        assert_eq!(state.complete("Draft"), Ok(true));
        assert_eq!(state.complete("Draft"), Ok(false));
        assert_eq!(
            state.complete("Nope"),
            Err(NotFoundError::Goal("Nope".into()))
        );
        assert_eq!(state.completed_goals(), &goals(&["Draft"])[..]);
        assert!(!state.all_completed());
        state.complete("Send").unwrap();
        assert!(state.all_completed());
        assert_eq!(state.pending_goals().count(), 0);
    }

    #[test]
    fn added_goal_reopens_the_day() {
        let mut state = SessionState::begin("Focus", &goals(&["Draft"])).unwrap();
        state.complete("Draft").unwrap();
        assert!(state.all_completed());
        assert_eq!(state.add_goal("  Polish slides ").unwrap(), "Polish slides");
        assert!(!state.all_completed());
        assert_eq!(state.add_goal(" "), Err(ValidationError::EmptyGoal));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = SessionState::begin("Focus", &goals(&["Draft"])).unwrap();
        state.complete("Draft").unwrap();
        state.record_pomodoro();
        state.reset();
        assert!(state.intention().is_empty());
        assert!(state.goals().is_empty());
        assert!(state.completed_goals().is_empty());
        assert_eq!(state.pomodoro_count(), 0);
        assert_eq!(state.total_pomodoros(), 0);
    }
}
