use serde::{Deserialize, Serialize};

/// One slot of the four-interval pomodoro ring.
///
/// ```text
/// Work1 -> Work2 -> Work3 -> Break -> Work1 -> ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Work1,
    Work2,
    Work3,
    Break,
}

impl Interval {
    pub const CYCLE: [Interval; 4] = [
        Interval::Work1,
        Interval::Work2,
        Interval::Work3,
        Interval::Break,
    ];

    pub fn index(self) -> usize {
        match self {
            Interval::Work1 => 0,
            Interval::Work2 => 1,
            Interval::Work3 => 2,
            Interval::Break => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::CYCLE[(self.index() + 1) % Self::CYCLE.len()]
    }

    pub fn is_work(self) -> bool {
        !matches!(self, Interval::Break)
    }

    /// Short label used in the timer display.
    pub fn label(self) -> &'static str {
        match self {
            Interval::Work1 => "W1",
            Interval::Work2 => "W2",
            Interval::Work3 => "W3",
            Interval::Break => "Break",
        }
    }

    /// Sound class announced when this interval runs out.
    pub fn end_cue(self) -> SoundCue {
        if self.is_work() {
            SoundCue::WorkEnd
        } else {
            SoundCue::BreakEnd
        }
    }
}

/// Sound class emitted at an interval boundary. Playback belongs to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    WorkEnd,
    BreakEnd,
}

impl SoundCue {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::WorkEnd => "work_end",
            SoundCue::BreakEnd => "break_end",
        }
    }
}
