mod display;
mod interval;
mod policy;
mod scheduler;

pub use display::{format_clock, status_line, title_line};
pub use interval::{Interval, SoundCue};
pub use policy::{adjusted_pomodoro_secs, break_secs, work_interval_secs, ADJUST_EVERY, MIN_BREAK_SECS};
pub use scheduler::{IntervalEnd, IntervalScheduler, Tick};
