use super::Interval;

/// `MM:SS` countdown text. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Timer label text, e.g. `08:20 (W1)`.
pub fn status_line(secs: u64, interval: Interval) -> String {
    format!("{} ({})", format_clock(secs), interval.label())
}

/// Window title text, e.g. `08:20 | Pom #1`. Shows the pomodoro in progress.
pub fn title_line(secs: u64, total_pomodoros: u32) -> String {
    format!("{} | Pom #{}", format_clock(secs), total_pomodoros + 1)
}
