mod activity_log;
mod config;
mod csv_log;
mod memory_log;

pub use activity_log::{
    ActivityKind, ActivityRecord, ActivitySink, DATE_FORMAT, TIMESTAMP_FORMAT,
};
pub(crate) use activity_log::local_now;
pub use config::{Config, LogConfig, NotificationsConfig, ScheduleConfig};
pub use csv_log::CsvActivityLog;
pub use memory_log::MemoryActivityLog;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focus-reminder[-dev]/` based on FOCUS_REMINDER_ENV.
///
/// Set FOCUS_REMINDER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUS_REMINDER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focus-reminder-dev")
    } else {
        base_dir.join("focus-reminder")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
