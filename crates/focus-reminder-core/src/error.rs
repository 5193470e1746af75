//! Core error types for focus-reminder-core.
//!
//! This module defines the error hierarchy using thiserror. Validation and
//! lookup failures are surfaced to the caller before any state changes;
//! persistence failures are recovered locally by the day lifecycle.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focus-reminder-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup errors
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Activity log errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input rejected before any state was touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("daily intention must not be empty")]
    EmptyIntention,

    #[error("at least one goal is required")]
    NoGoals,

    #[error("goal must not be empty")]
    EmptyGoal,

    #[error("pomodoro length must be positive, got {minutes} minutes")]
    NonPositiveDuration { minutes: i64 },

    #[error("rating must be between 1 and 10, got {rating}")]
    RatingOutOfRange { rating: u8 },

    #[error("no day is active")]
    NoActiveDay,

    #[error("a day is already active")]
    DayAlreadyActive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("goal '{0}' is not in today's goals")]
    Goal(String),
}

/// Activity log failures.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to create log store at {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to {path}: {source}")]
    AppendFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row {line} in {path}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("log store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
