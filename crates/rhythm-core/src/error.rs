//! Core error types for rhythm-core.
//!
//! Parsing of rulesets is tolerant and never produces errors; everything
//! here comes from configuration, user input that names things (weekdays,
//! config keys), or the external collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rhythm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator (tracker, to-do list, calendar) rejected a call
    #[error("Integration error for '{service}': {message}")]
    Integration {
        service: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Build an integration error without an underlying source.
    pub fn integration(service: &str, message: impl Into<String>) -> Self {
        CoreError::Integration {
            service: service.to_string(),
            message: message.into(),
            source: None,
        }
    }
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Home/data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Weekday name did not match any day
    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    /// UTC offset string was not of the form +HH:MM / -HH:MM
    #[error("Invalid UTC offset '{0}'")]
    InvalidUtcOffset(String),

    /// Completion identifier could not be parsed
    #[error("Invalid completion identifier '{0}'")]
    InvalidLeafId(String),

    /// Ruleset or day file name contained path separators or was empty
    #[error("Invalid ruleset name '{0}'")]
    InvalidRulesetName(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
