//! Error types for octocov-config.
//!
//! Uses thiserror for derive macros. Load-time failures (ambiguity, I/O,
//! parse) keep the underlying error intact; validation failures carry the
//! dotted field name they complain about.

use crate::exit_codes;
use std::num::ParseFloatError;
use thiserror::Error;

/// Main error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// More than one candidate config file exists in the working directory.
    #[error("duplicate config file [{first}, {second}]")]
    DuplicateConfig { first: String, second: String },

    /// The config file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The config file is not a valid document.
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    /// The datastore section is incomplete or malformed.
    #[error("{0}")]
    Datastore(String),

    /// The central section is missing.
    #[error("{0}")]
    Central(String),

    /// A code/test pattern is not a valid glob.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// `coverage.acceptable` is not a number.
    #[error("invalid acceptable coverage '{value}': {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Coverage is below `coverage.acceptable`.
    #[error("code coverage is {actual:.1}%, which is below the accepted {required:.1}%")]
    BelowThreshold { actual: f64, required: f64 },
}

impl ConfigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::DuplicateConfig { .. }
            | ConfigError::Io(_)
            | ConfigError::Parse(_)
            | ConfigError::InvalidPattern { .. }
            | ConfigError::InvalidThreshold { .. } => exit_codes::USER_ERROR,
            ConfigError::Datastore(_) | ConfigError::Central(_) => exit_codes::VALIDATION_FAILURE,
            ConfigError::BelowThreshold { .. } => exit_codes::BELOW_THRESHOLD,
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
