//! Configuration error types

use thiserror::Error;

/// A textual value could not be converted into an option type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse `{value}` as {expected}: {reason}")]
pub struct ValueParseError {
    /// The rejected input
    pub value: String,
    /// Human readable name of the target type
    pub expected: &'static str,
    /// Why the conversion failed
    pub reason: String,
}

impl ValueParseError {
    pub fn new(value: &str, expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            expected,
            reason: reason.into(),
        }
    }
}

/// Errors raised while updating options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No option with this name is registered in the section
    #[error("unknown option `{section}/{option}`")]
    UnknownOption { section: String, option: String },

    /// The option rejected the textual value; its previous value is kept
    #[error("invalid value for option `{option}`: {source}")]
    InvalidValue {
        option: String,
        #[source]
        source: ValueParseError,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
