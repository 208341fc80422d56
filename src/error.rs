//! Error types for the lexical-keys crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors surfaced by key construction, pattern compilation and configuration.
///
/// A key or string that does not satisfy a pattern is *not* an error; it
/// yields a [`PatternMatch`](crate::PatternMatch) whose `success()` is false.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("Pattern syntax error: {0}")]
    PatternSyntax(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for KeyError {
    fn from(err: serde_yaml::Error) -> Self {
        KeyError::Config(format!("YAML: {err}"))
    }
}

impl From<serde_json::Error> for KeyError {
    fn from(err: serde_json::Error) -> Self {
        KeyError::Config(format!("JSON: {err}"))
    }
}
