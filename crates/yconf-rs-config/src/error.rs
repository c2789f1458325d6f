//! Error types for schema checking, validation and document access.

use thiserror::Error;
use yconf_rs_events::EventError;

/// Errors returned by schema, load, dump and path operations.
///
/// Validation-related variants carry the dotted path from the document root
/// to the offending node.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input text is not well-formed.
    #[error("failed to parse config: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// A required key is absent and has no default.
    #[error("missing required value at {}", display_path(.path))]
    MissingKey { path: String },
    /// A key is present that the schema does not declare.
    #[error("unknown key at {}", display_path(.path))]
    UnknownKey { path: String },
    /// A value fails its element's type, choice, range or pattern check.
    #[error("invalid value at {}: {message}", display_path(.path))]
    Validation { path: String, message: String },
    /// The schema itself is inconsistent.
    #[error("invalid schema at {}: {message}", display_path(.path))]
    Schema { path: String, message: String },
    /// A dotted path does not resolve against the document.
    #[error("unresolved path {}: {message}", display_path(.path))]
    Path { path: String, message: String },
    /// Reading or writing a config stream failed.
    #[error("config io failed: {0}")]
    Io(#[from] std::io::Error),
    /// Converting a document into a typed value failed.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// The element tree produced events that cannot be written.
    #[error("failed to emit config: {0}")]
    Emit(String),
}

impl ConfigError {
    /// Dotted path carried by the error, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfigError::MissingKey { path }
            | ConfigError::UnknownKey { path }
            | ConfigError::Validation { path, .. }
            | ConfigError::Schema { path, .. }
            | ConfigError::Path { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn validation(path: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn schema(path: &str, message: impl Into<String>) -> Self {
        ConfigError::Schema {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unresolved(path: &str, message: impl Into<String>) -> Self {
        ConfigError::Path {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl From<EventError> for ConfigError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Parse {
                message,
                line,
                column,
            } => ConfigError::Parse {
                message,
                line,
                column,
            },
            EventError::Io(err) => ConfigError::Io(err),
            other => ConfigError::Emit(other.to_string()),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}
