//! Error types for reading and emitting event streams.

use thiserror::Error;

/// Errors returned while reading or emitting an event stream.
#[derive(Debug, Error)]
pub enum EventError {
    /// The input text is not well-formed.
    ///
    /// `line` and `column` are 1-based when the parser reports a position.
    #[error("failed to parse config: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Reading from or writing to the stream failed.
    #[error("stream io failed: {0}")]
    Io(#[from] std::io::Error),
    /// A scalar's text does not match its tag.
    #[error("invalid {tag} scalar '{value}'")]
    InvalidScalar { value: String, tag: &'static str },
    /// Rendering a quoted scalar failed.
    #[error("failed to render scalar: {0}")]
    Render(#[from] serde_json::Error),
    /// The event sequence does not describe a single well-nested document.
    #[error("unbalanced event stream: {0}")]
    Unbalanced(String),
}

impl EventError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        EventError::Parse {
            message: message.into(),
            line: None,
            column: None,
        }
    }
}

impl From<serde_yaml::Error> for EventError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        EventError::Parse {
            message: err.to_string(),
            line: location.as_ref().map(|loc| loc.line()),
            column: location.as_ref().map(|loc| loc.column()),
        }
    }
}
