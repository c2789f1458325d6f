//! Event model shared by the reader and the emitter.

/// Resolved type of a scalar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

impl ScalarTag {
    /// Short name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarTag::Null => "null",
            ScalarTag::Bool => "bool",
            ScalarTag::Int => "int",
            ScalarTag::Float => "float",
            ScalarTag::Str => "str",
        }
    }
}

/// One token of the structured-text stream.
///
/// A `Comment` documents whatever comes directly after it: a mapping key, a
/// sequence item, or a top-level node. Mapping entries are a key `Scalar`
/// followed by the events of the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StreamStart,
    StreamEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar { value: String, tag: ScalarTag },
    Comment(String),
}

impl Event {
    /// Scalar event holding a string.
    pub fn str(value: impl Into<String>) -> Self {
        Event::Scalar {
            value: value.into(),
            tag: ScalarTag::Str,
        }
    }

    /// Scalar event holding null.
    pub fn null() -> Self {
        Event::Scalar {
            value: String::new(),
            tag: ScalarTag::Null,
        }
    }

    /// Scalar event with an explicit tag.
    pub fn scalar(value: impl Into<String>, tag: ScalarTag) -> Self {
        Event::Scalar {
            value: value.into(),
            tag,
        }
    }

    /// Comment event.
    pub fn comment(text: impl Into<String>) -> Self {
        Event::Comment(text.into())
    }

    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::StreamStart => "stream start",
            Event::StreamEnd => "stream end",
            Event::MappingStart => "mapping start",
            Event::MappingEnd => "mapping end",
            Event::SequenceStart => "sequence start",
            Event::SequenceEnd => "sequence end",
            Event::Scalar { .. } => "scalar",
            Event::Comment(_) => "comment",
        }
    }
}
