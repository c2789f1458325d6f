//! Conversion between documents and event streams.

use super::{Mapping, Value};
use crate::ConfigError;
use yconf_rs_events::{Event, ScalarTag, read_events_str};

impl Value {
    /// Build a document from a complete event stream, ignoring comments.
    pub fn from_events(events: &[Event]) -> Result<Value, ConfigError> {
        let mut builder = Builder { events, pos: 0 };
        builder.expect_start()?;
        let value = match builder.peek() {
            Some(Event::StreamEnd) => Value::Null,
            _ => builder.node()?,
        };
        builder.skip_comments();
        match builder.events.get(builder.pos) {
            Some(Event::StreamEnd) if builder.pos + 1 == events.len() => Ok(value),
            _ => Err(malformed("expected a single document followed by stream end")),
        }
    }

    /// Parse YAML text into an unvalidated document.
    pub fn from_yaml_str(text: &str) -> Result<Value, ConfigError> {
        let events = read_events_str(text)?;
        Value::from_events(&events)
    }

    /// Append the events for this value, without comments.
    pub(crate) fn push_events(&self, events: &mut Vec<Event>) {
        match self {
            Value::Null => events.push(Event::null()),
            Value::Bool(flag) => events.push(Event::scalar(flag.to_string(), ScalarTag::Bool)),
            Value::Int(int) => events.push(Event::scalar(int.to_string(), ScalarTag::Int)),
            Value::Float(float) => {
                events.push(Event::scalar(float.to_string(), ScalarTag::Float))
            }
            Value::Str(text) => events.push(Event::str(text.clone())),
            Value::Sequence(items) => {
                events.push(Event::SequenceStart);
                for item in items {
                    item.push_events(events);
                }
                events.push(Event::SequenceEnd);
            }
            Value::Mapping(map) => {
                events.push(Event::MappingStart);
                for (key, value) in map.iter() {
                    events.push(Event::str(key.clone()));
                    value.push_events(events);
                }
                events.push(Event::MappingEnd);
            }
        }
    }
}

struct Builder<'a> {
    events: &'a [Event],
    pos: usize,
}

impl<'a> Builder<'a> {
    fn expect_start(&mut self) -> Result<(), ConfigError> {
        self.skip_comments();
        match self.events.get(self.pos) {
            Some(Event::StreamStart) => {
                self.pos += 1;
                self.skip_comments();
                Ok(())
            }
            _ => Err(malformed("expected stream start")),
        }
    }

    fn peek(&self) -> Option<&'a Event> {
        self.events.get(self.pos)
    }

    fn skip_comments(&mut self) {
        while let Some(Event::Comment(_)) = self.events.get(self.pos) {
            self.pos += 1;
        }
    }

    fn next(&mut self) -> Result<&'a Event, ConfigError> {
        self.skip_comments();
        let event = self
            .events
            .get(self.pos)
            .ok_or_else(|| malformed("stream ended inside a document"))?;
        self.pos += 1;
        Ok(event)
    }

    fn node(&mut self) -> Result<Value, ConfigError> {
        match self.next()? {
            Event::Scalar { value, tag } => scalar(value, *tag),
            Event::MappingStart => {
                let mut map = Mapping::new();
                loop {
                    match self.next()? {
                        Event::MappingEnd => return Ok(Value::Mapping(map)),
                        Event::Scalar { value: key, .. } => {
                            if map.contains_key(key) {
                                return Err(malformed(format!("duplicate mapping key '{key}'")));
                            }
                            let value = self.node()?;
                            map.insert(key.clone(), value);
                        }
                        other => {
                            return Err(malformed(format!(
                                "expected mapping key, found {}",
                                other.kind()
                            )));
                        }
                    }
                }
            }
            Event::SequenceStart => {
                let mut items = Vec::new();
                loop {
                    self.skip_comments();
                    if let Some(Event::SequenceEnd) = self.peek() {
                        self.pos += 1;
                        return Ok(Value::Sequence(items));
                    }
                    items.push(self.node()?);
                }
            }
            other => Err(malformed(format!(
                "expected a value, found {}",
                other.kind()
            ))),
        }
    }
}

fn scalar(value: &str, tag: ScalarTag) -> Result<Value, ConfigError> {
    let bad = || malformed(format!("'{value}' is not a valid {}", tag.as_str()));
    match tag {
        ScalarTag::Null => Ok(Value::Null),
        ScalarTag::Bool => match value {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(bad()),
        },
        ScalarTag::Int => value.parse().map(Value::Int).map_err(|_| bad()),
        ScalarTag::Float => value.parse().map(Value::Float).map_err(|_| bad()),
        ScalarTag::Str => Ok(Value::Str(value.to_string())),
    }
}

fn malformed(message: impl Into<String>) -> ConfigError {
    ConfigError::Parse {
        message: message.into(),
        line: None,
        column: None,
    }
}
