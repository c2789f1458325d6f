//! Reads structured text into a flat event sequence.

use crate::{Event, EventError, ScalarTag};
use log::debug;
use serde_yaml::Value;
use std::io::Read;

/// Read a single document from `reader` into events.
///
/// The stream is read to the end and dropped before returning. Mapping
/// entries keep the order they were written in.
pub fn read_events<R: Read>(mut reader: R) -> Result<Vec<Event>, EventError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    read_events_str(&contents)
}

/// Read a single document from a string into events.
pub fn read_events_str(contents: &str) -> Result<Vec<Event>, EventError> {
    let mut events = vec![Event::StreamStart];
    if !contents.trim().is_empty() {
        let value: Value = serde_yaml::from_str(contents)?;
        push_node(&value, &mut events)?;
    }
    events.push(Event::StreamEnd);
    debug!(
        "read event stream (bytes={}, events={})",
        contents.len(),
        events.len()
    );
    Ok(events)
}

fn push_node(value: &Value, events: &mut Vec<Event>) -> Result<(), EventError> {
    match value {
        Value::Mapping(map) => {
            events.push(Event::MappingStart);
            for (key, value) in map {
                events.push(Event::str(key_text(key)?));
                push_node(value, events)?;
            }
            events.push(Event::MappingEnd);
        }
        Value::Sequence(items) => {
            events.push(Event::SequenceStart);
            for item in items {
                push_node(item, events)?;
            }
            events.push(Event::SequenceEnd);
        }
        Value::Tagged(tagged) => push_node(&tagged.value, events)?,
        scalar => events.push(scalar_event(scalar)?),
    }
    Ok(())
}

fn scalar_event(value: &Value) -> Result<Event, EventError> {
    let event = match value {
        Value::Null => Event::null(),
        Value::Bool(flag) => Event::scalar(flag.to_string(), ScalarTag::Bool),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Event::scalar(int.to_string(), ScalarTag::Int)
            } else if number.is_u64() {
                return Err(EventError::parse(format!(
                    "integer {number} is out of range"
                )));
            } else {
                let float = number.as_f64().unwrap_or(f64::NAN);
                Event::scalar(float.to_string(), ScalarTag::Float)
            }
        }
        Value::String(text) => Event::str(text.clone()),
        other => {
            return Err(EventError::parse(format!(
                "unexpected node in scalar position: {other:?}"
            )));
        }
    };
    Ok(event)
}

/// Mapping keys must be scalars; non-string scalars are keyed by their text.
fn key_text(key: &Value) -> Result<String, EventError> {
    match key {
        Value::String(text) => Ok(text.clone()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => key_text(&tagged.value),
        _ => Err(EventError::parse("mapping keys must be scalars")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_an_empty_stream() {
        let events = read_events_str("  \n").expect("events");
        assert_eq!(events, vec![Event::StreamStart, Event::StreamEnd]);
    }

    #[test]
    fn mapping_order_is_preserved() {
        let events = read_events_str("zeta: 1\nalpha: [true, x]\n").expect("events");
        assert_eq!(
            events,
            vec![
                Event::StreamStart,
                Event::MappingStart,
                Event::str("zeta"),
                Event::scalar("1", ScalarTag::Int),
                Event::str("alpha"),
                Event::SequenceStart,
                Event::scalar("true", ScalarTag::Bool),
                Event::str("x"),
                Event::SequenceEnd,
                Event::MappingEnd,
                Event::StreamEnd,
            ]
        );
    }

    #[test]
    fn numeric_keys_become_text() {
        let events = read_events_str("1: one\n").expect("events");
        assert_eq!(events[2], Event::str("1"));
    }

    #[test]
    fn malformed_text_reports_location() {
        let err = read_events_str("a: [1, 2\nb: 3\n").unwrap_err();
        match err {
            EventError::Parse { line, .. } => assert!(line.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reader_consumes_io_streams() {
        let events = read_events("k: ~\n".as_bytes()).expect("events");
        assert_eq!(events[3], Event::null());
    }
}
