//! Tests for block emission and read-back of event streams.

use pretty_assertions::assert_eq;
use yconf_rs_events::{Event, EventError, ScalarTag, emit, emit_to_string, read_events_str};

fn int(value: i64) -> Event {
    Event::scalar(value.to_string(), ScalarTag::Int)
}

/// Strip comments so emitted output can be compared with what the reader sees.
fn without_comments(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| !matches!(event, Event::Comment(_)))
        .cloned()
        .collect()
}

fn nested_stream() -> Vec<Event> {
    vec![
        Event::StreamStart,
        Event::MappingStart,
        Event::comment("PET(required str): The kind of pet."),
        Event::str("pet"),
        Event::str("squirrel"),
        Event::str("names"),
        Event::SequenceStart,
        Event::comment("(str): Such as Fido."),
        Event::str("Fido"),
        Event::str("true"),
        Event::SequenceEnd,
        Event::str("cars"),
        Event::SequenceStart,
        Event::MappingStart,
        Event::str("color"),
        Event::str("red"),
        Event::str("wheels"),
        int(4),
        Event::MappingEnd,
        Event::SequenceEnd,
        Event::str("empty"),
        Event::MappingStart,
        Event::comment("nothing here"),
        Event::MappingEnd,
        Event::str("nothing"),
        Event::null(),
        Event::MappingEnd,
        Event::StreamEnd,
    ]
}

/// Emitted text renders comments in front of the entries they document.
#[test]
fn emits_block_text_with_comments() {
    let text = emit_to_string(&nested_stream()).expect("emit");
    let expected = "\
# PET(required str): The kind of pet.
pet: squirrel
names:
  # (str): Such as Fido.
  - Fido
  - \"true\"
cars:
  -
    color: red
    wheels: 4
empty: {}
  # nothing here
nothing:
";
    assert_eq!(text, expected);
}

/// Reading emitted text reproduces the non-comment events.
#[test]
fn emitted_text_reads_back() {
    let events = nested_stream();
    let text = emit_to_string(&events).expect("emit");
    let reread = read_events_str(&text).expect("read");
    assert_eq!(reread, without_comments(&events));
}

/// Nested sequences and floats survive a round trip.
#[test]
fn nested_sequences_round_trip() {
    let events = vec![
        Event::StreamStart,
        Event::SequenceStart,
        Event::SequenceStart,
        Event::scalar("1.5", ScalarTag::Float),
        Event::scalar("2", ScalarTag::Float),
        Event::SequenceEnd,
        Event::SequenceStart,
        Event::SequenceEnd,
        Event::SequenceEnd,
        Event::StreamEnd,
    ];
    let text = emit_to_string(&events).expect("emit");
    assert_eq!(text, "-\n  - 1.5\n  - 2.0\n- []\n");
    let reread = read_events_str(&text).expect("read");
    assert_eq!(reread, events);
}

/// Multi-line strings are escaped onto one line.
#[test]
fn multi_line_strings_round_trip() {
    let events = vec![
        Event::StreamStart,
        Event::MappingStart,
        Event::str("code"),
        Event::str("line one\nline two\n"),
        Event::MappingEnd,
        Event::StreamEnd,
    ];
    let text = emit_to_string(&events).expect("emit");
    assert_eq!(read_events_str(&text).expect("read"), events);
}

/// A scalar document renders on its own line; null renders explicitly.
#[test]
fn top_level_scalars() {
    let text = emit_to_string(&[Event::StreamStart, int(7), Event::StreamEnd]).expect("emit");
    assert_eq!(text, "7\n");
    let text = emit_to_string(&[Event::StreamStart, Event::null(), Event::StreamEnd])
        .expect("emit");
    assert_eq!(text, "null\n");
}

/// Unbalanced streams are rejected without writing anything.
#[test]
fn rejects_unbalanced_streams() {
    let mut out = Vec::new();
    let err = emit(
        &[Event::StreamStart, Event::MappingStart, Event::StreamEnd],
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, EventError::Unbalanced(_)));
    assert!(out.is_empty());

    let err = emit_to_string(&[Event::StreamStart, Event::SequenceEnd]).unwrap_err();
    assert!(matches!(err, EventError::Unbalanced(_)));
}

/// Mapping keys must be scalars.
#[test]
fn rejects_compound_keys() {
    let err = emit_to_string(&[
        Event::StreamStart,
        Event::MappingStart,
        Event::SequenceStart,
        Event::SequenceEnd,
        Event::MappingEnd,
        Event::StreamEnd,
    ])
    .unwrap_err();
    assert!(matches!(err, EventError::Unbalanced(_)));
}

/// Keys too long for the implicit form are written as explicit entries and read back.
#[test]
fn long_keys_use_explicit_entries() {
    let key = "k".repeat(1100);
    let events = vec![
        Event::StreamStart,
        Event::MappingStart,
        Event::str(key.clone()),
        int(1),
        Event::str("short"),
        Event::MappingStart,
        Event::str(key.clone()),
        Event::SequenceStart,
        int(2),
        Event::SequenceEnd,
        Event::MappingEnd,
        Event::MappingEnd,
        Event::StreamEnd,
    ];
    let text = emit_to_string(&events).expect("emit");
    assert_eq!(text, format!("? {key}\n: 1\nshort:\n  ? {key}\n  :\n    - 2\n"));
    assert_eq!(read_events_str(&text).expect("read"), events);
}
