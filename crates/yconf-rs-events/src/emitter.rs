//! Block-style emitter for event sequences.

use crate::{Event, EventError, ScalarTag, render_scalar};
use log::debug;
use std::io::Write;

const INDENT: usize = 2;

/// Longest key a YAML reader accepts in implicit `key: value` form.
const MAX_IMPLICIT_KEY: usize = 1024;

/// Emit `events` as block-style text into `writer`.
///
/// The events must form one stream: `StreamStart`, at most one node, then
/// `StreamEnd`. The text is assembled in full before anything is written,
/// so a malformed sequence leaves the writer untouched.
pub fn emit<W: Write>(events: &[Event], mut writer: W) -> Result<(), EventError> {
    let text = emit_to_string(events)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Emit `events` as block-style text.
pub fn emit_to_string(events: &[Event]) -> Result<String, EventError> {
    let mut emitter = Emitter {
        events,
        pos: 0,
        out: String::new(),
    };
    emitter.stream()?;
    debug!(
        "emitted event stream (events={}, bytes={})",
        events.len(),
        emitter.out.len()
    );
    Ok(emitter.out)
}

struct Emitter<'a> {
    events: &'a [Event],
    pos: usize,
    out: String,
}

impl<'a> Emitter<'a> {
    fn stream(&mut self) -> Result<(), EventError> {
        self.expect(&Event::StreamStart)?;
        self.comments(0);
        match self.peek()? {
            Event::StreamEnd => {}
            Event::Scalar { value, tag } => {
                let rendered = render_scalar(value, *tag)?;
                self.pos += 1;
                if rendered.is_empty() {
                    self.out.push_str("null\n");
                } else {
                    self.line(0, &rendered);
                }
            }
            Event::MappingStart => {
                if self.is_empty_compound() {
                    self.empty_compound(0, "{}");
                } else {
                    self.pos += 1;
                    self.mapping_entries(0)?;
                }
            }
            Event::SequenceStart => {
                if self.is_empty_compound() {
                    self.empty_compound(0, "[]");
                } else {
                    self.pos += 1;
                    self.sequence_items(0)?;
                }
            }
            other => return Err(unexpected(other, "a document node")),
        }
        self.comments(0);
        self.expect(&Event::StreamEnd)?;
        if self.pos != self.events.len() {
            return Err(EventError::Unbalanced(
                "events follow the end of the stream".to_string(),
            ));
        }
        Ok(())
    }

    /// Entries of a mapping whose start event is already consumed.
    fn mapping_entries(&mut self, indent: usize) -> Result<(), EventError> {
        loop {
            match self.next()? {
                Event::Comment(text) => self.comment(indent, text),
                Event::MappingEnd => return Ok(()),
                Event::Scalar { value, tag } => {
                    let key = match tag {
                        ScalarTag::Null => "null".to_string(),
                        tag => render_scalar(value, *tag)?,
                    };
                    self.out.push_str(&" ".repeat(indent));
                    if key.len() < MAX_IMPLICIT_KEY {
                        self.out.push_str(&key);
                    } else {
                        self.out.push_str("? ");
                        self.out.push_str(&key);
                        self.out.push('\n');
                        self.out.push_str(&" ".repeat(indent));
                    }
                    self.out.push(':');
                    self.node_after_prefix(indent)?;
                }
                other => return Err(unexpected(other, "a mapping key")),
            }
        }
    }

    /// Items of a sequence whose start event is already consumed.
    fn sequence_items(&mut self, indent: usize) -> Result<(), EventError> {
        loop {
            match self.peek()? {
                Event::Comment(text) => {
                    self.comment(indent, text);
                    self.pos += 1;
                }
                Event::SequenceEnd => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => {
                    self.out.push_str(&" ".repeat(indent));
                    self.out.push('-');
                    self.node_after_prefix(indent)?;
                }
            }
        }
    }

    /// A node following a written `key:` or `-` prefix on the current line.
    fn node_after_prefix(&mut self, indent: usize) -> Result<(), EventError> {
        let child = indent + INDENT;
        let mut pending = Vec::new();
        while let Event::Comment(text) = self.peek()? {
            pending.push(text);
            self.pos += 1;
        }
        match self.peek()? {
            Event::Scalar { value, tag } => {
                let rendered = render_scalar(value, *tag)?;
                self.pos += 1;
                if !rendered.is_empty() {
                    self.out.push(' ');
                    self.out.push_str(&rendered);
                }
                self.out.push('\n');
                self.flush_pending(child, pending);
            }
            Event::MappingStart => {
                if self.is_empty_compound() {
                    self.out.push(' ');
                    self.flush_pending_after(child, pending, "{}");
                } else {
                    self.pos += 1;
                    self.out.push('\n');
                    self.flush_pending(child, pending);
                    self.mapping_entries(child)?;
                }
            }
            Event::SequenceStart => {
                if self.is_empty_compound() {
                    self.out.push(' ');
                    self.flush_pending_after(child, pending, "[]");
                } else {
                    self.pos += 1;
                    self.out.push('\n');
                    self.flush_pending(child, pending);
                    self.sequence_items(child)?;
                }
            }
            other => return Err(unexpected(other, "a value node")),
        }
        Ok(())
    }

    fn flush_pending(&mut self, indent: usize, pending: Vec<&String>) {
        for text in pending {
            self.comment(indent, text);
        }
    }

    fn flush_pending_after(&mut self, indent: usize, pending: Vec<&String>, marker: &str) {
        self.empty_compound_inline(indent, marker);
        self.flush_pending(indent, pending);
    }

    /// Whether the compound starting at the cursor closes with nothing but comments inside.
    fn is_empty_compound(&self) -> bool {
        let mut idx = self.pos + 1;
        while let Some(Event::Comment(_)) = self.events.get(idx) {
            idx += 1;
        }
        matches!(
            self.events.get(idx),
            Some(Event::MappingEnd) | Some(Event::SequenceEnd)
        )
    }

    /// Write `{}` / `[]` for an empty compound at the start of a line.
    fn empty_compound(&mut self, indent: usize, marker: &str) {
        self.line(indent, marker);
        self.inner_comments(indent + INDENT);
    }

    /// Write `{}` / `[]` after an already written prefix.
    fn empty_compound_inline(&mut self, indent: usize, marker: &str) {
        self.out.push_str(marker);
        self.out.push('\n');
        self.inner_comments(indent);
    }

    /// Consume the start event, any comments, and the end event of an empty compound.
    fn inner_comments(&mut self, indent: usize) {
        self.pos += 1;
        while let Some(Event::Comment(text)) = self.events.get(self.pos) {
            self.comment(indent, text);
            self.pos += 1;
        }
        self.pos += 1;
    }

    fn comments(&mut self, indent: usize) {
        while let Some(Event::Comment(text)) = self.events.get(self.pos) {
            self.comment(indent, text);
            self.pos += 1;
        }
    }

    fn comment(&mut self, indent: usize, text: &str) {
        for line in text.lines() {
            self.out.push_str(&" ".repeat(indent));
            if line.is_empty() {
                self.out.push_str("#\n");
            } else {
                self.out.push_str("# ");
                self.out.push_str(line);
                self.out.push('\n');
            }
        }
    }

    fn line(&mut self, indent: usize, text: &str) {
        self.out.push_str(&" ".repeat(indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn peek(&self) -> Result<&'a Event, EventError> {
        self.events
            .get(self.pos)
            .ok_or_else(|| EventError::Unbalanced("stream ended early".to_string()))
    }

    fn next(&mut self) -> Result<&'a Event, EventError> {
        let event = self.peek()?;
        self.pos += 1;
        Ok(event)
    }

    fn expect(&mut self, expected: &Event) -> Result<(), EventError> {
        let event = self.next()?;
        if event == expected {
            Ok(())
        } else {
            Err(unexpected(event, expected.kind()))
        }
    }
}

fn unexpected(event: &Event, wanted: &str) -> EventError {
    EventError::Unbalanced(format!("expected {wanted}, found {}", event.kind()))
}
