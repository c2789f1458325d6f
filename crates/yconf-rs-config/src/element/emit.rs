//! Event emission and documentation comments.

use super::{Element, ElementKind};
use crate::wrap::wrap;
use crate::{DumpOptions, Value};
use yconf_rs_events::Event;

impl Element {
    /// Append the events for `value` to `events`.
    ///
    /// `None` renders the template form: the declared default, or an empty
    /// value, with one placeholder item in lists. A value whose shape does not
    /// fit the element is written as-is.
    pub fn emit(&self, value: Option<&Value>, events: &mut Vec<Event>, options: &DumpOptions) {
        match &self.kind {
            ElementKind::Keyed { elements, .. } => {
                self.emit_keyed(elements, value, events, options)
            }
            ElementKind::Category { sub, .. } => self.emit_category(sub, value, events, options),
            ElementKind::List { sub, .. } => self.emit_list(sub, value, events, options),
            ElementKind::Code => self.emit_code(value, events),
            ElementKind::Derived { .. } => {}
            _ => match value {
                Some(value) => value.push_events(events),
                None => self
                    .default
                    .clone()
                    .unwrap_or_default()
                    .push_events(events),
            },
        }
    }

    /// Documentation comment: `NAME(required type): help`, then the choices line.
    ///
    /// Each part is word-wrapped to `options.comment_width`.
    pub fn comment(&self, options: &DumpOptions, show_name: bool) -> String {
        let name = match (&self.name, show_name) {
            (Some(name), true) => name.to_uppercase(),
            _ => String::new(),
        };
        let required = if self.required { "required " } else { "" };
        let mut header = format!("{name}({required}{})", self.kind.type_name());
        if let Some(help) = &self.help {
            header.push_str(": ");
            header.push_str(help);
        }
        let mut lines = wrap(&header, options.comment_width);
        if options.show_choices {
            if let Some(doc) = self.choices_doc() {
                lines.extend(wrap(&doc, options.comment_width));
            }
        }
        lines.join("\n")
    }

    fn choices_doc(&self) -> Option<String> {
        match &self.kind {
            ElementKind::Int | ElementKind::Float => match (self.min, self.max) {
                (Some(min), Some(max)) => Some(format!("Valid Range: {min} - {max}")),
                (Some(min), None) => Some(format!("Valid Range: >= {min}")),
                (None, Some(max)) => Some(format!("Valid Range: <= {max}")),
                (None, None) => self.choices_line(),
            },
            ElementKind::Regex { pattern, .. } => Some(format!("Values must match: r'{pattern}'")),
            ElementKind::List {
                min_length,
                max_length,
                ..
            } => Some(format!(
                "May contain {} - {} items.",
                min_length.unwrap_or(0),
                max_length.map_or_else(|| "inf".to_string(), |max| max.to_string())
            )),
            _ => self.choices_line(),
        }
    }

    fn choices_line(&self) -> Option<String> {
        if self.choices.is_empty() {
            return None;
        }
        let choices: Vec<String> = self.choices.iter().map(Value::to_string).collect();
        Some(format!("Choices: {}", choices.join(", ")))
    }

    fn emit_keyed(
        &self,
        elements: &[Element],
        value: Option<&Value>,
        events: &mut Vec<Event>,
        options: &DumpOptions,
    ) {
        let map = match value {
            None => self.default.as_ref().and_then(Value::as_mapping),
            Some(Value::Mapping(map)) => Some(map),
            Some(other) => return other.push_events(events),
        };
        events.push(Event::MappingStart);
        for child in elements {
            if child.is_derived() || child.hidden {
                continue;
            }
            let name = child.name().unwrap_or_default();
            let child_value = map.and_then(|map| map.get(name));
            if options.omit_defaults
                && child.default.is_some()
                && child_value.or(child.default.as_ref()) == child.default.as_ref()
            {
                continue;
            }
            if options.show_comments {
                events.push(Event::comment(child.comment(options, true)));
            }
            events.push(Event::str(name));
            child.emit(child_value, events, options);
        }
        if let Some(map) = map {
            for (key, value) in map.iter() {
                if elements.iter().any(|child| child.name() == Some(key.as_str())) {
                    continue;
                }
                events.push(Event::str(key.clone()));
                value.push_events(events);
            }
        }
        events.push(Event::MappingEnd);
    }

    fn emit_category(
        &self,
        sub: &Element,
        value: Option<&Value>,
        events: &mut Vec<Event>,
        options: &DumpOptions,
    ) {
        let map = match value {
            None => self.default.as_ref().and_then(Value::as_mapping),
            Some(Value::Mapping(map)) => Some(map),
            Some(other) => return other.push_events(events),
        };
        events.push(Event::MappingStart);
        if options.show_comments {
            events.push(Event::comment(sub.comment(options, false)));
        }
        for (key, value) in map.into_iter().flat_map(|map| map.iter()) {
            events.push(Event::str(key.clone()));
            sub.emit(Some(value), events, options);
        }
        events.push(Event::MappingEnd);
    }

    fn emit_list(
        &self,
        sub: &Element,
        value: Option<&Value>,
        events: &mut Vec<Event>,
        options: &DumpOptions,
    ) {
        let items = match value {
            None => self.default.as_ref().and_then(Value::as_sequence),
            Some(Value::Sequence(items)) => Some(items),
            Some(other) => return other.push_events(events),
        };
        events.push(Event::SequenceStart);
        if options.show_comments {
            events.push(Event::comment(sub.comment(options, false)));
        }
        match items {
            Some(items) => {
                for item in items {
                    sub.emit(Some(item), events, options);
                }
            }
            None => sub.emit(None, events, options),
        }
        events.push(Event::SequenceEnd);
    }

    fn emit_code(&self, value: Option<&Value>, events: &mut Vec<Event>) {
        match value.or(self.default.as_ref()) {
            Some(Value::Str(block)) => {
                events.push(Event::SequenceStart);
                for line in block.lines() {
                    events.push(Event::str(line));
                }
                events.push(Event::SequenceEnd);
            }
            Some(other) => other.push_events(events),
            None => {
                events.push(Event::SequenceStart);
                events.push(Event::SequenceEnd);
            }
        }
    }
}
