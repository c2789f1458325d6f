//! Textual rendering of scalar events.

use crate::{EventError, ScalarTag};

/// Render one scalar so that reading it back yields the same value and tag.
///
/// Strings are written plain when the plain form re-reads as the identical
/// string and double-quoted (JSON escaping) otherwise. Null renders as an
/// empty string; callers decide whether the position needs an explicit `null`.
pub fn render_scalar(value: &str, tag: ScalarTag) -> Result<String, EventError> {
    match tag {
        ScalarTag::Null => Ok(String::new()),
        ScalarTag::Bool => match value {
            "true" | "false" => Ok(value.to_string()),
            _ => Err(invalid(value, tag)),
        },
        ScalarTag::Int => value
            .parse::<i64>()
            .map(|number| number.to_string())
            .map_err(|_| invalid(value, tag)),
        ScalarTag::Float => value
            .parse::<f64>()
            .map(render_float)
            .map_err(|_| invalid(value, tag)),
        ScalarTag::Str => {
            if is_plain_safe(value) {
                Ok(value.to_string())
            } else {
                quote(value)
            }
        }
    }
}

fn render_float(number: f64) -> String {
    if number.is_nan() {
        return ".nan".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let text = number.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

/// A string is safe to write plain when the parser reads it back unchanged.
fn is_plain_safe(value: &str) -> bool {
    if value.is_empty()
        || value.trim() != value
        || value.contains(['\n', '\r', '\t'])
        || value.chars().any(needs_escape)
    {
        return false;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(value),
        Ok(serde_yaml::Value::String(parsed)) if parsed == value
    )
}

/// Double-quote `value`. JSON escaping covers the C0 controls; the rest of
/// what YAML treats as line breaks or non-printable is escaped as `\uXXXX`.
fn quote(value: &str) -> Result<String, EventError> {
    let json = serde_json::to_string(value)?;
    if !json.chars().any(needs_escape) {
        return Ok(json);
    }
    let mut quoted = String::with_capacity(json.len() + 8);
    for ch in json.chars() {
        if needs_escape(ch) {
            quoted.push_str(&format!("\\u{:04X}", u32::from(ch)));
        } else {
            quoted.push(ch);
        }
    }
    Ok(quoted)
}

/// Characters a YAML reader folds as line breaks or refuses outright.
fn needs_escape(ch: char) -> bool {
    matches!(
        ch,
        '\u{7F}'..='\u{9F}' | '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn invalid(value: &str, tag: ScalarTag) -> EventError {
    EventError::InvalidScalar {
        value: value.to_string(),
        tag: tag.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render_str(value: &str) -> String {
        render_scalar(value, ScalarTag::Str).expect("render")
    }

    #[test]
    fn plain_strings_stay_plain() {
        assert_eq!(render_str("squirrel"), "squirrel");
        assert_eq!(render_str("hello world"), "hello world");
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        assert_eq!(render_str("true"), "\"true\"");
        assert_eq!(render_str("5"), "\"5\"");
        assert_eq!(render_str(""), "\"\"");
        assert_eq!(render_str("a: b"), "\"a: b\"");
        assert_eq!(render_str("x # y"), "\"x # y\"");
        assert_eq!(render_str(" padded"), "\" padded\"");
    }

    #[test]
    fn multi_line_strings_are_escaped() {
        assert_eq!(render_str("one\ntwo"), "\"one\\ntwo\"");
    }

    #[test]
    fn unicode_line_breaks_are_escaped() {
        assert_eq!(render_str("a\u{85}b"), "\"a\\u0085b\"");
        assert_eq!(render_str("a\u{2028}b"), "\"a\\u2028b\"");
        assert_eq!(render_str("a\u{2029}b\n"), "\"a\\u2029b\\n\"");
        assert_eq!(render_str("bell\u{7F}"), "\"bell\\u007F\"");
        assert_eq!(render_str("café"), "café");
    }

    #[test]
    fn floats_keep_a_fraction() {
        assert_eq!(render_scalar("1", ScalarTag::Float).expect("float"), "1.0");
        assert_eq!(render_scalar("0.25", ScalarTag::Float).expect("float"), "0.25");
        assert_eq!(render_scalar("inf", ScalarTag::Float).expect("float"), ".inf");
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        let err = render_scalar("maybe", ScalarTag::Bool).unwrap_err();
        assert!(matches!(err, EventError::InvalidScalar { tag: "bool", .. }));
    }
}
