//! Scalar and code-block validation.

use super::{Element, ElementKind};
use crate::path::join_path;
use crate::{ConfigError, Value};

impl Element {
    pub(super) fn validate_scalar(&self, value: &Value, path: &str) -> Result<Value, ConfigError> {
        if value.is_null() {
            return self.absent(path);
        }
        let converted = match (&self.kind, value) {
            (ElementKind::Str, Value::Str(_)) => value.clone(),
            (ElementKind::Str, Value::Bool(_) | Value::Int(_) | Value::Float(_)) => {
                Value::Str(value.to_string())
            }
            (ElementKind::Int, Value::Int(_)) => value.clone(),
            (ElementKind::Int, Value::Str(text)) => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| {
                    ConfigError::validation(path, format!("expected int, found '{text}'"))
                })?,
            (ElementKind::Float, Value::Int(int)) => Value::Float(*int as f64),
            (ElementKind::Float, Value::Str(text)) => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| {
                    ConfigError::validation(path, format!("expected float, found '{text}'"))
                })?,
            (ElementKind::Float, Value::Float(_)) => value.clone(),
            (ElementKind::Bool, Value::Bool(_)) => value.clone(),
            (ElementKind::Path, Value::Str(text)) => {
                if text.is_empty() {
                    return Err(ConfigError::validation(path, "path must not be empty"));
                }
                value.clone()
            }
            (ElementKind::Regex { pattern, compiled }, Value::Str(text)) => {
                let regex = compiled
                    .as_ref()
                    .map_err(|err| ConfigError::schema(path, format!("invalid pattern: {err}")))?;
                if !regex.is_match(text) {
                    return Err(ConfigError::validation(
                        path,
                        format!("'{text}' does not match r'{pattern}'"),
                    ));
                }
                value.clone()
            }
            (kind, other) => {
                return Err(ConfigError::validation(
                    path,
                    format!("expected {}, found {}", kind.type_name(), other.type_name()),
                ));
            }
        };
        self.check_choices(&converted, path)?;
        self.check_range(&converted, path)?;
        Ok(converted)
    }

    pub(super) fn validate_code(&self, value: &Value, path: &str) -> Result<Value, ConfigError> {
        let lines = match value {
            Value::Null => return self.absent(path),
            Value::Sequence(items) => {
                let mut lines = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    match item {
                        Value::Null => {}
                        Value::Str(line) => lines.push(line.clone()),
                        Value::Bool(_) | Value::Int(_) | Value::Float(_) => {
                            lines.push(item.to_string())
                        }
                        other => {
                            return Err(ConfigError::validation(
                                &join_path(path, &idx.to_string()),
                                format!("expected a line of text, found {}", other.type_name()),
                            ));
                        }
                    }
                }
                lines
            }
            Value::Str(text) => vec![text.clone()],
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => vec![value.to_string()],
            other => {
                return Err(ConfigError::validation(
                    path,
                    format!("expected code block lines, found {}", other.type_name()),
                ));
            }
        };
        let mut block = lines.join("\n").trim().to_string();
        block.push('\n');
        Ok(Value::Str(block))
    }

    fn check_choices(&self, value: &Value, path: &str) -> Result<(), ConfigError> {
        if self.choices.is_empty() || self.choices.iter().any(|choice| same_scalar(choice, value)) {
            return Ok(());
        }
        let allowed: Vec<String> = self.choices.iter().map(Value::to_string).collect();
        Err(ConfigError::validation(
            path,
            format!("'{value}' is not one of: {}", allowed.join(", ")),
        ))
    }

    fn check_range(&self, value: &Value, path: &str) -> Result<(), ConfigError> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };
        if number.is_nan() && (self.min.is_some() || self.max.is_some()) {
            return Err(ConfigError::validation(path, "NaN is outside every range"));
        }
        if let Some(min) = self.min.filter(|min| number < *min) {
            return Err(ConfigError::validation(
                path,
                format!("{value} is below the minimum of {min}"),
            ));
        }
        if let Some(max) = self.max.filter(|max| number > *max) {
            return Err(ConfigError::validation(
                path,
                format!("{value} is above the maximum of {max}"),
            ));
        }
        Ok(())
    }
}

/// Equality with ints and floats compared numerically.
fn same_scalar(choice: &Value, value: &Value) -> bool {
    match (choice.as_f64(), value.as_f64()) {
        (Some(left), Some(right)) => left == right,
        _ => choice == value,
    }
}
