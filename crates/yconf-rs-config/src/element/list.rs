//! List validation.

use super::{Element, ElementKind, ValidateMode};
use crate::path::join_path;
use crate::{ConfigError, Value};

impl Element {
    pub(super) fn validate_list(
        &self,
        sub: &Element,
        min_length: Option<usize>,
        max_length: Option<usize>,
        value: &Value,
        path: &str,
        mode: ValidateMode,
    ) -> Result<Value, ConfigError> {
        let items = match value {
            Value::Null => match &self.default {
                Some(Value::Sequence(items)) => items.clone(),
                _ if self.required => {
                    return Err(ConfigError::MissingKey {
                        path: path.to_string(),
                    });
                }
                _ => Vec::new(),
            },
            Value::Sequence(items) => items.clone(),
            // A lone value stands for a one-item list, unless that would be ambiguous.
            other if !matches!(sub.kind, ElementKind::List { .. }) => vec![other.clone()],
            other => {
                return Err(ConfigError::validation(
                    path,
                    format!("expected a sequence, found {}", other.type_name()),
                ));
            }
        };

        if let Some(min) = min_length.filter(|min| items.len() < *min) {
            return Err(ConfigError::validation(
                path,
                format!("expected at least {min} items, found {}", items.len()),
            ));
        }
        if let Some(max) = max_length.filter(|max| items.len() > *max) {
            return Err(ConfigError::validation(
                path,
                format!("expected at most {max} items, found {}", items.len()),
            ));
        }

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            out.push(sub.validate_at(item, &join_path(path, &idx.to_string()), mode)?);
        }
        if self.required && mode == ValidateMode::Full && out.is_empty() {
            return Err(ConfigError::validation(path, "required list is empty"));
        }

        for idx in 0..out.len() {
            let siblings = Value::Sequence(out.clone());
            let current = std::mem::take(&mut out[idx]);
            out[idx] = sub.run_post_validator(&siblings, current, &join_path(path, &idx.to_string()))?;
        }
        Ok(Value::Sequence(out))
    }
}
