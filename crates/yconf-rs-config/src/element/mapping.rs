//! Keyed and category validation.

use super::{Element, ElementKind, KeyCase, Resolver, ValidateMode};
use crate::path::join_path;
use crate::{ConfigError, Mapping, Value};
use log::{debug, warn};

impl Element {
    pub(super) fn validate_keyed(
        &self,
        elements: &[Element],
        allow_extra_keys: bool,
        value: &Value,
        path: &str,
        mode: ValidateMode,
    ) -> Result<Value, ConfigError> {
        let input = match value {
            Value::Null => match self.absent(path)? {
                Value::Mapping(map) => map,
                _ => Mapping::new(),
            },
            Value::Mapping(map) => self.normalize_keys(map, path)?,
            other => {
                return Err(ConfigError::validation(
                    path,
                    format!("expected a mapping, found {}", other.type_name()),
                ));
            }
        };

        let mut extras = Vec::new();
        for (key, value) in input.iter() {
            if elements.iter().any(|child| child.name() == Some(key.as_str())) {
                continue;
            }
            if !allow_extra_keys {
                return Err(ConfigError::UnknownKey {
                    path: join_path(path, key),
                });
            }
            warn!(
                "passing through undeclared key unvalidated (path={})",
                join_path(path, key)
            );
            extras.push((key.clone(), value.clone()));
        }

        let mut out = Mapping::new();
        for child in elements {
            let name = child.name().unwrap_or_default();
            let validated = if child.is_derived() {
                Value::Null
            } else {
                let raw = input.get(name).unwrap_or(&Value::Null);
                child.validate_at(raw, &join_path(path, name), mode)?
            };
            out.insert(name, validated);
        }
        self.resolve_derived(elements, &mut out, path)?;
        for (key, value) in extras {
            out.insert(key, value);
        }

        for child in elements {
            let name = child.name().unwrap_or_default();
            let current = out.get(name).cloned().unwrap_or_default();
            let siblings = Value::Mapping(out.clone());
            let checked = child.run_post_validator(&siblings, current, &join_path(path, name))?;
            out.insert(name, checked);
        }
        debug!("validated keyed element (path={path}, keys={})", out.len());
        Ok(Value::Mapping(out))
    }

    /// Resolve derived children in declared order against the validated entries.
    pub(super) fn resolve_derived(
        &self,
        elements: &[Element],
        out: &mut Mapping,
        path: &str,
    ) -> Result<(), ConfigError> {
        for child in elements {
            let ElementKind::Derived {
                resolver: Resolver(resolver),
            } = &child.kind
            else {
                continue;
            };
            let name = child.name().unwrap_or_default();
            let value = resolver(out).map_err(|message| {
                ConfigError::validation(&join_path(path, name), format!("cannot derive value: {message}"))
            })?;
            out.insert(name, value);
        }
        Ok(())
    }

    pub(super) fn validate_category(
        &self,
        sub: &Element,
        min_entries: usize,
        default_key: Option<&str>,
        value: &Value,
        path: &str,
        mode: ValidateMode,
    ) -> Result<Value, ConfigError> {
        let mut input = match value {
            Value::Null => {
                if self.required && self.default.is_none() {
                    return Err(ConfigError::MissingKey {
                        path: path.to_string(),
                    });
                }
                Mapping::new()
            }
            Value::Mapping(map) => self.normalize_keys(map, path)?,
            other => {
                return Err(ConfigError::validation(
                    path,
                    format!("expected a mapping, found {}", other.type_name()),
                ));
            }
        };

        let shared = match default_key.and_then(|key| input.remove(key)) {
            Some(Value::Mapping(shared)) => {
                let shared_path = join_path(path, default_key.unwrap_or_default());
                sub.validate_at(&Value::Mapping(shared.clone()), &shared_path, ValidateMode::Partial)?;
                Some(shared)
            }
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(ConfigError::validation(
                    &join_path(path, default_key.unwrap_or_default()),
                    format!("expected a mapping of defaults, found {}", other.type_name()),
                ));
            }
        };

        let mut out = Mapping::new();
        if mode == ValidateMode::Full {
            if let Some(Value::Mapping(defaults)) = &self.default {
                for (key, value) in defaults.iter() {
                    out.insert(key.clone(), value.clone());
                }
            }
        }

        for (key, raw) in input {
            let entry_path = join_path(path, &key);
            if !self.choices.is_empty() && !self.choices.contains(&Value::Str(key.clone())) {
                let allowed: Vec<String> = self.choices.iter().map(Value::to_string).collect();
                return Err(ConfigError::validation(
                    &entry_path,
                    format!("key '{key}' is not one of: {}", allowed.join(", ")),
                ));
            }
            let raw = match (&shared, raw) {
                (Some(shared), Value::Mapping(entry)) => {
                    let mut merged = shared.clone();
                    for (field, value) in entry {
                        merged.insert(field, value);
                    }
                    Value::Mapping(merged)
                }
                (Some(shared), Value::Null) => Value::Mapping(shared.clone()),
                (_, raw) => raw,
            };
            let validated = sub.validate_at(&raw, &entry_path, mode)?;
            let validated = match out.get(&key) {
                Some(existing) => sub.merge(existing, &validated),
                None => validated,
            };
            out.insert(key, validated);
        }

        if out.len() < min_entries {
            return Err(ConfigError::validation(
                path,
                format!("expected at least {min_entries} entries, found {}", out.len()),
            ));
        }

        let keys: Vec<String> = out.keys().map(str::to_string).collect();
        for key in keys {
            let current = out.get(&key).cloned().unwrap_or_default();
            let siblings = Value::Mapping(out.clone());
            let checked = sub.run_post_validator(&siblings, current, &join_path(path, &key))?;
            out.insert(key, checked);
        }
        debug!("validated category element (path={path}, entries={})", out.len());
        Ok(Value::Mapping(out))
    }

    /// Apply the element's key case, rejecting keys that collide afterwards.
    fn normalize_keys(&self, map: &Mapping, path: &str) -> Result<Mapping, ConfigError> {
        if self.key_case == KeyCase::Mixed {
            return Ok(map.clone());
        }
        let mut out = Mapping::new();
        for (key, value) in map.iter() {
            let normalized = match self.key_case {
                KeyCase::Lower => key.to_lowercase(),
                _ => key.to_uppercase(),
            };
            if out.contains_key(&normalized) {
                return Err(ConfigError::validation(
                    &join_path(path, &normalized),
                    format!("key '{key}' duplicates another key after case normalisation"),
                ));
            }
            out.insert(normalized, value.clone());
        }
        Ok(out)
    }
}
