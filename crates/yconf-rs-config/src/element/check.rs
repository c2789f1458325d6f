//! Schema consistency checks.

use super::{Element, ElementKind, KeyCase, ValidateMode};
use crate::ConfigError;
use crate::path::join_path;
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("^[a-z][a-z0-9_]*$").ok());

impl Element {
    /// Check that the element tree is consistent.
    ///
    /// Every config root runs this when it is constructed, so schema mistakes
    /// surface before any document is read.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.check_at("", false)?;
        debug!("schema check passed (root type={})", self.kind.type_name());
        Ok(())
    }

    fn check_at(&self, path: &str, in_keyed: bool) -> Result<(), ConfigError> {
        if let Some(name) = self.name.as_deref().filter(|name| !valid_name(name)) {
            return Err(ConfigError::schema(
                path,
                format!(
                    "invalid name '{name}': names start with a lowercase letter and contain only lowercase letters, digits and underscores"
                ),
            ));
        }
        if self.hidden && self.required && self.default.is_none() {
            return Err(ConfigError::schema(
                path,
                "hidden required elements need a default",
            ));
        }
        if (self.min.is_some() || self.max.is_some())
            && !matches!(self.kind, ElementKind::Int | ElementKind::Float)
        {
            return Err(ConfigError::schema(
                path,
                "ranges apply only to int and float elements",
            ));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::schema(
                    path,
                    format!("minimum {min} exceeds maximum {max}"),
                ));
            }
        }

        match &self.kind {
            ElementKind::Regex {
                compiled: Err(err), ..
            } => {
                return Err(ConfigError::schema(path, format!("invalid pattern: {err}")));
            }
            ElementKind::Derived { .. } if !in_keyed => {
                return Err(ConfigError::schema(
                    path,
                    "derived elements are only valid directly inside a keyed element",
                ));
            }
            ElementKind::Keyed { elements, .. } => {
                if self.key_case == KeyCase::Upper {
                    return Err(ConfigError::schema(
                        path,
                        "keyed element names are lowercase, so upper key case never matches",
                    ));
                }
                let mut seen = HashSet::new();
                for child in elements {
                    let Some(name) = child.name() else {
                        return Err(ConfigError::schema(
                            path,
                            "children of a keyed element must be named",
                        ));
                    };
                    let child_path = join_path(path, name);
                    if !seen.insert(name) {
                        return Err(ConfigError::schema(
                            &child_path,
                            format!("duplicate element name '{name}'"),
                        ));
                    }
                    child.check_at(&child_path, true)?;
                }
            }
            ElementKind::Category {
                sub, default_key, ..
            } => {
                if default_key.is_some() && !matches!(sub.kind, ElementKind::Keyed { .. }) {
                    return Err(ConfigError::schema(
                        path,
                        "a default key needs a keyed sub-element",
                    ));
                }
                sub.check_at(&join_path(path, "*"), false)?;
            }
            ElementKind::List {
                sub,
                min_length,
                max_length,
            } => {
                if let (Some(min), Some(max)) = (min_length, max_length) {
                    if min > max {
                        return Err(ConfigError::schema(
                            path,
                            format!("min_length {min} exceeds max_length {max}"),
                        ));
                    }
                }
                sub.check_at(&join_path(path, "*"), false)?;
            }
            _ => {}
        }

        if !self.choices.is_empty()
            && matches!(
                self.kind,
                ElementKind::Keyed { .. }
                    | ElementKind::List { .. }
                    | ElementKind::Code
                    | ElementKind::Derived { .. }
            )
        {
            return Err(ConfigError::schema(
                path,
                format!("choices do not apply to {} elements", self.kind.type_name()),
            ));
        }

        if let Some(default) = &self.default {
            if self.is_derived() {
                return Err(ConfigError::schema(path, "derived elements have no default"));
            }
            self.validate_at(default, path, ValidateMode::Partial)
                .map_err(|err| ConfigError::schema(path, format!("default is invalid: {err}")))?;
        }
        Ok(())
    }
}

fn valid_name(name: &str) -> bool {
    NAME.as_ref().is_some_and(|regex| regex.is_match(name))
}
