//! Dotted-path access to validated documents.

use crate::path::{index, join_path, segments};
use crate::{ConfigError, Element, ElementKind, Value};
use log::debug;

/// Resolve `dotted` against `document`, checking each step against the schema.
pub(super) fn find<'v>(
    root: &Element,
    document: &'v Value,
    dotted: &str,
) -> Result<&'v Value, ConfigError> {
    let mut element = Some(root);
    let mut value = document;
    let mut walked = String::new();
    for segment in segments(dotted) {
        walked = join_path(&walked, segment);
        element = step_element(element, segment, &walked)?;
        value = match value {
            Value::Mapping(map) => map
                .get(segment)
                .ok_or_else(|| ConfigError::unresolved(&walked, "no such key"))?,
            Value::Sequence(items) => {
                let idx = list_index(segment, &walked)?;
                let len = items.len();
                items.get(idx).ok_or_else(|| out_of_range(&walked, idx, len))?
            }
            other => return Err(not_a_container(&walked, other)),
        };
    }
    Ok(value)
}

pub(super) fn find_mut<'v>(
    root: &Element,
    document: &'v mut Value,
    dotted: &str,
) -> Result<&'v mut Value, ConfigError> {
    let mut element = Some(root);
    let mut value = document;
    let mut walked = String::new();
    for segment in segments(dotted) {
        walked = join_path(&walked, segment);
        element = step_element(element, segment, &walked)?;
        value = match value {
            Value::Mapping(map) => map
                .get_mut(segment)
                .ok_or_else(|| ConfigError::unresolved(&walked, "no such key"))?,
            Value::Sequence(items) => {
                let idx = list_index(segment, &walked)?;
                let len = items.len();
                items
                    .get_mut(idx)
                    .ok_or_else(|| out_of_range(&walked, idx, len))?
            }
            other => return Err(not_a_container(&walked, other)),
        };
    }
    Ok(value)
}

/// Store the default of the element at `dotted` into `document`.
///
/// Missing intermediate mappings and lists are created empty; existing
/// siblings are left alone. A list index equal to the list length appends.
/// The empty path replaces the whole document.
pub(super) fn set_default(
    root: &Element,
    document: &mut Value,
    dotted: &str,
) -> Result<(), ConfigError> {
    let parts = segments(dotted);
    let Some((last, parents)) = parts.split_last() else {
        *document = root.default()?;
        return Ok(());
    };

    let mut element = root;
    let mut value = document;
    let mut walked = String::new();
    for segment in parents {
        walked = join_path(&walked, segment);
        let child = schema_child(element, segment, &walked)?;
        ensure_container(element, value, &walked)?;
        value = match value {
            Value::Mapping(map) => map.get_or_insert_with(segment, || Value::Null),
            Value::Sequence(items) => slot(items, segment, &walked)?,
            other => return Err(not_a_container(&walked, other)),
        };
        element = child;
    }

    let target = join_path(&walked, last);
    let child = schema_child(element, last, &target)?;
    if child.is_derived() {
        return Err(ConfigError::unresolved(&target, "derived values have no default"));
    }
    let default = child.default_at(&target)?;
    ensure_container(element, value, &target)?;
    match value {
        Value::Mapping(map) => {
            map.insert(*last, default);
        }
        Value::Sequence(items) => *slot(items, last, &target)? = default,
        other => return Err(not_a_container(&target, other)),
    }
    debug!("materialised default (path={target})");
    Ok(())
}

/// Follow the schema one step. Undeclared keys that were let through leave the schema behind.
fn step_element<'e>(
    element: Option<&'e Element>,
    segment: &str,
    walked: &str,
) -> Result<Option<&'e Element>, ConfigError> {
    let Some(element) = element else {
        return Ok(None);
    };
    match (element.child(segment), element.kind()) {
        (Some(child), _) => Ok(Some(child)),
        (
            None,
            ElementKind::Keyed {
                allow_extra_keys: true,
                ..
            },
        ) => Ok(None),
        (None, kind) => Err(ConfigError::unresolved(
            walked,
            format!("not declared below this {}", kind.type_name()),
        )),
    }
}

fn schema_child<'e>(
    element: &'e Element,
    segment: &str,
    walked: &str,
) -> Result<&'e Element, ConfigError> {
    element.child(segment).ok_or_else(|| {
        ConfigError::unresolved(
            walked,
            format!("not declared below this {}", element.kind().type_name()),
        )
    })
}

/// Replace a null slot with the empty container its element describes.
fn ensure_container(element: &Element, value: &mut Value, walked: &str) -> Result<(), ConfigError> {
    if !value.is_null() {
        return Ok(());
    }
    *value = match element.kind() {
        ElementKind::Keyed { .. } | ElementKind::Category { .. } => {
            Value::Mapping(Default::default())
        }
        ElementKind::List { .. } => Value::Sequence(Vec::new()),
        kind => {
            return Err(ConfigError::unresolved(
                walked,
                format!("cannot descend into a {}", kind.type_name()),
            ));
        }
    };
    Ok(())
}

/// The list slot for `segment`, appending a null item when the index equals the length.
fn slot<'v>(
    items: &'v mut Vec<Value>,
    segment: &str,
    walked: &str,
) -> Result<&'v mut Value, ConfigError> {
    let idx = list_index(segment, walked)?;
    if idx == items.len() {
        items.push(Value::Null);
    }
    let len = items.len();
    items
        .get_mut(idx)
        .ok_or_else(|| out_of_range(walked, idx, len))
}

fn list_index(segment: &str, walked: &str) -> Result<usize, ConfigError> {
    index(segment)
        .ok_or_else(|| ConfigError::unresolved(walked, format!("'{segment}' is not a list index")))
}

fn out_of_range(walked: &str, idx: usize, len: usize) -> ConfigError {
    ConfigError::unresolved(
        walked,
        format!("index {idx} is out of range for a list of {len} items"),
    )
}

fn not_a_container(walked: &str, value: &Value) -> ConfigError {
    ConfigError::unresolved(walked, format!("cannot descend into a {}", value.type_name()))
}
