//! Layered merge of validated documents.

use super::{Element, ElementKind};
use crate::{Mapping, Value};

impl Element {
    /// Merge `overlay` onto `base` following the element's shape.
    ///
    /// A null overlay keeps the base. Mappings merge per key, recursing into
    /// declared children. A non-empty overlay list replaces the base list.
    /// Any other overlay value replaces the base.
    pub fn merge(&self, base: &Value, overlay: &Value) -> Value {
        if overlay.is_null() {
            return base.clone();
        }
        match (&self.kind, base, overlay) {
            (ElementKind::Keyed { elements, .. }, Value::Mapping(base), Value::Mapping(overlay)) => {
                Value::Mapping(merge_entries(base, overlay, |key| {
                    elements.iter().find(|child| child.name() == Some(key))
                }))
            }
            (ElementKind::Category { sub, .. }, Value::Mapping(base), Value::Mapping(overlay)) => {
                Value::Mapping(merge_entries(base, overlay, |_| Some(sub.as_ref())))
            }
            (ElementKind::List { .. }, _, Value::Sequence(items)) if items.is_empty() => base.clone(),
            _ => overlay.clone(),
        }
    }
}

fn merge_entries<'e>(
    base: &Mapping,
    overlay: &Mapping,
    element_for: impl Fn(&str) -> Option<&'e Element>,
) -> Mapping {
    let mut out = base.clone();
    for (key, value) in overlay.iter() {
        let merged = match (element_for(key), out.get(key)) {
            (Some(element), Some(existing)) => element.merge(existing, value),
            (None, Some(existing)) if value.is_null() => existing.clone(),
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}
