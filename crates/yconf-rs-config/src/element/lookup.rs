//! Schema navigation by dotted path.

use super::{Element, ElementKind, ValidateMode};
use crate::path::{index, join_path, segments};
use crate::{ConfigError, Value};

impl Element {
    /// The element addressing `segment` below this one.
    ///
    /// Keyed elements resolve their named children. Categories resolve any
    /// key, and lists any index, to their sub-element. `*` also names the
    /// sub-element of either.
    pub fn child(&self, segment: &str) -> Option<&Element> {
        match &self.kind {
            ElementKind::Keyed { elements, .. } => {
                elements.iter().find(|child| child.name() == Some(segment))
            }
            ElementKind::Category { sub, .. } => Some(sub.as_ref()),
            ElementKind::List { sub, .. } if segment == "*" || index(segment).is_some() => {
                Some(sub.as_ref())
            }
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut Element> {
        match &mut self.kind {
            ElementKind::Keyed { elements, .. } => elements
                .iter_mut()
                .find(|child| child.name() == Some(segment)),
            ElementKind::Category { sub, .. } => Some(sub.as_mut()),
            ElementKind::List { sub, .. } if segment == "*" || index(segment).is_some() => {
                Some(sub.as_mut())
            }
            _ => None,
        }
    }

    /// Find the element at a dotted path such as `cars.*.color`.
    ///
    /// The empty path names this element.
    pub fn lookup(&self, dotted: &str) -> Result<&Element, ConfigError> {
        let mut current = self;
        let mut walked = String::new();
        for segment in segments(dotted) {
            walked = join_path(&walked, segment);
            current = current
                .child(segment)
                .ok_or_else(|| no_element(&walked, current))?;
        }
        Ok(current)
    }

    /// Replace the default of the element at `dotted`, validating it first.
    ///
    /// Meant for adjusting shared schema fragments while a tree is being built.
    pub fn with_default_at(
        mut self,
        dotted: &str,
        value: impl Into<Value>,
    ) -> Result<Self, ConfigError> {
        let value = value.into();
        let mut target = &mut self;
        let mut walked = String::new();
        for segment in segments(dotted) {
            walked = join_path(&walked, segment);
            let kind = target.kind.type_name();
            target = target.child_mut(segment).ok_or_else(|| {
                ConfigError::unresolved(&walked, format!("no element below this {kind}"))
            })?;
        }
        if target.is_derived() {
            return Err(ConfigError::schema(dotted, "derived elements have no default"));
        }
        let validated = target.validate_at(&value, dotted, ValidateMode::Partial)?;
        target.default = Some(validated);
        Ok(self)
    }
}

fn no_element(path: &str, parent: &Element) -> ConfigError {
    ConfigError::unresolved(
        path,
        format!("no element below this {}", parent.kind.type_name()),
    )
}
