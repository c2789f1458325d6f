use super::{ConfigRoot, DumpOptions};
use crate::{ConfigError, Element};

/// Serves a borrowed element as a document root.
///
/// Any element can be a root this way, including scalars and lists; the
/// element's own validation and emission are used unchanged.
#[derive(Debug, Clone)]
pub struct ElementRoot<'a> {
    element: &'a Element,
    options: DumpOptions,
}

impl<'a> ElementRoot<'a> {
    pub fn new(element: &'a Element) -> Result<Self, ConfigError> {
        element.check()?;
        Ok(Self {
            element,
            options: DumpOptions::default(),
        })
    }

    pub fn with_options(mut self, options: DumpOptions) -> Self {
        self.options = options;
        self
    }
}

impl ConfigRoot for ElementRoot<'_> {
    fn root_element(&self) -> &Element {
        self.element
    }

    fn options(&self) -> &DumpOptions {
        &self.options
    }
}

impl Element {
    /// Check this element and borrow it as a document root.
    pub fn as_root(&self) -> Result<ElementRoot<'_>, ConfigError> {
        ElementRoot::new(self)
    }
}
