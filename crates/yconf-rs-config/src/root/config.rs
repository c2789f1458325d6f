use super::{ConfigRoot, DumpOptions};
use crate::{ConfigError, Element};
use std::sync::Arc;

/// A config root owning a shared, checked element tree.
///
/// Cloning is cheap and clones share the same tree, so one `Config` can be
/// handed to any number of threads loading and dumping documents.
#[derive(Debug, Clone)]
pub struct Config {
    root: Arc<Element>,
    options: DumpOptions,
}

impl Config {
    /// Check `root` and wrap it as a config root with default dump options.
    pub fn new(root: Element) -> Result<Self, ConfigError> {
        Self::from_shared(Arc::new(root))
    }

    /// Like [`Config::new`] for a tree that is already shared.
    pub fn from_shared(root: Arc<Element>) -> Result<Self, ConfigError> {
        root.check()?;
        Ok(Self {
            root,
            options: DumpOptions::default(),
        })
    }

    pub fn with_options(mut self, options: DumpOptions) -> Self {
        self.options = options;
        self
    }

    pub fn shared_root(&self) -> Arc<Element> {
        Arc::clone(&self.root)
    }
}

impl ConfigRoot for Config {
    fn root_element(&self) -> &Element {
        &self.root
    }

    fn options(&self) -> &DumpOptions {
        &self.options
    }
}
