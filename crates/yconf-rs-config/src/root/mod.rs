//! Document roots: loading, dumping and navigating whole documents.

mod config;
mod mixin;
mod navigate;

use crate::{ConfigError, Element, Value};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use yconf_rs_events::{Event, emit, emit_to_string, read_events};

pub use config::Config;
pub use mixin::ElementRoot;

/// Options controlling how documents are dumped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Emit documentation comments.
    pub show_comments: bool,
    /// Append the choices, range, pattern or length line to comments.
    pub show_choices: bool,
    /// Column width comments are wrapped to.
    pub comment_width: usize,
    /// Leave out keyed entries equal to their declared default.
    pub omit_defaults: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            show_comments: true,
            show_choices: true,
            comment_width: 80,
            omit_defaults: false,
        }
    }
}

/// A schema serving as the root of whole documents.
///
/// Implementors supply the root element and dump options; loading, dumping,
/// validation and path access are provided. Documents returned by these
/// methods are owned by the caller.
pub trait ConfigRoot {
    fn root_element(&self) -> &Element;

    fn options(&self) -> &DumpOptions;

    /// Parse and validate a document from `reader`.
    fn load<R: Read>(&self, reader: R) -> Result<Value, ConfigError> {
        let events = read_events(reader)?;
        let raw = Value::from_events(&events)?;
        debug!("parsed config document (events={})", events.len());
        self.validate(&raw)
    }

    fn load_str(&self, text: &str) -> Result<Value, ConfigError> {
        self.load(text.as_bytes())
    }

    /// Load the document stored at `path`.
    fn load_path(&self, path: impl AsRef<Path>) -> Result<Value, ConfigError> {
        let path = path.as_ref();
        info!("loading config (path={})", path.display());
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Write `document` with documentation comments. `None` writes a template of defaults.
    fn dump<W: Write>(&self, document: Option<&Value>, writer: W) -> Result<(), ConfigError> {
        emit(&self.to_events(document), writer)?;
        Ok(())
    }

    fn dump_to_string(&self, document: Option<&Value>) -> Result<String, ConfigError> {
        Ok(emit_to_string(&self.to_events(document))?)
    }

    /// Dump to the file at `path`, replacing any existing content.
    fn dump_path(&self, document: Option<&Value>, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let events = self.to_events(document);
        let text = emit_to_string(&events)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        info!("dumped config (path={}, bytes={})", path.display(), text.len());
        Ok(())
    }

    /// The full event stream for `document`, root comment included.
    fn to_events(&self, document: Option<&Value>) -> Vec<Event> {
        let root = self.root_element();
        let options = self.options();
        let mut events = vec![Event::StreamStart];
        if options.show_comments && root.help_text().is_some() {
            events.push(Event::comment(root.comment(options, true)));
        }
        root.emit(document, &mut events, options);
        events.push(Event::StreamEnd);
        events
    }

    /// Validate an already built document.
    fn validate(&self, raw: &Value) -> Result<Value, ConfigError> {
        self.root_element().validate(raw)
    }

    /// Validate a layer without enforcing required values.
    fn validate_partial(&self, raw: &Value) -> Result<Value, ConfigError> {
        self.root_element().validate_partial(raw)
    }

    /// Merge `overlay` onto `base` and validate the result.
    fn merge(&self, base: &Value, overlay: &Value) -> Result<Value, ConfigError> {
        let merged = self.root_element().merge(base, overlay);
        self.validate(&merged)
    }

    /// The value at a dotted path such as `cars.0.color`.
    fn find<'v>(&self, document: &'v Value, dotted: &str) -> Result<&'v Value, ConfigError> {
        navigate::find(self.root_element(), document, dotted)
    }

    fn find_mut<'v>(
        &self,
        document: &'v mut Value,
        dotted: &str,
    ) -> Result<&'v mut Value, ConfigError> {
        navigate::find_mut(self.root_element(), document, dotted)
    }

    /// Store the schema default at `dotted`, creating intermediate containers.
    fn set_default(&self, document: &mut Value, dotted: &str) -> Result<(), ConfigError> {
        navigate::set_default(self.root_element(), document, dotted)
    }

    /// The schema element at `dotted`; `*` addresses list and category items.
    fn element_at(&self, dotted: &str) -> Result<&Element, ConfigError> {
        self.root_element().lookup(dotted)
    }
}
