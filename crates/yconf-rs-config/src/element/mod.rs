//! Schema elements.
//!
//! An [`Element`] describes one value of a configuration document: its type,
//! whether it is required, its default and its documentation. Composite
//! kinds (`Keyed`, `Category`, `List`) nest further elements. Element trees
//! are built once with the builder methods below, checked with
//! [`Element::check`], and then shared read-only by any number of loads and
//! dumps.

mod check;
mod emit;
mod list;
mod lookup;
mod mapping;
mod merge;
mod scalar;

use crate::path::join_path;
use crate::{ConfigError, Mapping, Value};
use std::fmt;
use std::sync::Arc;

/// Callback run on a validated value, given the validated siblings of its parent.
///
/// The siblings are the parent mapping for keyed and category entries, the
/// whole sequence for list items, and null for a document root.
#[derive(Clone)]
pub struct PostValidator(Arc<dyn Fn(&Value, &Value) -> Result<Value, String> + Send + Sync>);

impl fmt::Debug for PostValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostValidator(..)")
    }
}

/// Callback computing a derived value from the validated entries of its parent.
#[derive(Clone)]
pub struct Resolver(Arc<dyn Fn(&Mapping) -> Result<Value, String> + Send + Sync>);

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// Case normalisation applied to mapping keys before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keys are used verbatim.
    #[default]
    Mixed,
    Lower,
    Upper,
}

/// The closed set of element kinds.
#[derive(Debug, Clone)]
pub enum ElementKind {
    Str,
    Int,
    Float,
    Bool,
    /// A non-empty string naming a filesystem path. The path need not exist.
    Path,
    /// A string matching `pattern` from its first character.
    Regex {
        pattern: String,
        compiled: Result<regex::Regex, String>,
    },
    /// A list of lines joined into one newline-terminated block.
    Code,
    /// A mapping with a fixed, declared set of named children.
    Keyed {
        elements: Vec<Element>,
        allow_extra_keys: bool,
    },
    /// A mapping from arbitrary keys to instances of one sub-element.
    Category {
        sub: Box<Element>,
        min_entries: usize,
        default_key: Option<String>,
    },
    /// An ordered sequence of instances of one sub-element.
    List {
        sub: Box<Element>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// A value computed from its keyed siblings; never read or written.
    Derived { resolver: Resolver },
}

impl ElementKind {
    /// Type name shown in documentation comments.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Str | ElementKind::Regex { .. } => "str",
            ElementKind::Int => "int",
            ElementKind::Float => "float",
            ElementKind::Bool => "bool",
            ElementKind::Path => "path",
            ElementKind::Code => "code block",
            ElementKind::Keyed { .. } => "mapping",
            ElementKind::Category { .. } => "category",
            ElementKind::List { .. } => "list of items",
            ElementKind::Derived { .. } => "derived",
        }
    }
}

/// Whether validation enforces `required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidateMode {
    /// Required values must be present and defaults are filled in.
    Full,
    /// Nothing is required and absent values stay null, for layers merged later.
    Partial,
}

/// A schema node.
#[derive(Debug, Clone)]
pub struct Element {
    name: Option<String>,
    required: bool,
    hidden: bool,
    default: Option<Value>,
    help: Option<String>,
    choices: Vec<Value>,
    min: Option<f64>,
    max: Option<f64>,
    key_case: KeyCase,
    post_validator: Option<PostValidator>,
    kind: ElementKind,
}

impl Element {
    fn with_kind(kind: ElementKind) -> Self {
        Self {
            name: None,
            required: false,
            hidden: false,
            default: None,
            help: None,
            choices: Vec::new(),
            min: None,
            max: None,
            key_case: KeyCase::Mixed,
            post_validator: None,
            kind,
        }
    }

    /// A string. Bool and numeric scalars are converted to their text.
    pub fn string() -> Self {
        Self::with_kind(ElementKind::Str)
    }

    /// A signed 64-bit integer.
    pub fn integer() -> Self {
        Self::with_kind(ElementKind::Int)
    }

    /// A float. Integers are accepted and widened.
    pub fn float() -> Self {
        Self::with_kind(ElementKind::Float)
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        Self::with_kind(ElementKind::Bool)
    }

    /// A non-empty filesystem path, kept as text.
    pub fn path() -> Self {
        Self::with_kind(ElementKind::Path)
    }

    /// A string that must match `pattern` starting at its first character.
    pub fn regex(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let compiled = regex::Regex::new(&format!("^(?:{pattern})")).map_err(|err| err.to_string());
        Self::with_kind(ElementKind::Regex { pattern, compiled })
    }

    /// A block of text given as a list of lines and stored newline-terminated.
    pub fn code() -> Self {
        Self::with_kind(ElementKind::Code)
    }

    /// A mapping with the given named children, validated and emitted in declared order.
    pub fn keyed(elements: Vec<Element>) -> Self {
        Self::with_kind(ElementKind::Keyed {
            elements,
            allow_extra_keys: false,
        })
    }

    /// A mapping whose keys are free-form and whose values all follow `sub`.
    pub fn category(sub: Element) -> Self {
        Self::with_kind(ElementKind::Category {
            sub: Box::new(sub),
            min_entries: 0,
            default_key: None,
        })
    }

    /// A category of keyed entries where the `_` entry supplies defaults for all others.
    pub fn defaulted_category(elements: Vec<Element>) -> Self {
        Self::with_kind(ElementKind::Category {
            sub: Box::new(Element::keyed(elements)),
            min_entries: 0,
            default_key: Some("_".to_string()),
        })
    }

    /// A sequence whose items all follow `sub`.
    pub fn list(sub: Element) -> Self {
        Self::with_kind(ElementKind::List {
            sub: Box::new(sub),
            min_length: None,
            max_length: None,
        })
    }

    /// A value computed by `resolver` from the other entries of the enclosing keyed element.
    pub fn derived(
        resolver: impl Fn(&Mapping) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self::with_kind(ElementKind::Derived {
            resolver: Resolver(Arc::new(resolver)),
        })
    }

    /// Set the key this element is stored under in its parent.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fail validation when the value is absent and no default is declared.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Validate the element but leave it out of dumped output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Value used when the entry is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Help text shown in generated comments.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Allowed values for a scalar, or allowed keys for a category.
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Inclusive lower bound for numeric elements.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound for numeric elements.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Fewest items a list may hold. Ignored on other kinds.
    pub fn min_length(mut self, len: usize) -> Self {
        if let ElementKind::List { min_length, .. } = &mut self.kind {
            *min_length = Some(len);
        }
        self
    }

    /// Most items a list may hold. Ignored on other kinds.
    pub fn max_length(mut self, len: usize) -> Self {
        if let ElementKind::List { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    /// Let undeclared keys of a keyed element pass through unvalidated.
    pub fn allow_extra_keys(mut self) -> Self {
        if let ElementKind::Keyed {
            allow_extra_keys, ..
        } = &mut self.kind
        {
            *allow_extra_keys = true;
        }
        self
    }

    /// How keys of a keyed or category element are normalised before lookup.
    pub fn key_case(mut self, case: KeyCase) -> Self {
        self.key_case = case;
        self
    }

    /// Fewest entries a category may hold.
    pub fn min_entries(mut self, count: usize) -> Self {
        if let ElementKind::Category { min_entries, .. } = &mut self.kind {
            *min_entries = count;
        }
        self
    }

    /// Use `key` instead of `_` as the shared-defaults entry of a category.
    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        if let ElementKind::Category { default_key, .. } = &mut self.kind {
            *default_key = Some(key.into());
        }
        self
    }

    /// Run `validator` on the validated value, with the enclosing entries as its first argument.
    pub fn post_validator(
        mut self,
        validator: impl Fn(&Value, &Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        self.post_validator = Some(PostValidator(Arc::new(validator)));
        self
    }

    /// The key this element is stored under, if named.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the element was marked [`Element::required`].
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the element is left out of dumps.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The default as declared, without recursing into children.
    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Help text, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Declared choices; empty when any value is allowed.
    pub fn choice_values(&self) -> &[Value] {
        &self.choices
    }

    /// The element's variant and its variant-specific settings.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.kind, ElementKind::Derived { .. })
    }

    /// Validate and convert a raw value, filling defaults and enforcing `required`.
    pub fn validate(&self, value: &Value) -> Result<Value, ConfigError> {
        self.validate_root(value, ValidateMode::Full)
    }

    /// Validate a layer that will be merged later: nothing is required and
    /// absent values are left null instead of being defaulted.
    pub fn validate_partial(&self, value: &Value) -> Result<Value, ConfigError> {
        self.validate_root(value, ValidateMode::Partial)
    }

    fn validate_root(&self, value: &Value, mode: ValidateMode) -> Result<Value, ConfigError> {
        let validated = self.validate_at(value, "", mode)?;
        self.run_post_validator(&Value::Null, validated, "")
    }

    pub(crate) fn validate_at(
        &self,
        value: &Value,
        path: &str,
        mode: ValidateMode,
    ) -> Result<Value, ConfigError> {
        if mode == ValidateMode::Partial && value.is_null() {
            return Ok(Value::Null);
        }
        match &self.kind {
            ElementKind::Keyed {
                elements,
                allow_extra_keys,
            } => self.validate_keyed(elements, *allow_extra_keys, value, path, mode),
            ElementKind::Category {
                sub,
                min_entries,
                default_key,
            } => self.validate_category(sub, *min_entries, default_key.as_deref(), value, path, mode),
            ElementKind::List {
                sub,
                min_length,
                max_length,
            } => self.validate_list(sub, *min_length, *max_length, value, path, mode),
            ElementKind::Code => self.validate_code(value, path),
            ElementKind::Derived { .. } => Err(ConfigError::schema(
                path,
                "derived elements are resolved by their keyed parent",
            )),
            _ => self.validate_scalar(value, path),
        }
    }

    /// Run this element's post-validator, skipping optional null values.
    pub(crate) fn run_post_validator(
        &self,
        siblings: &Value,
        value: Value,
        path: &str,
    ) -> Result<Value, ConfigError> {
        let Some(PostValidator(validator)) = &self.post_validator else {
            return Ok(value);
        };
        if !self.required && value.is_null() {
            return Ok(value);
        }
        validator(siblings, &value)
            .map_err(|message| ConfigError::validation(path, format!("post-validation failed: {message}")))
    }

    /// Null, or the declared default, or a missing-key error when required.
    fn absent(&self, path: &str) -> Result<Value, ConfigError> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }
        if self.required {
            return Err(ConfigError::MissingKey {
                path: path.to_string(),
            });
        }
        Ok(Value::Null)
    }

    /// Materialise this element's default, recursing into keyed children.
    ///
    /// Fails with a schema error when a required element without a default
    /// is reached.
    pub fn default(&self) -> Result<Value, ConfigError> {
        self.default_at("")
    }

    pub(crate) fn default_at(&self, path: &str) -> Result<Value, ConfigError> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }
        if self.required {
            return Err(ConfigError::schema(path, "required element has no default"));
        }
        match &self.kind {
            ElementKind::Keyed { elements, .. } => {
                let mut map = Mapping::new();
                for child in elements {
                    let name = child.name().unwrap_or_default();
                    let value = if child.is_derived() {
                        Value::Null
                    } else {
                        child.default_at(&join_path(path, name))?
                    };
                    map.insert(name, value);
                }
                self.resolve_derived(elements, &mut map, path)
                    .map_err(|err| ConfigError::schema(path, err.to_string()))?;
                Ok(Value::Mapping(map))
            }
            ElementKind::Category { .. } => Ok(Value::Mapping(Mapping::new())),
            ElementKind::List { .. } => Ok(Value::Sequence(Vec::new())),
            _ => Ok(Value::Null),
        }
    }
}
