//! Schema-driven configuration definition and validation.
//!
//! Applications declare the shape of their configuration once as an
//! [`Element`] tree and use a [`ConfigRoot`] to load, validate, navigate and
//! dump documents against it. Dumped documents carry the schema's
//! documentation as comments, so an empty dump doubles as a commented
//! template.

mod element;
mod error;
mod path;
mod root;
mod value;
mod wrap;

/// Public error type returned by schema, load, dump and path APIs.
pub use error::ConfigError;
/// Schema elements and their building blocks.
pub use element::{Element, ElementKind, KeyCase, PostValidator, Resolver};
/// Document roots and dump options.
pub use root::{Config, ConfigRoot, DumpOptions, ElementRoot};
/// Ordered document model.
pub use value::{Mapping, Value};
/// Comment word-wrapping.
pub use wrap::wrap;
