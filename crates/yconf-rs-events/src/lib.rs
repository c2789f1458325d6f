//! Typed event stream for the structured-text configuration format.
//!
//! The reader turns YAML text into a flat sequence of [`Event`]s and the
//! emitter turns such a sequence back into block-style text, writing
//! [`Event::Comment`] annotations in front of the entry that follows them.

mod emitter;
mod error;
mod event;
mod reader;
mod scalar;

pub use emitter::{emit, emit_to_string};
pub use error::EventError;
pub use event::{Event, ScalarTag};
pub use reader::{read_events, read_events_str};
pub use scalar::render_scalar;
