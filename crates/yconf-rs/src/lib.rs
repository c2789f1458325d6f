//! Schema-driven YAML configuration.
//!
//! This crate re-exports the element model and config roots together with
//! the underlying event stream, and provides a small logging helper.

/// Re-export for convenience.
pub use yconf_rs_config as config;
/// Re-export for convenience.
pub use yconf_rs_events as events;

pub use yconf_rs_config::{
    Config, ConfigError, ConfigRoot, DumpOptions, Element, ElementRoot, KeyCase, Mapping, Value,
};

/// Install env_logger as the `log` backend when the "logging" feature is enabled.
///
/// Without the feature this does nothing. Repeated calls are harmless, so
/// tests and binaries can both call it.
#[inline]
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
