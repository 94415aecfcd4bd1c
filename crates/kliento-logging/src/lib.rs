//! kliento-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] to install a `fmt` subscriber writing to stderr
//! - [`ReloadHandle`] to change the log level at runtime
//! - `RUST_LOG` support, which takes precedence over the configured level

mod reload;
mod subscriber;

pub use kliento_core::LogLevel;
pub use reload::ReloadHandle;
pub use subscriber::{init_logging, init_logging_from_config, level_filter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
