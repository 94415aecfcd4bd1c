//! Global subscriber installation

use crate::reload::ReloadHandle;
use kliento_core::{KlientoConfig, LogLevel};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Filter built from `RUST_LOG`, if set and valid
fn env_filter() -> Option<EnvFilter> {
    EnvFilter::try_from_default_env().ok()
}

/// Initialize the logging system
///
/// Installs a global `fmt` subscriber writing to stderr. When `RUST_LOG` is
/// set it decides what is logged and `level` is not applied. The level can
/// later be changed through [`ReloadHandle::global`].
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(level: LogLevel) -> bool {
    let env_filter = env_filter();
    let initial = if env_filter.is_some() {
        LevelFilter::TRACE
    } else {
        level_filter(level)
    };

    let (filter, handle) = reload::Layer::new(initial);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle, level);
    tracing::debug!(%level, "Logging initialized");
    true
}

/// Initialize logging at the level named in `config`
///
/// An unrecognised level falls back to `Info` with a warning.
pub fn init_logging_from_config(config: &KlientoConfig) -> bool {
    let installed = init_logging(config.log_level());
    if installed && config.log_level.parse::<LogLevel>().is_err() {
        tracing::warn!(
            log_level = %config.log_level,
            "Unknown log level in configuration, using INFO"
        );
    }
    installed
}
