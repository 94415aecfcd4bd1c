//! Global subscriber installation.
//!
//! Kept in its own test binary so that no other test installs a global
//! subscriber first.

#![allow(non_snake_case)]

use kliento_core::KlientoConfig;
use kliento_logging::{LogLevel, ReloadHandle, init_logging, init_logging_from_config};

#[test]
fn init_logging___called_twice___installs_once_and_allows_reload() {
    let installed = init_logging(LogLevel::Warn);
    let reinstalled = init_logging_from_config(&KlientoConfig::default());

    assert!(installed);
    assert!(!reinstalled);

    let handle = ReloadHandle::global();
    assert!(handle.is_initialized());
    assert_eq!(handle.current_level(), Some(LogLevel::Warn));

    handle.reload_level(LogLevel::Debug).unwrap();
    assert_eq!(handle.current_level(), Some(LogLevel::Debug));
    tracing::debug!("visible after reload");
}
