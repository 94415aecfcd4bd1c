//! kliento-core - Token codec, claim sets and shared configuration
//!
//! This crate provides the foundational types for Kliento tokens:
//! - [`Token`] and [`ClaimSet`] with their canonical serialisation
//! - [`TokenError`] for codec errors
//! - [`KlientoConfig`] and the protocol constants
//! - [`LogLevel`] shared by configuration and logging

mod config;
mod error;
mod token;

pub use config::{
    AUTHORIZATION_SCHEME, KLIENTO_OID_ARC, KLIENTO_SERVICE_OID, KlientoConfig,
    MAX_TOKEN_BUNDLE_OCTETS,
};
pub use error::{TokenError, TokenResult};
pub use token::{ClaimSet, Token};

/// Log levels understood by the configuration and logging crates
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AUTHORIZATION_SCHEME, ClaimSet, KLIENTO_SERVICE_OID, KlientoConfig, LogLevel,
        MAX_TOKEN_BUNDLE_OCTETS, Token, TokenError, TokenResult,
    };
}
