//! Protocol constants and runtime configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OID arc assigned to Kliento
pub const KLIENTO_OID_ARC: &str = "1.3.6.1.4.1.58708.3";

/// Service identifier bound into every token bundle signature
pub const KLIENTO_SERVICE_OID: &str = "1.3.6.1.4.1.58708.3.0";

const OCTETS_PER_KIB: usize = 1024;
const MAX_TOKEN_BUNDLE_KIB: usize = 16;

/// Largest serialised token bundle accepted for parsing
pub const MAX_TOKEN_BUNDLE_OCTETS: usize = MAX_TOKEN_BUNDLE_KIB * OCTETS_PER_KIB;

/// Scheme of `Authorization` header values carrying a token bundle
pub const AUTHORIZATION_SCHEME: &str = "Kliento";

/// Configuration shared by issuers and verifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlientoConfig {
    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum serialised bundle size accepted by verifiers
    #[serde(default = "default_max_bundle_octets")]
    pub max_bundle_octets: usize,

    /// Lifetime of issued bundles when the issuer gives no explicit expiry
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,

    /// File holding the trust anchors used for verification
    #[serde(default)]
    pub trust_anchors_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_bundle_octets() -> usize {
    MAX_TOKEN_BUNDLE_OCTETS
}

fn default_ttl_seconds() -> u64 {
    300
}

impl Default for KlientoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_bundle_octets: default_max_bundle_octets(),
            default_ttl_seconds: default_ttl_seconds(),
            trust_anchors_path: None,
        }
    }
}

impl KlientoConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Parse the configured log level, falling back to `Info`
    pub fn log_level(&self) -> crate::LogLevel {
        self.log_level.parse().unwrap_or(crate::LogLevel::Info)
    }
}
