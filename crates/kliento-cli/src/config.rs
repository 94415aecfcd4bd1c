//! Configuration file loading

use anyhow::{Context, Result};
use kliento_core::{KlientoConfig, LogLevel};
use std::path::Path;

/// Load configuration from a TOML file, or defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<KlientoConfig> {
    let Some(path) = path else {
        return Ok(KlientoConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Parse configuration from TOML
pub fn from_str(content: &str) -> Result<KlientoConfig> {
    let config: KlientoConfig = toml::from_str(content)?;

    config
        .log_level
        .parse::<LogLevel>()
        .map_err(anyhow::Error::msg)?;

    if config.max_bundle_octets == 0 {
        anyhow::bail!("max_bundle_octets must be greater than zero");
    }

    Ok(config)
}
