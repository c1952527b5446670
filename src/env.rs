//! Environment variable names used by this crate for convenient
//! configuration of the hook from services.
//!
//! These are purely helpers; [`FluentConfig`] itself stays decoupled from
//! environment access.

use crate::config::{ConfigError, FluentConfig};
use std::time::Duration;

/// Full collector address, e.g. `tcp://127.0.0.1:24224`. When set it takes
/// precedence over host and port.
pub const FLUENT_ADDRESS_ENV: &str = "FLUENT_ADDRESS";

/// Collector host name.
pub const FLUENT_HOST_ENV: &str = "FLUENT_HOST";

/// Collector TCP port.
pub const FLUENT_PORT_ENV: &str = "FLUENT_PORT";

/// Optional prefix for every tag.
pub const FLUENT_TAG_PREFIX_ENV: &str = "FLUENT_TAG_PREFIX";

/// Connect timeout in milliseconds.
pub const FLUENT_TIMEOUT_MS_ENV: &str = "FLUENT_TIMEOUT_MS";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl FluentConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup, starting from
    /// [`FluentConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(FLUENT_ADDRESS_ENV) {
            Some(address) => Self::from_address(&address)?,
            None => {
                let mut cfg = Self::default();
                if let Some(host) = lookup(FLUENT_HOST_ENV) {
                    cfg.host = host;
                }
                if let Some(port) = lookup(FLUENT_PORT_ENV) {
                    cfg.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
                }
                cfg
            }
        };

        if let Some(prefix) = lookup(FLUENT_TAG_PREFIX_ENV) {
            cfg.tag_prefix = Some(prefix);
        }
        if let Some(ms) = lookup(FLUENT_TIMEOUT_MS_ENV) {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidTimeout(ms))?;
            cfg.timeout = Duration::from_millis(ms);
        }

        Ok(cfg)
    }
}
