use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 24224;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Transport a recorder should use to reach the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Unix,
}

/// Connection settings for a fluentd-style collector.
///
/// The hook does not interpret any of this; it is handed to
/// [`Recorder::connect`](crate::recorder::Recorder::connect) as-is. Missing
/// fields fall back to [`FluentConfig::default`] when deserialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluentConfig {
    pub host: String,
    pub port: u16,
    pub network: Network,
    /// Socket path, used when `network` is [`Network::Unix`].
    pub socket_path: Option<PathBuf>,
    /// Upper bound on establishing a connection.
    pub timeout: Duration,
    /// Prepended to every tag by recorders that support it.
    pub tag_prefix: Option<String>,
    /// Keep fractional seconds in record timestamps.
    pub sub_second_precision: bool,
}

impl Default for FluentConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            network: Network::Tcp,
            socket_path: None,
            timeout: DEFAULT_TIMEOUT,
            tag_prefix: None,
            sub_second_precision: false,
        }
    }
}

impl FluentConfig {
    /// Parse a DSN-style address and infer the network from its scheme.
    ///
    /// Examples:
    /// - "tcp://127.0.0.1:24224"
    /// - "tcp://fluentd" (default port)
    /// - "unix:///var/run/fluent/fluent.sock"
    pub fn from_address(address: &str) -> Result<Self, ConfigError> {
        let lower = address.to_ascii_lowercase();

        if lower.starts_with("tcp://") {
            let rest = &address["tcp://".len()..];
            let (host, port) = match rest.rsplit_once(':') {
                Some((host, port)) => {
                    let port = port
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;
                    (host, port)
                }
                None => (rest, DEFAULT_PORT),
            };
            if host.is_empty() {
                return Err(ConfigError::MissingHost);
            }
            Ok(Self {
                host: host.to_string(),
                port,
                network: Network::Tcp,
                ..Self::default()
            })
        } else if lower.starts_with("unix://") {
            let path = &address["unix://".len()..];
            if path.is_empty() {
                return Err(ConfigError::MissingSocketPath);
            }
            Ok(Self {
                network: Network::Unix,
                socket_path: Some(PathBuf::from(path)),
                ..Self::default()
            })
        } else {
            Err(ConfigError::UnknownScheme)
        }
    }

    /// `host:port` for TCP, the socket path for Unix sockets.
    pub fn address(&self) -> String {
        match (self.network, &self.socket_path) {
            (Network::Unix, Some(path)) => path.display().to_string(),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Error type returned when building a [`FluentConfig`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown or unsupported address scheme")]
    UnknownScheme,

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("address has no host")]
    MissingHost,

    #[error("unix address has no socket path")]
    MissingSocketPath,

    #[error("invalid timeout in milliseconds: {0:?}")]
    InvalidTimeout(String),
}
