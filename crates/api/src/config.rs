//! Process configuration, read from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `ITEMSTORE_BIND_ADDR` | `0.0.0.0:8000` |
//! | `ITEMSTORE_LOG_FORMAT` | `json` (or `pretty`) |
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use std::net::{AddrParseError, Ipv4Addr, SocketAddr, SocketAddrV4};

use thiserror::Error;

use itemstore_observability::{LogFormat, UnknownLogFormat};

pub const BIND_ADDR_VAR: &str = "ITEMSTORE_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "ITEMSTORE_LOG_FORMAT";
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8000));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ITEMSTORE_BIND_ADDR={value:?} is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("ITEMSTORE_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset and empty are treated alike).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(value) => match value.trim().parse::<SocketAddr>() {
                Ok(addr) => addr,
                Err(source) => return Err(ConfigError::InvalidBindAddr { value, source }),
            },
            None => DEFAULT_BIND_ADDR,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            log_format,
        })
    }
}
