use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SERVER_LOCAL_HOST is not a valid IP address: {0}")]
    InvalidHost(String),
    #[error("SERVER_LOCAL_PORT is not a valid port: {0}")]
    InvalidPort(String),
    #[error("LOG_LEVEL is not a valid level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process settings, read from the environment.
///
/// | variable             | default     |
/// |----------------------|-------------|
/// | `SERVER_LOCAL_HOST`  | `127.0.0.1` |
/// | `SERVER_LOCAL_PORT`  | `3000`      |
/// | `ACCOUNTS_DATA_PATH` | none        |
/// | `LOG_FILE_PATH`      | none        |
/// | `LOG_FORMAT`         | `text`      |
/// | `LOG_LEVEL`          | `info`      |
///
/// Logs always go to stdout; `LOG_FILE_PATH` adds a copy in that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub seed_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            seed_path: None,
            log_file: None,
            log_format: LogFormat::Text,
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let host = match var("SERVER_LOCAL_HOST") {
            Some(host) => host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host))?,
            None => defaults.host,
        };

        let port = match var("SERVER_LOCAL_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            None => defaults.port,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(format) if format.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let log_level = match var("LOG_LEVEL") {
            Some(level) => level
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(level))?,
            None => defaults.log_level,
        };

        Ok(Self {
            host,
            port,
            seed_path: var("ACCOUNTS_DATA_PATH").map(PathBuf::from),
            log_file: var("LOG_FILE_PATH").map(PathBuf::from),
            log_format,
            log_level,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
