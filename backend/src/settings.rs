//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `CALCULATOR_*` environment variables,
//! and configuration files. `port` carries a declared default so an empty
//! environment still yields a settings value; the other keys are optional
//! and their accessors supply the defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "calculator.db";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Repository backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite file through the Diesel adapters.
    Sqlite,
    /// Process-local store; history is lost on restart.
    Memory,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid host address: {value}")]
    InvalidHost { value: String },
    #[error("unknown storage backend: {value} (expected `sqlite` or `memory`)")]
    UnknownStorage { value: String },
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Configuration values for the calculator server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALCULATOR")]
pub struct CalculatorSettings {
    /// SQLite database file.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Directory holding `calculator.html`.
    pub static_dir: Option<PathBuf>,
    /// Maximum pooled SQLite connections.
    pub pool_max_size: Option<u32>,
    /// `sqlite` or `memory`.
    pub storage: Option<String>,
}

impl CalculatorSettings {
    /// Database file, defaulting to `calculator.db`.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Socket address assembled from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw.parse::<IpAddr>().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port))
    }

    /// Static asset directory, defaulting to `static`.
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }

    /// Connection pool size, defaulting to 8.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Selected storage backend, defaulting to SQLite.
    pub fn storage(&self) -> Result<StorageBackend, SettingsError> {
        match self.storage.as_deref().map(str::trim) {
            None => Ok(StorageBackend::Sqlite),
            Some(value) if value.eq_ignore_ascii_case("sqlite") => Ok(StorageBackend::Sqlite),
            Some(value) if value.eq_ignore_ascii_case("memory") => Ok(StorageBackend::Memory),
            Some(value) => Err(SettingsError::UnknownStorage {
                value: value.to_owned(),
            }),
        }
    }
}
