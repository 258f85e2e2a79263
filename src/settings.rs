//! # Storage Settings
//!
//! Selects and parameterises the market repository backend.
//!
//! Settings are read once at startup from, in increasing priority:
//!
//! 1. built-in defaults (embedded, in-memory SQLite)
//! 2. an optional TOML file
//! 3. `MARKET_REGISTRY_*` environment variables, after a `.env` file in the
//!    working directory has been loaded
//!
//! The resulting [`StorageSettings`] is passed explicitly to
//! [`connect_repository`](crate::infrastructure::persistence::connect_repository);
//! there is no process-global repository.
//!
//! # Examples
//!
//! ```
//! use market_registry::settings::{BackendKind, StorageSettings};
//!
//! let settings = StorageSettings::from_toml(
//!     r#"
//!     backend = "networked"
//!     postgres_url = "postgres://dex@db/markets"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.backend(), BackendKind::Networked);
//! assert_eq!(settings.max_connections(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default SQLite location.
pub const DEFAULT_SQLITE_URL: &str = "sqlite::memory:";

/// Default pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u32 = 10;

/// Environment variable prefix.
const ENV_PREFIX: &str = "MARKET_REGISTRY";

/// Error loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not match the expected shape.
    #[error("invalid settings: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Which storage engine backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local SQLite database.
    #[default]
    Embedded,
    /// Remote PostgreSQL database.
    Networked,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded"),
            Self::Networked => f.write_str("networked"),
        }
    }
}

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    backend: BackendKind,
    sqlite_url: String,
    #[serde(default)]
    postgres_url: Option<String>,
    max_connections: u32,
    connect_timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            sqlite_url: DEFAULT_SQLITE_URL.to_string(),
            postgres_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: u64::from(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl StorageSettings {
    /// Embedded backend at the given SQLite URL.
    #[must_use]
    pub fn embedded(sqlite_url: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Embedded,
            sqlite_url: sqlite_url.into(),
            ..Self::default()
        }
    }

    /// Networked backend at the given PostgreSQL URL.
    #[must_use]
    pub fn networked(postgres_url: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Networked,
            postgres_url: Some(postgres_url.into()),
            ..Self::default()
        }
    }

    /// Sets the pool size.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets the connect timeout in seconds.
    #[must_use]
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` if the file is missing or any value
    /// has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }

        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        tracing::debug!(backend = %settings.backend, "loaded storage settings");
        Ok(settings)
    }

    /// Parses settings from TOML text layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` if the text is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError> {
        Ok(config::Config::builder()
            .set_default("backend", BackendKind::default().to_string())?
            .set_default("sqlite_url", DEFAULT_SQLITE_URL)?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default(
                "connect_timeout_secs",
                i64::from(DEFAULT_CONNECT_TIMEOUT_SECS),
            )?)
    }

    /// Selected backend.
    #[inline]
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// SQLite URL for the embedded backend.
    #[inline]
    #[must_use]
    pub fn sqlite_url(&self) -> &str {
        &self.sqlite_url
    }

    /// PostgreSQL URL for the networked backend.
    #[inline]
    #[must_use]
    pub fn postgres_url(&self) -> Option<&str> {
        self.postgres_url.as_deref()
    }

    /// Maximum pool size.
    #[inline]
    #[must_use]
    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Connect timeout.
    #[inline]
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
