use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the database file location.
pub const DATABASE_ENV: &str = "DAYBOOK_DATABASE";

/// Environment variable overriding the connection pool size.
pub const MAX_CONNECTIONS_ENV: &str = "DAYBOOK_MAX_CONNECTIONS";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("data directory not found")]
    NoDataDir,

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Where and how the note store keeps its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl StoreConfig {
    /// A config for an explicit database file.
    pub fn at(path: impl AsRef<Path>) -> Self {
        StoreConfig {
            database_path: path.as_ref().to_path_buf(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Resolves the default database under the user's data directory,
    /// `{data_dir}/daybook/daybook.db`.
    ///
    /// # Errors
    /// - [`ConfigError::NoDataDir`] if the platform reports no data directory
    pub fn default_location() -> Result<Self, ConfigError> {
        let data = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(StoreConfig::at(data.join("daybook").join("daybook.db")))
    }

    /// Builds the config from the environment.
    ///
    /// Loads a `.env` file if one is present, then lets [`DATABASE_ENV`] and
    /// [`MAX_CONNECTIONS_ENV`] override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match env::var(DATABASE_ENV) {
            Ok(path) if !path.trim().is_empty() => StoreConfig::at(path.trim()),
            _ => StoreConfig::default_location()?,
        };

        if let Ok(raw) = env::var(MAX_CONNECTIONS_ENV) {
            config.max_connections = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: MAX_CONNECTIONS_ENV,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    pub(crate) fn connection_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path.display())
    }
}
