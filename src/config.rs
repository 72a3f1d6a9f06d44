//! Process configuration.
//!
//! Values come from the process environment first, then from an optional `.env`
//! file. The file is read with `dotenvy` but never exported into the environment;
//! the resulting [`Config`] is built once at startup and passed down by reference.

use std::{collections::HashMap, path::Path};

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_PORT, SERVICE_NAME};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// OTLP export is disabled when unset.
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    EnvFile {
        path: String,
        source: dotenvy::Error,
    },
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(".env"), |key| std::env::var(key).ok())
    }

    /// `env` stands in for the process environment. empty values count as unset.
    pub fn load_from(
        env_file: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = read_env_file(env_file)?;
        let get = |key: &str| {
            env(key)
                .filter(|v| !v.is_empty())
                .or_else(|| file.get(key).filter(|v| !v.is_empty()).cloned())
        };

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
            service_name: get("OTEL_SERVICE_NAME").unwrap_or_else(|| SERVICE_NAME.to_string()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// a missing file is not an error.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let to_err = |source| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<Result<HashMap<_, _>, _>>().map_err(to_err),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(to_err(e)),
    }
}
