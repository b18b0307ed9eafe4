//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use crate::registry::{FileRegistry, MemoryRegistry, Registry};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "db.json";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryKind {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub registry: RegistryKind,
    /// Origin used when building share links, without a trailing slash.
    pub public_url: String,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BOUQUET_REGISTRY`: `memory` (default) or `file`
    /// - `BOUQUET_DB_PATH`: JSON file for the `file` registry, default `db.json`
    /// - `BOUQUET_PUBLIC_URL`: default `http://localhost:3000`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `BOUQUET_REGISTRY` is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let registry = match lookup("BOUQUET_REGISTRY").as_deref().map(str::trim) {
            None | Some("" | "memory") => RegistryKind::Memory,
            Some("file") => {
                let path = lookup("BOUQUET_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_owned());
                RegistryKind::File(PathBuf::from(path))
            }
            Some(other) => {
                return Err(ConfigError::Invalid { var: "BOUQUET_REGISTRY", value: other.to_owned() });
            }
        };

        let public_url = lookup("BOUQUET_PUBLIC_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        Ok(Self { port, registry, public_url })
    }

    /// Construct the configured registry backend.
    #[must_use]
    pub fn build_registry(&self) -> Arc<dyn Registry> {
        match &self.registry {
            RegistryKind::Memory => Arc::new(MemoryRegistry::new()),
            RegistryKind::File(path) => Arc::new(FileRegistry::new(path.clone())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, registry: RegistryKind::Memory, public_url: DEFAULT_PUBLIC_URL.to_owned() }
    }
}
