use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_DN: &str = "o=gluu";
pub const DEFAULT_RESOURCE_LIST_LIMIT: usize = 1000;
pub const DEFAULT_SCOPE_LIST_LIMIT: usize = 100;

/// Directory-side configuration shared by the services and the adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Suffix appended to every generated DN
    pub base_dn: String,
    /// Upper bound on records returned by a resource listing
    pub resource_list_limit: usize,
    /// Upper bound on records returned by a scope listing or search
    pub scope_list_limit: usize,
    /// Optional JSON snapshot used to seed the in-memory directory
    pub seed_file: Option<PathBuf>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_dn: DEFAULT_BASE_DN.to_string(),
            resource_list_limit: DEFAULT_RESOURCE_LIST_LIMIT,
            scope_list_limit: DEFAULT_SCOPE_LIST_LIMIT,
            seed_file: None,
        }
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            base_dn: env::var("DIRECTORY_BASE_DN").unwrap_or(defaults.base_dn),
            resource_list_limit: parse_env("RESOURCE_LIST_LIMIT", defaults.resource_list_limit)?,
            scope_list_limit: parse_env("SCOPE_LIST_LIMIT", defaults.scope_list_limit)?,
            seed_file: env::var("DIRECTORY_SEED_FILE").ok().map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_dn.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "DIRECTORY_BASE_DN".to_string(),
            });
        }

        if self.resource_list_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RESOURCE_LIST_LIMIT".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.scope_list_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SCOPE_LIST_LIMIT".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
pub fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
