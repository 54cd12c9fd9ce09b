use std::{env, str::FromStr};

use uma_domain::{
    application::ports::{config::parse_env, DirectoryConfig},
    ConfigError,
};

/// Output format of the fmt tracing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected 'text' or 'json'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Key granting read and write access
    pub api_key: Option<String>,
    /// Key granting read access only
    pub read_only_api_key: Option<String>,
    pub log_format: LogFormat,
    pub directory: DirectoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_key: None,
            read_only_api_key: None,
            log_format: LogFormat::Text,
            directory: DirectoryConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_env("PORT", 3000)?,
            api_key: non_empty_var("API_KEY"),
            read_only_api_key: non_empty_var("READ_ONLY_API_KEY"),
            log_format: parse_env("LOG_FORMAT", LogFormat::Text)?,
            directory: DirectoryConfig::from_env()?,
        })
    }

    /// True when at least one API key is configured
    pub fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.read_only_api_key.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
