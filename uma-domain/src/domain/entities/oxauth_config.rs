use super::common::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::domain::errors::{DomainError, DomainResult};

/// Where the authorization server keeps its user sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStorageType {
    InMemory,
    Memcached,
    Redis,
    NativePersistence,
}

impl FromStr for SessionStorageType {
    type Err = String;

    /// Accepts any casing and `-`, `_` or space separators: `in-memory`,
    /// `IN_MEMORY` and `InMemory` all parse.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "inmemory" => Ok(SessionStorageType::InMemory),
            "memcached" => Ok(SessionStorageType::Memcached),
            "redis" => Ok(SessionStorageType::Redis),
            "nativepersistence" => Ok(SessionStorageType::NativePersistence),
            _ => Err(format!("unknown session storage type '{raw}'")),
        }
    }
}

/// Unrecognised storage names read as unset rather than failing the whole document
fn lenient_session_storage<'de, D>(deserializer: D) -> Result<Option<SessionStorageType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| raw.parse().ok()))
}

/// Dynamic configuration of the oxAuth authorization server.
///
/// The typed fields are the ones this API validates. Every other attribute
/// of the stored document travels through `other` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OxAuthConfig {
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_session_endpoint: Option<String>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id_lifetime: Option<i64>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id_unused_lifetime: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_session_storage",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_storage_type: Option<SessionStorageType>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl OxAuthConfig {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if is_blank(Some(self.issuer.as_str())) {
            return Err(DomainError::validation("issuer", "Issuer is required"));
        }

        let endpoints = [
            ("baseEndpoint", &self.base_endpoint),
            ("authorizationEndpoint", &self.authorization_endpoint),
            ("tokenEndpoint", &self.token_endpoint),
            ("userInfoEndpoint", &self.user_info_endpoint),
            ("endSessionEndpoint", &self.end_session_endpoint),
        ];
        for (field, value) in endpoints {
            if let Some(url) = value {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(DomainError::validation(field, "Must be an http(s) URL"));
                }
            }
        }

        let lifetimes = [
            ("sessionIdLifetime", self.session_id_lifetime),
            ("sessionIdUnusedLifetime", self.session_id_unused_lifetime),
        ];
        for (field, value) in lifetimes {
            if matches!(value, Some(seconds) if seconds <= 0) {
                return Err(DomainError::validation(field, "Must be a positive number of seconds"));
            }
        }

        Ok(())
    }
}
