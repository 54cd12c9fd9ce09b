use serde::{Deserialize, Serialize};
use uma_domain::PersistenceType;

/// Query string of `GET /uma/resources/search`
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
    pub size: usize,
}

/// Query string of `GET /uma/scopes/search`; `size` falls back to the scope list limit
#[derive(Debug, Deserialize)]
pub struct ScopeSearchQuery {
    pub pattern: String,
    pub size: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub persistence_type: PersistenceType,
    pub ldap: bool,
}
