use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical directory reference (distinguished name) of an entry.
///
/// Treated as an opaque string: two references are the same entry exactly
/// when their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dn(pub String);

impl Dn {
    pub fn new(dn: impl Into<String>) -> Self {
        Self(dn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Dn {
    fn from(dn: String) -> Self {
        Self(dn)
    }
}

impl From<&str> for Dn {
    fn from(dn: &str) -> Self {
        Self(dn.to_string())
    }
}

impl std::fmt::Display for Dn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a caller-facing identifier for an entity that was submitted without one
pub fn generate_external_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a directory-unique inum
pub fn generate_inum() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// Treat `None`, empty and whitespace-only strings alike
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Pattern search criteria handed to the directory
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub pattern: String,
    pub size: usize,
}

impl SearchCriteria {
    pub fn new(pattern: impl Into<String>, size: usize) -> Self {
        Self {
            pattern: pattern.into(),
            size,
        }
    }

    /// Case-insensitive substring match against any of the given attribute values
    pub fn matches<'a>(&self, values: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        let needle = self.pattern.to_lowercase();
        values
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

/// Storage backend family behind the directory port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistenceType {
    Ldap,
    Couchbase,
    Hybrid,
    InMemory,
}

impl std::fmt::Display for PersistenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PersistenceType::Ldap => "ldap",
            PersistenceType::Couchbase => "couchbase",
            PersistenceType::Hybrid => "hybrid",
            PersistenceType::InMemory => "in-memory",
        };
        write!(f, "{name}")
    }
}
