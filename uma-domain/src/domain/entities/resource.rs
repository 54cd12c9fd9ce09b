use super::common::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UMA resource as stored in the directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmaResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<Dn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub scopes: Vec<Dn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_expression: Option<String>,
    #[serde(default)]
    pub clients: Vec<Dn>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Which set-valued relationship attribute of a resource is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSet {
    Clients,
    Scopes,
}

impl std::fmt::Display for ReferenceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceSet::Clients => write!(f, "clients"),
            ReferenceSet::Scopes => write!(f, "scopes"),
        }
    }
}

impl UmaResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn references(&self, set: ReferenceSet) -> &[Dn] {
        match set {
            ReferenceSet::Clients => &self.clients,
            ReferenceSet::Scopes => &self.scopes,
        }
    }

    fn references_mut(&mut self, set: ReferenceSet) -> &mut Vec<Dn> {
        match set {
            ReferenceSet::Clients => &mut self.clients,
            ReferenceSet::Scopes => &mut self.scopes,
        }
    }

    /// Append a reference. Already-present references are appended again.
    pub fn add_reference(&mut self, set: ReferenceSet, reference: Dn) {
        self.references_mut(set).push(reference);
    }

    /// Remove the first entry equal to `reference`.
    ///
    /// Returns false, leaving the collection untouched, when nothing matched.
    pub fn remove_reference(&mut self, set: ReferenceSet, reference: &Dn) -> bool {
        let references = self.references_mut(set);
        match references.iter().position(|r| r == reference) {
            Some(index) => {
                references.remove(index);
                true
            }
            None => false,
        }
    }
}
