use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::application::ports::{
    ClientRepository, ConfigurationRepository, DirectoryInfo, ResourceRepository,
    ScopeRepository,
};
use crate::domain::{entities::*, errors::*};

/// Entries used to seed an [`InMemoryDirectory`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectorySnapshot {
    pub resources: Vec<UmaResource>,
    pub scopes: Vec<UmaScope>,
    pub clients: Vec<Client>,
    /// Stored as-is; it is only parsed when read back
    pub oxauth_configuration: Option<serde_json::Value>,
}

impl DirectorySnapshot {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::FileError {
            message: format!("Invalid directory snapshot: {e}"),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileError {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&raw)
    }
}

#[derive(Default)]
struct Entries {
    /// keyed by DN so listings come back in a stable order
    resources: BTreeMap<Dn, UmaResource>,
    scopes: BTreeMap<Dn, UmaScope>,
    clients: BTreeMap<Dn, Client>,
    /// JSON text, as a directory keeps it in a single attribute
    oxauth_config: Option<String>,
}

/// Directory adapter keeping every entry in process memory.
///
/// Implements the resource, scope and client ports with the same DN naming
/// scheme a directory server would use. Each call takes the lock once, so
/// single operations are atomic but sequences of calls are not.
pub struct InMemoryDirectory {
    base_dn: String,
    entries: RwLock<Entries>,
}

impl InMemoryDirectory {
    pub fn new(base_dn: impl Into<String>) -> Self {
        Self {
            base_dn: base_dn.into(),
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Load a snapshot. Missing dn/inum values are derived the same way
    /// the repository ports derive them.
    pub fn with_snapshot(self, snapshot: DirectorySnapshot) -> DomainResult<Self> {
        let (resources, scopes, clients) = (
            snapshot.resources.len(),
            snapshot.scopes.len(),
            snapshot.clients.len(),
        );

        for client in snapshot.clients {
            self.insert_client(client);
        }
        for mut scope in snapshot.scopes {
            let inum = scope
                .inum
                .clone()
                .filter(|inum| !is_blank(Some(inum.as_str())))
                .unwrap_or_else(generate_inum);
            scope.dn = Some(self.scope_dn(&inum));
            scope.inum = Some(inum);
            self.insert(|e| &mut e.scopes, scope.dn.clone(), scope)?;
        }
        for mut resource in snapshot.resources {
            let id = resource
                .id
                .clone()
                .filter(|id| !is_blank(Some(id.as_str())))
                .unwrap_or_else(generate_external_id);
            resource.dn = Some(self.resource_dn(&id));
            resource.id = Some(id);
            if is_blank(resource.inum.as_deref()) {
                resource.inum = Some(generate_inum());
            }
            self.insert(|e| &mut e.resources, resource.dn.clone(), resource)?;
        }

        if let Some(config) = snapshot.oxauth_configuration {
            let raw = serde_json::to_string(&config).map_err(|e| {
                RepositoryError::SerializationFailed {
                    message: e.to_string(),
                }
            })?;
            self.entries.write().oxauth_config = Some(raw);
        }

        info!(
            "Seeded in-memory directory with {} resources, {} scopes, {} clients",
            resources, scopes, clients
        );
        Ok(self)
    }

    /// Register a client; the DN is always derived from its inum
    pub fn insert_client(&self, mut client: Client) -> Dn {
        let dn = self.client_dn(&client.inum);
        client.dn = Some(dn.clone());
        self.entries.write().clients.insert(dn.clone(), client);
        dn
    }

    pub fn resource_count(&self) -> usize {
        self.entries.read().resources.len()
    }

    pub fn scope_count(&self) -> usize {
        self.entries.read().scopes.len()
    }

    fn resource_dn(&self, id: &str) -> Dn {
        Dn::new(format!("oxId={id},ou=resources,ou=uma,{}", self.base_dn))
    }

    fn scope_dn(&self, inum: &str) -> Dn {
        Dn::new(format!("inum={inum},ou=scopes,{}", self.base_dn))
    }

    fn client_dn(&self, inum: &str) -> Dn {
        Dn::new(format!("inum={inum},ou=clients,{}", self.base_dn))
    }

    fn oxauth_config_dn(&self) -> Dn {
        Dn::new(format!("ou=oxauth,ou=configuration,{}", self.base_dn))
    }

    fn insert<T>(
        &self,
        table: impl FnOnce(&mut Entries) -> &mut BTreeMap<Dn, T>,
        dn: Option<Dn>,
        entry: T,
    ) -> DomainResult<()> {
        let dn = dn.ok_or_else(|| DomainError::validation("dn", "Entry has no DN"))?;
        let mut entries = self.entries.write();
        let table = table(&mut *entries);
        if table.contains_key(&dn) {
            return Err(RepositoryError::EntryAlreadyExists { dn: dn.to_string() }.into());
        }
        debug!("Adding directory entry '{}'", dn);
        table.insert(dn, entry);
        Ok(())
    }

    fn replace<T>(
        &self,
        table: impl FnOnce(&mut Entries) -> &mut BTreeMap<Dn, T>,
        dn: Option<&Dn>,
        entry: T,
    ) -> DomainResult<()> {
        let dn = dn.ok_or_else(|| DomainError::validation("dn", "Entry has no DN"))?;
        let mut entries = self.entries.write();
        let table = table(&mut *entries);
        match table.get_mut(dn) {
            Some(slot) => {
                debug!("Replacing directory entry '{}'", dn);
                *slot = entry;
                Ok(())
            }
            None => Err(DomainError::ReferenceNotFound { dn: dn.to_string() }),
        }
    }

    fn remove<T>(
        &self,
        table: impl FnOnce(&mut Entries) -> &mut BTreeMap<Dn, T>,
        dn: Option<&Dn>,
    ) -> DomainResult<()> {
        let dn = dn.ok_or_else(|| DomainError::validation("dn", "Entry has no DN"))?;
        let mut entries = self.entries.write();
        match table(&mut *entries).remove(dn) {
            Some(_) => {
                debug!("Removed directory entry '{}'", dn);
                Ok(())
            }
            None => Err(DomainError::ReferenceNotFound { dn: dn.to_string() }),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new(crate::application::ports::DEFAULT_BASE_DN)
    }
}

impl DirectoryInfo for InMemoryDirectory {
    fn persistence_type(&self) -> PersistenceType {
        PersistenceType::InMemory
    }
}

#[async_trait]
impl ResourceRepository for InMemoryDirectory {
    async fn find_resource_by_id(&self, id: &str) -> DomainResult<UmaResource> {
        self.entries
            .read()
            .resources
            .get(&self.resource_dn(id))
            .cloned()
            .ok_or_else(|| DomainError::ResourceNotFound { id: id.to_string() })
    }

    async fn find_resources(&self, criteria: &SearchCriteria) -> DomainResult<Vec<UmaResource>> {
        Ok(self
            .entries
            .read()
            .resources
            .values()
            .filter(|r| {
                criteria.matches([
                    r.id.as_deref(),
                    r.name.as_deref(),
                    r.description.as_deref(),
                ])
            })
            .take(criteria.size)
            .cloned()
            .collect())
    }

    async fn list_resources(&self, max: usize) -> DomainResult<Vec<UmaResource>> {
        Ok(self
            .entries
            .read()
            .resources
            .values()
            .take(max)
            .cloned()
            .collect())
    }

    async fn add_resource(&self, resource: &UmaResource) -> DomainResult<()> {
        self.insert(|e| &mut e.resources, resource.dn.clone(), resource.clone())
    }

    async fn update_resource(&self, resource: &UmaResource) -> DomainResult<()> {
        self.replace(|e| &mut e.resources, resource.dn.as_ref(), resource.clone())
    }

    async fn remove_resource(&self, resource: &UmaResource) -> DomainResult<()> {
        self.remove(|e| &mut e.resources, resource.dn.as_ref())
    }

    async fn generate_inum_for_resource(&self) -> DomainResult<String> {
        Ok(generate_inum())
    }

    fn dn_for_resource(&self, id: &str) -> Dn {
        self.resource_dn(id)
    }
}

#[async_trait]
impl ScopeRepository for InMemoryDirectory {
    async fn find_scope_by_inum(&self, inum: &str) -> DomainResult<UmaScope> {
        self.entries
            .read()
            .scopes
            .get(&self.scope_dn(inum))
            .cloned()
            .ok_or_else(|| DomainError::ScopeNotFound {
                inum: inum.to_string(),
            })
    }

    async fn find_scope_by_dn(&self, dn: &Dn) -> DomainResult<UmaScope> {
        self.entries
            .read()
            .scopes
            .get(dn)
            .cloned()
            .ok_or_else(|| DomainError::ReferenceNotFound { dn: dn.to_string() })
    }

    async fn find_scopes(&self, criteria: &SearchCriteria) -> DomainResult<Vec<UmaScope>> {
        Ok(self
            .entries
            .read()
            .scopes
            .values()
            .filter(|s| {
                criteria.matches([
                    s.id.as_deref(),
                    s.display_name.as_deref(),
                    s.description.as_deref(),
                ])
            })
            .take(criteria.size)
            .cloned()
            .collect())
    }

    async fn list_scopes(&self, max: usize) -> DomainResult<Vec<UmaScope>> {
        Ok(self
            .entries
            .read()
            .scopes
            .values()
            .take(max)
            .cloned()
            .collect())
    }

    async fn add_scope(&self, scope: &UmaScope) -> DomainResult<()> {
        self.insert(|e| &mut e.scopes, scope.dn.clone(), scope.clone())
    }

    async fn update_scope(&self, scope: &UmaScope) -> DomainResult<()> {
        self.replace(|e| &mut e.scopes, scope.dn.as_ref(), scope.clone())
    }

    async fn remove_scope(&self, scope: &UmaScope) -> DomainResult<()> {
        self.remove(|e| &mut e.scopes, scope.dn.as_ref())
    }

    async fn generate_inum_for_scope(&self) -> DomainResult<String> {
        Ok(generate_inum())
    }

    fn dn_for_scope(&self, inum: &str) -> Dn {
        self.scope_dn(inum)
    }
}

#[async_trait]
impl ClientRepository for InMemoryDirectory {
    async fn find_client_by_inum(&self, inum: &str) -> DomainResult<Client> {
        self.entries
            .read()
            .clients
            .get(&self.client_dn(inum))
            .cloned()
            .ok_or_else(|| DomainError::ClientNotFound {
                inum: inum.to_string(),
            })
    }

    async fn find_client_by_dn(&self, dn: &Dn) -> DomainResult<Client> {
        self.entries
            .read()
            .clients
            .get(dn)
            .cloned()
            .ok_or_else(|| DomainError::ReferenceNotFound { dn: dn.to_string() })
    }

    fn dn_for_client(&self, inum: &str) -> Dn {
        self.client_dn(inum)
    }
}

#[async_trait]
impl ConfigurationRepository for InMemoryDirectory {
    async fn find_oxauth_config(&self) -> DomainResult<OxAuthConfig> {
        let entries = self.entries.read();
        let raw = entries
            .oxauth_config
            .as_deref()
            .ok_or_else(|| DomainError::ReferenceNotFound {
                dn: self.oxauth_config_dn().to_string(),
            })?;

        serde_json::from_str(raw).map_err(|e| {
            RepositoryError::SerializationFailed {
                message: format!("Stored oxAuth configuration is invalid: {e}"),
            }
            .into()
        })
    }

    async fn save_oxauth_config(&self, config: &OxAuthConfig) -> DomainResult<()> {
        let raw = serde_json::to_string(config).map_err(|e| {
            RepositoryError::SerializationFailed {
                message: e.to_string(),
            }
        })?;
        debug!("Replacing directory entry '{}'", self.oxauth_config_dn());
        self.entries.write().oxauth_config = Some(raw);
        Ok(())
    }

    fn dn_for_oxauth_config(&self) -> Dn {
        self.oxauth_config_dn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(directory: &InMemoryDirectory, id: &str) -> UmaResource {
        let mut resource = UmaResource::new(id).with_name(format!("Resource {id}"));
        resource.dn = Some(directory.dn_for_resource(id));
        resource.inum = Some(generate_inum());
        resource
    }

    #[test]
    fn naming_scheme_uses_base_dn() {
        let directory = InMemoryDirectory::new("o=example");
        assert_eq!(
            directory.dn_for_resource("r1").as_str(),
            "oxId=r1,ou=resources,ou=uma,o=example"
        );
        assert_eq!(directory.dn_for_scope("S1").as_str(), "inum=S1,ou=scopes,o=example");
        assert_eq!(directory.dn_for_client("C1").as_str(), "inum=C1,ou=clients,o=example");
    }

    #[tokio::test]
    async fn add_rejects_duplicate_dn() {
        let directory = InMemoryDirectory::default();
        let resource = stored(&directory, "r1");

        directory.add_resource(&resource).await.unwrap();
        let err = directory.add_resource(&resource).await.unwrap_err();

        assert!(matches!(err, DomainError::AlreadyExists { .. }));
        assert_eq!(directory.resource_count(), 1);
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let directory = InMemoryDirectory::default();
        let mut resource = stored(&directory, "r1").with_description("first");
        directory.add_resource(&resource).await.unwrap();

        resource.description = None;
        resource.clients.push(directory.dn_for_client("C1"));
        directory.update_resource(&resource).await.unwrap();

        let found = directory.find_resource_by_id("r1").await.unwrap();
        assert_eq!(found.description, None);
        assert_eq!(found.clients, vec![directory.dn_for_client("C1")]);
    }

    #[tokio::test]
    async fn update_of_missing_entry_is_not_found() {
        let directory = InMemoryDirectory::default();
        let err = directory
            .update_resource(&stored(&directory, "ghost"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_matches_substring_case_insensitively() {
        let directory = InMemoryDirectory::default();
        for id in ["photo-album", "Photo-Archive", "calendar"] {
            directory.add_resource(&stored(&directory, id)).await.unwrap();
        }

        let found = directory
            .find_resources(&SearchCriteria::new("PHOTO", 10))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        let limited = directory
            .find_resources(&SearchCriteria::new("photo", 1))
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn snapshot_derives_missing_dns() {
        let snapshot = DirectorySnapshot::from_json(
            r#"{
                "resources": [{"id": "r1", "name": "Photos", "scopes": ["inum=S1,ou=scopes,o=gluu"]}],
                "scopes": [{"inum": "S1", "displayName": "view"}],
                "clients": [{"inum": "C1", "displayName": "Gallery"}]
            }"#,
        )
        .unwrap();

        let directory = InMemoryDirectory::default().with_snapshot(snapshot).unwrap();
        assert_eq!(directory.resource_count(), 1);
        assert_eq!(directory.scope_count(), 1);

        let entries = directory.entries.read();
        let resource = entries.resources.values().next().unwrap();
        assert_eq!(
            resource.dn.as_ref().map(Dn::as_str),
            Some("oxId=r1,ou=resources,ou=uma,o=gluu")
        );
        assert!(resource.inum.is_some());
        assert!(entries
            .clients
            .contains_key(&Dn::new("inum=C1,ou=clients,o=gluu")));
    }

    #[test]
    fn snapshot_replaces_blank_ids_and_inums() {
        let snapshot = DirectorySnapshot::from_json(
            r#"{
                "resources": [{"id": "", "name": "Unnamed"}, {"id": "  "}],
                "scopes": [{"inum": "", "displayName": "view"}]
            }"#,
        )
        .unwrap();

        let directory = InMemoryDirectory::default().with_snapshot(snapshot).unwrap();
        assert_eq!(directory.resource_count(), 2);

        let entries = directory.entries.read();
        for resource in entries.resources.values() {
            assert!(!is_blank(resource.id.as_deref()));
            assert!(!resource.dn.as_ref().unwrap().as_str().starts_with("oxId=,"));
        }
        let scope = entries.scopes.values().next().unwrap();
        assert!(!is_blank(scope.inum.as_deref()));
        assert!(!scope.dn.as_ref().unwrap().as_str().starts_with("inum=,"));
    }

    #[tokio::test]
    async fn oxauth_config_is_missing_until_seeded_or_saved() {
        let directory = InMemoryDirectory::default();
        let err = directory.find_oxauth_config().await.unwrap_err();
        assert!(err.is_not_found());

        let config = OxAuthConfig::new("https://idp.example.org");
        directory.save_oxauth_config(&config).await.unwrap();
        assert_eq!(directory.find_oxauth_config().await.unwrap(), config);
    }

    #[tokio::test]
    async fn unreadable_stored_config_is_a_serialization_error() {
        let snapshot = DirectorySnapshot::from_json(r#"{"oxauthConfiguration": {"issuer": 42}}"#)
            .unwrap();
        let directory = InMemoryDirectory::default().with_snapshot(snapshot).unwrap();

        let err = directory.find_oxauth_config().await.unwrap_err();
        assert!(matches!(err, DomainError::Serialization { .. }));
    }

    #[test]
    fn malformed_snapshot_is_a_config_error() {
        let err = DirectorySnapshot::from_json("{\"resources\": 3}").unwrap_err();
        assert!(matches!(err, ConfigError::FileError { .. }));
    }
}
