use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// Repository port for UMA resources stored in the directory.
///
/// Lookups report a missing record as `DomainError::ResourceNotFound`, so
/// callers can tell "no such record" apart from a failing backend.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_resource_by_id(&self, id: &str) -> DomainResult<UmaResource>;
    async fn find_resources(&self, criteria: &SearchCriteria) -> DomainResult<Vec<UmaResource>>;
    async fn list_resources(&self, max: usize) -> DomainResult<Vec<UmaResource>>;
    async fn add_resource(&self, resource: &UmaResource) -> DomainResult<()>;
    /// Replace the stored record addressed by `resource.dn` as a whole
    async fn update_resource(&self, resource: &UmaResource) -> DomainResult<()>;
    async fn remove_resource(&self, resource: &UmaResource) -> DomainResult<()>;

    async fn generate_inum_for_resource(&self) -> DomainResult<String>;
    /// Naming scheme: the record location of a resource is a pure function of its id
    fn dn_for_resource(&self, id: &str) -> Dn;
}

/// Repository port for UMA scope descriptions
#[async_trait]
pub trait ScopeRepository: Send + Sync {
    async fn find_scope_by_inum(&self, inum: &str) -> DomainResult<UmaScope>;
    async fn find_scope_by_dn(&self, dn: &Dn) -> DomainResult<UmaScope>;
    async fn find_scopes(&self, criteria: &SearchCriteria) -> DomainResult<Vec<UmaScope>>;
    async fn list_scopes(&self, max: usize) -> DomainResult<Vec<UmaScope>>;
    async fn add_scope(&self, scope: &UmaScope) -> DomainResult<()>;
    async fn update_scope(&self, scope: &UmaScope) -> DomainResult<()>;
    async fn remove_scope(&self, scope: &UmaScope) -> DomainResult<()>;

    async fn generate_inum_for_scope(&self) -> DomainResult<String>;
    fn dn_for_scope(&self, inum: &str) -> Dn;
}

/// Read-only repository port for OAuth clients
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_client_by_inum(&self, inum: &str) -> DomainResult<Client>;
    async fn find_client_by_dn(&self, dn: &Dn) -> DomainResult<Client>;
    fn dn_for_client(&self, inum: &str) -> Dn;
}

/// Repository port for the oxAuth dynamic configuration entry.
///
/// The entry always exists in a provisioned directory; a missing one is
/// reported as `DomainError::ReferenceNotFound`.
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    async fn find_oxauth_config(&self) -> DomainResult<OxAuthConfig>;
    /// Replace the stored document as a whole
    async fn save_oxauth_config(&self, config: &OxAuthConfig) -> DomainResult<()>;
    fn dn_for_oxauth_config(&self) -> Dn;
}

/// Information about the storage backend behind the directory ports
pub trait DirectoryInfo: Send + Sync {
    fn persistence_type(&self) -> PersistenceType;
}
