#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uma_domain::{
    application::{
        ports::{
            auth::{AuthorizationContext, AuthorizationService},
            events::{DomainEvent, EventError, EventPublisher, EventType},
            repository::{
                ClientRepository, ConfigurationRepository, ResourceRepository, ScopeRepository,
            },
        },
        services::{ConfigurationService, ResourceManagementService, ScopeManagementService},
    },
    domain::{
        entities::*,
        errors::{AuthError, DomainError, DomainResult},
    },
    infrastructure::adapters::InMemoryDirectory,
};

/// Event publisher that records everything it is handed
#[derive(Default)]
pub struct MockEventPublisher {
    pub events: Arc<Mutex<Vec<DomainEvent>>>,
    pub should_fail: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publisher whose every publish fails
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_types(&self) -> Vec<EventType> {
        self.published()
            .into_iter()
            .map(|event| event.event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventError> {
        if self.should_fail {
            return Err(EventError::PublishFailed {
                message: "Mock publisher failure".to_string(),
            });
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Authorization service with a fixed answer
pub struct MockAuthorizationService {
    pub allow: bool,
}

impl MockAuthorizationService {
    pub fn allow_all() -> Self {
        Self { allow: true }
    }

    pub fn deny_all() -> Self {
        Self { allow: false }
    }
}

#[async_trait]
impl AuthorizationService for MockAuthorizationService {
    async fn check_permission(
        &self,
        _context: &AuthorizationContext,
        _resource: &str,
        _action: &str,
    ) -> Result<bool, AuthError> {
        Ok(self.allow)
    }
}

/// Directory whose every call fails as an unreachable backend would
pub struct FailingDirectory;

fn backend_down<T>() -> DomainResult<T> {
    Err(DomainError::ExternalService {
        service: "directory".to_string(),
        message: "connection refused".to_string(),
    })
}

#[async_trait]
impl ResourceRepository for FailingDirectory {
    async fn find_resource_by_id(&self, _id: &str) -> DomainResult<UmaResource> {
        backend_down()
    }

    async fn find_resources(&self, _criteria: &SearchCriteria) -> DomainResult<Vec<UmaResource>> {
        backend_down()
    }

    async fn list_resources(&self, _max: usize) -> DomainResult<Vec<UmaResource>> {
        backend_down()
    }

    async fn add_resource(&self, _resource: &UmaResource) -> DomainResult<()> {
        backend_down()
    }

    async fn update_resource(&self, _resource: &UmaResource) -> DomainResult<()> {
        backend_down()
    }

    async fn remove_resource(&self, _resource: &UmaResource) -> DomainResult<()> {
        backend_down()
    }

    async fn generate_inum_for_resource(&self) -> DomainResult<String> {
        backend_down()
    }

    fn dn_for_resource(&self, id: &str) -> Dn {
        Dn::new(format!("oxId={id},ou=resources,ou=uma,o=gluu"))
    }
}

#[async_trait]
impl ScopeRepository for FailingDirectory {
    async fn find_scope_by_inum(&self, _inum: &str) -> DomainResult<UmaScope> {
        backend_down()
    }

    async fn find_scope_by_dn(&self, _dn: &Dn) -> DomainResult<UmaScope> {
        backend_down()
    }

    async fn find_scopes(&self, _criteria: &SearchCriteria) -> DomainResult<Vec<UmaScope>> {
        backend_down()
    }

    async fn list_scopes(&self, _max: usize) -> DomainResult<Vec<UmaScope>> {
        backend_down()
    }

    async fn add_scope(&self, _scope: &UmaScope) -> DomainResult<()> {
        backend_down()
    }

    async fn update_scope(&self, _scope: &UmaScope) -> DomainResult<()> {
        backend_down()
    }

    async fn remove_scope(&self, _scope: &UmaScope) -> DomainResult<()> {
        backend_down()
    }

    async fn generate_inum_for_scope(&self) -> DomainResult<String> {
        backend_down()
    }

    fn dn_for_scope(&self, inum: &str) -> Dn {
        Dn::new(format!("inum={inum},ou=scopes,o=gluu"))
    }
}

#[async_trait]
impl ClientRepository for FailingDirectory {
    async fn find_client_by_inum(&self, _inum: &str) -> DomainResult<Client> {
        backend_down()
    }

    async fn find_client_by_dn(&self, _dn: &Dn) -> DomainResult<Client> {
        backend_down()
    }

    fn dn_for_client(&self, inum: &str) -> Dn {
        Dn::new(format!("inum={inum},ou=clients,o=gluu"))
    }
}

#[async_trait]
impl ConfigurationRepository for FailingDirectory {
    async fn find_oxauth_config(&self) -> DomainResult<OxAuthConfig> {
        backend_down()
    }

    async fn save_oxauth_config(&self, _config: &OxAuthConfig) -> DomainResult<()> {
        backend_down()
    }

    fn dn_for_oxauth_config(&self) -> Dn {
        Dn::new("ou=oxauth,ou=configuration,o=gluu")
    }
}

/// Services wired against a fresh in-memory directory
pub struct TestHarness {
    pub directory: Arc<InMemoryDirectory>,
    pub events: Arc<MockEventPublisher>,
    pub resources: ResourceManagementService,
    pub scopes: ScopeManagementService,
    pub configuration: ConfigurationService,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_auth(Arc::new(MockAuthorizationService::allow_all()))
    }

    pub fn with_auth(auth: Arc<dyn AuthorizationService>) -> Self {
        let directory = Arc::new(InMemoryDirectory::default());
        let events = Arc::new(MockEventPublisher::new());

        let resources = ResourceManagementService::new(
            directory.clone(),
            directory.clone(),
            directory.clone(),
            events.clone(),
            auth.clone(),
        );
        let scopes = ScopeManagementService::new(directory.clone(), events.clone(), auth.clone());
        let configuration = ConfigurationService::new(directory.clone(), events.clone(), auth);

        Self {
            directory,
            events,
            resources,
            scopes,
            configuration,
        }
    }

    /// Register a client directly in the directory
    pub fn seed_client(&self, inum: &str) -> Dn {
        self.directory
            .insert_client(Client::new(inum).with_display_name(format!("Client {inum}")))
    }

    /// Create a scope through the service and return its generated inum
    pub async fn seed_scope(&self, display_name: &str) -> String {
        let scope = self
            .scopes
            .create_scope(UmaScope::new(display_name), &ctx())
            .await
            .unwrap();
        scope.inum.unwrap()
    }
}

pub fn ctx() -> AuthorizationContext {
    AuthorizationContext::full_access().with_subject("test-admin")
}
