use crate::config::Config;
use std::sync::Arc;
use tracing::info;
use uma_domain::{
    application::{
        ports::{
            AuthorizationService, ClientRepository, ConfigurationRepository, DirectoryInfo,
            EventPublisher, ResourceRepository, ScopeRepository,
        },
        services::{
            ConfigurationService, DirectoryService, ResourceManagementService,
            ScopeManagementService,
        },
    },
    infrastructure::adapters::{
        ChannelEventPublisher, DirectorySnapshot, EventStream, InMemoryDirectory,
        ScopeAuthorizationService,
    },
    DomainResult,
};

/// The directory ports the services are built on
#[derive(Clone)]
pub struct DirectoryPorts {
    pub resources: Arc<dyn ResourceRepository>,
    pub scopes: Arc<dyn ScopeRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub configuration: Arc<dyn ConfigurationRepository>,
    pub info: Arc<dyn DirectoryInfo>,
}

impl DirectoryPorts {
    /// Serve every port from one adapter
    pub fn from_adapter<D>(directory: Arc<D>) -> Self
    where
        D: ResourceRepository
            + ScopeRepository
            + ClientRepository
            + ConfigurationRepository
            + DirectoryInfo
            + 'static,
    {
        Self {
            resources: directory.clone(),
            scopes: directory.clone(),
            clients: directory.clone(),
            configuration: directory.clone(),
            info: directory,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resource_service: Arc<ResourceManagementService>,
    pub scope_service: Arc<ScopeManagementService>,
    pub configuration_service: Arc<ConfigurationService>,
    pub directory_service: DirectoryService,
}

impl AppState {
    pub fn new(
        config: Config,
        directory: DirectoryPorts,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        let auth_service: Arc<dyn AuthorizationService> = Arc::new(ScopeAuthorizationService::new());

        let resource_service = ResourceManagementService::new(
            directory.resources,
            directory.scopes.clone(),
            directory.clients,
            event_publisher.clone(),
            auth_service.clone(),
        )
        .with_list_limit(config.directory.resource_list_limit);

        let scope_service = ScopeManagementService::new(
            directory.scopes,
            event_publisher.clone(),
            auth_service.clone(),
        )
        .with_list_limit(config.directory.scope_list_limit);

        let configuration_service =
            ConfigurationService::new(directory.configuration, event_publisher, auth_service);

        Self {
            config: Arc::new(config),
            resource_service: Arc::new(resource_service),
            scope_service: Arc::new(scope_service),
            configuration_service: Arc::new(configuration_service),
            directory_service: DirectoryService::new(directory.info),
        }
    }

    /// Build the state from configuration: an in-memory directory, seeded
    /// when a snapshot file is configured, and a channel-backed publisher.
    pub fn from_config(config: Config) -> DomainResult<(Self, EventStream)> {
        let mut directory = InMemoryDirectory::new(config.directory.base_dn.clone());
        if let Some(ref path) = config.directory.seed_file {
            info!("Seeding directory from {}", path.display());
            directory = directory.with_snapshot(DirectorySnapshot::load(path)?)?;
        }

        let (publisher, events) = ChannelEventPublisher::channel();
        let directory = DirectoryPorts::from_adapter(Arc::new(directory));
        let state = Self::new(config, directory, Arc::new(publisher));
        Ok((state, events))
    }
}
