use crate::{
    application::{
        ports::*,
        services::AuthorizationHelper,
    },
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Whether a reference is being attached to or detached from a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceEdit {
    Add,
    Remove,
}

/// Manages UMA resources and the client/scope references they carry.
///
/// Every mutation is a whole-record read-modify-write against the
/// directory: fetch, edit a local copy, replace, re-fetch. Nothing guards
/// the sequence, so two concurrent edits of the same resource are
/// last-write-wins and one of them can be lost.
pub struct ResourceManagementService {
    resources: Arc<dyn ResourceRepository>,
    scopes: Arc<dyn ScopeRepository>,
    clients: Arc<dyn ClientRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    auth_service: Arc<dyn AuthorizationService>,
    list_limit: usize,
}

impl ResourceManagementService {
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        scopes: Arc<dyn ScopeRepository>,
        clients: Arc<dyn ClientRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        auth_service: Arc<dyn AuthorizationService>,
    ) -> Self {
        Self {
            resources,
            scopes,
            clients,
            event_publisher,
            auth_service,
            list_limit: DEFAULT_RESOURCE_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub fn list_limit(&self) -> usize {
        self.list_limit
    }
}

#[async_trait]
impl AuthorizationHelper for ResourceManagementService {
    fn auth_service(&self) -> &Arc<dyn AuthorizationService> {
        &self.auth_service
    }
}

impl ResourceManagementService {
    /// List resources, capped at the configured list limit
    #[instrument(skip(self, context))]
    pub async fn list_resources(
        &self,
        context: &AuthorizationContext,
    ) -> DomainResult<Vec<UmaResource>> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::READ)
            .await?;

        info!("Listing UMA resources (limit {})", self.list_limit);

        let mut found = self.resources.list_resources(self.list_limit).await?;
        found.truncate(self.list_limit);

        info!("Found {} UMA resources", found.len());
        Ok(found)
    }

    /// Search resources whose attributes match `pattern`, returning at most `size` records
    #[instrument(skip(self, context), fields(pattern = %pattern, size = size))]
    pub async fn search_resources(
        &self,
        pattern: &str,
        size: usize,
        context: &AuthorizationContext,
    ) -> DomainResult<Vec<UmaResource>> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::READ)
            .await?;

        if size == 0 {
            return Err(DomainError::validation("size", "Size must be at least 1"));
        }

        info!(
            "Searching UMA resources with pattern '{}' and size {}",
            pattern, size
        );

        let mut found = self
            .resources
            .find_resources(&SearchCriteria::new(pattern, size))
            .await?;
        found.truncate(size);

        info!("Search matched {} UMA resources", found.len());
        Ok(found)
    }

    /// Get a resource by its external id
    #[instrument(skip(self, context), fields(id = %id))]
    pub async fn get_resource(
        &self,
        id: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::READ)
            .await?;

        require_non_blank("id", id)?;
        info!("Getting UMA resource '{}'", id);

        self.resources.find_resource_by_id(id).await
    }

    /// Resolve the client references of a resource, in stored order
    #[instrument(skip(self, context), fields(id = %id))]
    pub async fn get_resource_clients(
        &self,
        id: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<Vec<Client>> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::READ)
            .await?;

        require_non_blank("id", id)?;
        info!("Getting clients of UMA resource '{}'", id);

        let resource = self.resources.find_resource_by_id(id).await?;
        let mut clients = Vec::with_capacity(resource.clients.len());
        for dn in &resource.clients {
            match self.clients.find_client_by_dn(dn).await {
                Ok(client) => clients.push(client),
                Err(e) if e.is_not_found() => {
                    warn!("UMA resource '{}' references missing client '{}'", id, dn);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(clients)
    }

    /// Resolve the scope references of a resource, in stored order
    #[instrument(skip(self, context), fields(id = %id))]
    pub async fn get_resource_scopes(
        &self,
        id: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<Vec<UmaScope>> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::READ)
            .await?;

        require_non_blank("id", id)?;
        info!("Getting scopes of UMA resource '{}'", id);

        let resource = self.resources.find_resource_by_id(id).await?;
        let mut scopes = Vec::with_capacity(resource.scopes.len());
        for dn in &resource.scopes {
            match self.scopes.find_scope_by_dn(dn).await {
                Ok(scope) => scopes.push(scope),
                Err(e) if e.is_not_found() => {
                    warn!("UMA resource '{}' references missing scope '{}'", id, dn);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(scopes)
    }

    pub async fn add_client(
        &self,
        id: &str,
        client_inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.edit_references(id, ReferenceSet::Clients, ReferenceEdit::Add, client_inum, context)
            .await
    }

    pub async fn remove_client(
        &self,
        id: &str,
        client_inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.edit_references(id, ReferenceSet::Clients, ReferenceEdit::Remove, client_inum, context)
            .await
    }

    pub async fn add_scope(
        &self,
        id: &str,
        scope_inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.edit_references(id, ReferenceSet::Scopes, ReferenceEdit::Add, scope_inum, context)
            .await
    }

    pub async fn remove_scope(
        &self,
        id: &str,
        scope_inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.edit_references(id, ReferenceSet::Scopes, ReferenceEdit::Remove, scope_inum, context)
            .await
    }

    /// Add or remove one client/scope reference on a resource.
    ///
    /// Adding never deduplicates. Removing drops the first matching entry
    /// and is a no-op when nothing matches. The returned record is re-read
    /// from the directory after the write.
    #[instrument(skip(self, context), fields(id = %id, set = %set, inum = %member_inum))]
    pub async fn edit_references(
        &self,
        id: &str,
        set: ReferenceSet,
        edit: ReferenceEdit,
        member_inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::WRITE)
            .await?;

        require_non_blank("id", id)?;
        require_non_blank("inum", member_inum)?;

        info!("{:?} {} reference '{}' on UMA resource '{}'", edit, set, member_inum, id);

        let mut resource = self.resources.find_resource_by_id(id).await?;
        let reference = self.resolve_reference(set, member_inum).await?;

        match edit {
            ReferenceEdit::Add => resource.add_reference(set, reference.clone()),
            ReferenceEdit::Remove => {
                if !resource.remove_reference(set, &reference) {
                    debug!(
                        "Reference '{}' not present in {} of UMA resource '{}'",
                        reference, set, id
                    );
                }
            }
        }

        self.resources.update_resource(&resource).await?;
        let refreshed = self.resources.find_resource_by_id(id).await?;

        let event_type = match (set, edit) {
            (ReferenceSet::Clients, ReferenceEdit::Add) => EventType::ResourceClientAdded,
            (ReferenceSet::Clients, ReferenceEdit::Remove) => EventType::ResourceClientRemoved,
            (ReferenceSet::Scopes, ReferenceEdit::Add) => EventType::ResourceScopeAdded,
            (ReferenceSet::Scopes, ReferenceEdit::Remove) => EventType::ResourceScopeRemoved,
        };
        let event = DomainEvent::resource_reference_changed(
            event_type,
            id.to_string(),
            reference.to_string(),
            refreshed.references(set).len(),
        );
        self.publish(event, context).await;

        Ok(refreshed)
    }

    /// Confirm the member exists, then compute its canonical reference
    async fn resolve_reference(&self, set: ReferenceSet, inum: &str) -> DomainResult<Dn> {
        match set {
            ReferenceSet::Clients => {
                self.clients.find_client_by_inum(inum).await?;
                Ok(self.clients.dn_for_client(inum))
            }
            ReferenceSet::Scopes => {
                self.scopes.find_scope_by_inum(inum).await?;
                Ok(self.scopes.dn_for_scope(inum))
            }
        }
    }

    /// Create a resource; a missing id is generated, inum and dn always are
    #[instrument(skip(self, resource, context), fields(id = ?resource.id))]
    pub async fn create_resource(
        &self,
        mut resource: UmaResource,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::WRITE)
            .await?;

        let id = match resource.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => generate_external_id(),
        };

        info!("Creating UMA resource '{}'", id);

        let inum = self.resources.generate_inum_for_resource().await?;
        let dn = self.resources.dn_for_resource(&id);
        resource.id = Some(id.clone());
        resource.inum = Some(inum.clone());
        resource.dn = Some(dn.clone());

        self.resources.add_resource(&resource).await?;
        let created = self.resources.find_resource_by_id(&id).await?;

        self.publish(
            DomainEvent::resource_created(id.clone(), inum, dn.to_string()),
            context,
        )
        .await;

        info!("Created UMA resource '{}' at '{}'", id, dn);
        Ok(created)
    }

    /// Replace an existing resource as a whole; the id in the payload selects it
    #[instrument(skip(self, resource, context), fields(id = ?resource.id))]
    pub async fn update_resource(
        &self,
        mut resource: UmaResource,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaResource> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::WRITE)
            .await?;

        let id = resource
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| DomainError::validation("id", "Resource id is required"))?;

        info!("Updating UMA resource '{}'", id);

        let existing = self.resources.find_resource_by_id(&id).await?;

        let dn = self.resources.dn_for_resource(&id);
        resource.dn = Some(dn.clone());
        resource.inum = existing.inum;

        self.resources.update_resource(&resource).await?;
        let updated = self.resources.find_resource_by_id(&id).await?;

        self.publish(
            DomainEvent::new(
                EventType::ResourceUpdated,
                id.clone(),
                AggregateType::Resource,
                EventData::ResourceUpdated { dn: dn.to_string() },
            ),
            context,
        )
        .await;

        info!("Updated UMA resource '{}'", id);
        Ok(updated)
    }

    #[instrument(skip(self, context), fields(id = %id))]
    pub async fn delete_resource(
        &self,
        id: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<()> {
        self.check_permission(context, resources::UMA_RESOURCES, actions::WRITE)
            .await?;

        require_non_blank("id", id)?;
        info!("Deleting UMA resource '{}'", id);

        let resource = self.resources.find_resource_by_id(id).await?;
        self.resources.remove_resource(&resource).await?;

        let dn = resource
            .dn
            .map(|dn| dn.to_string())
            .unwrap_or_else(|| self.resources.dn_for_resource(id).to_string());
        self.publish(
            DomainEvent::new(
                EventType::ResourceDeleted,
                id.to_string(),
                AggregateType::Resource,
                EventData::ResourceDeleted { dn },
            ),
            context,
        )
        .await;

        info!("Deleted UMA resource '{}'", id);
        Ok(())
    }

    async fn publish(&self, event: DomainEvent, context: &AuthorizationContext) {
        let event = event.with_metadata(event_metadata(context));
        let event_type = event.event_type.clone();
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!("Failed to publish {} event: {}", event_type, e);
        }
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, &format!("{field} should not be blank")));
    }
    Ok(())
}

pub(crate) fn event_metadata(context: &AuthorizationContext) -> EventMetadata {
    let mut metadata = EventMetadata::new();
    if let Some(ref subject) = context.subject {
        metadata = metadata.with_subject(subject.clone());
    }
    if let Some(ref request_id) = context.request_id {
        metadata = metadata.with_request_id(request_id.clone());
    }
    metadata
}
