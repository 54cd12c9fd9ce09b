use crate::{
    application::{
        ports::*,
        services::{
            resource_management::{event_metadata, require_non_blank},
            AuthorizationHelper,
        },
    },
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// UMA scope description management
pub struct ScopeManagementService {
    scopes: Arc<dyn ScopeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    auth_service: Arc<dyn AuthorizationService>,
    list_limit: usize,
}

impl ScopeManagementService {
    pub fn new(
        scopes: Arc<dyn ScopeRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        auth_service: Arc<dyn AuthorizationService>,
    ) -> Self {
        Self {
            scopes,
            event_publisher,
            auth_service,
            list_limit: DEFAULT_SCOPE_LIST_LIMIT,
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
impl AuthorizationHelper for ScopeManagementService {
    fn auth_service(&self) -> &Arc<dyn AuthorizationService> {
        &self.auth_service
    }
}

impl ScopeManagementService {
    #[instrument(skip(self, context))]
    pub async fn list_scopes(&self, context: &AuthorizationContext) -> DomainResult<Vec<UmaScope>> {
        self.check_permission(context, resources::UMA_SCOPES, actions::READ)
            .await?;

        info!("Listing UMA scopes (limit {})", self.list_limit);

        let mut scopes = self.scopes.list_scopes(self.list_limit).await?;
        scopes.truncate(self.list_limit);

        info!("Found {} UMA scopes", scopes.len());
        Ok(scopes)
    }

    /// Search scopes by pattern. `size` defaults to, and is capped at, the list limit.
    #[instrument(skip(self, context), fields(pattern = %pattern))]
    pub async fn search_scopes(
        &self,
        pattern: &str,
        size: Option<usize>,
        context: &AuthorizationContext,
    ) -> DomainResult<Vec<UmaScope>> {
        self.check_permission(context, resources::UMA_SCOPES, actions::READ)
            .await?;

        let size = match size {
            Some(0) => return Err(DomainError::validation("size", "Size must be at least 1")),
            Some(size) => size.min(self.list_limit),
            None => self.list_limit,
        };

        info!("Searching UMA scopes with pattern '{}' and size {}", pattern, size);

        let mut scopes = self
            .scopes
            .find_scopes(&SearchCriteria::new(pattern, size))
            .await?;
        scopes.truncate(size);

        Ok(scopes)
    }

    #[instrument(skip(self, context), fields(inum = %inum))]
    pub async fn get_scope(
        &self,
        inum: &str,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaScope> {
        self.check_permission(context, resources::UMA_SCOPES, actions::READ)
            .await?;

        require_non_blank("inum", inum)?;
        info!("Getting UMA scope '{}'", inum);

        self.scopes.find_scope_by_inum(inum).await
    }

    /// Create a scope; inum and dn are always server-generated
    #[instrument(skip(self, scope, context))]
    pub async fn create_scope(
        &self,
        mut scope: UmaScope,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaScope> {
        self.check_permission(context, resources::UMA_SCOPES, actions::WRITE)
            .await?;

        let inum = self.scopes.generate_inum_for_scope().await?;
        let dn = self.scopes.dn_for_scope(&inum);
        info!("Creating UMA scope '{}' at '{}'", inum, dn);

        scope.inum = Some(inum.clone());
        scope.dn = Some(dn);

        self.scopes.add_scope(&scope).await?;
        let created = self.scopes.find_scope_by_inum(&inum).await?;

        self.publish(
            DomainEvent::new(
                EventType::ScopeCreated,
                inum.clone(),
                AggregateType::Scope,
                EventData::ScopeCreated {
                    inum: inum.clone(),
                    display_name: created.display_name.clone(),
                },
            ),
            context,
        )
        .await;

        info!("Created UMA scope '{}'", inum);
        Ok(created)
    }

    /// Replace an existing scope as a whole; the inum in the payload selects it
    #[instrument(skip(self, scope, context), fields(inum = ?scope.inum))]
    pub async fn update_scope(
        &self,
        mut scope: UmaScope,
        context: &AuthorizationContext,
    ) -> DomainResult<UmaScope> {
        self.check_permission(context, resources::UMA_SCOPES, actions::WRITE)
            .await?;

        let inum = scope
            .inum
            .clone()
            .filter(|inum| !inum.trim().is_empty())
            .ok_or_else(|| DomainError::validation("inum", "Scope inum is required"))?;

        info!("Updating UMA scope '{}'", inum);

        self.scopes.find_scope_by_inum(&inum).await?;
        scope.dn = Some(self.scopes.dn_for_scope(&inum));

        self.scopes.update_scope(&scope).await?;
        let updated = self.scopes.find_scope_by_inum(&inum).await?;

        self.publish(
            DomainEvent::new(
                EventType::ScopeUpdated,
                inum.clone(),
                AggregateType::Scope,
                EventData::ScopeUpdated { inum: inum.clone() },
            ),
            context,
        )
        .await;

        Ok(updated)
    }

    #[instrument(skip(self, context), fields(inum = %inum))]
    pub async fn delete_scope(&self, inum: &str, context: &AuthorizationContext) -> DomainResult<()> {
        self.check_permission(context, resources::UMA_SCOPES, actions::WRITE)
            .await?;

        require_non_blank("inum", inum)?;
        info!("Deleting UMA scope '{}'", inum);

        let scope = self.scopes.find_scope_by_inum(inum).await?;
        self.scopes.remove_scope(&scope).await?;

        self.publish(
            DomainEvent::new(
                EventType::ScopeDeleted,
                inum.to_string(),
                AggregateType::Scope,
                EventData::ScopeDeleted {
                    inum: inum.to_string(),
                },
            ),
            context,
        )
        .await;

        info!("Deleted UMA scope '{}'", inum);
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
