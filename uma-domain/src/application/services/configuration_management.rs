use crate::{
    application::{
        ports::*,
        services::{resource_management::event_metadata, AuthorizationHelper},
    },
    domain::{entities::OxAuthConfig, errors::DomainResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reads and replaces the oxAuth dynamic configuration
pub struct ConfigurationService {
    configuration: Arc<dyn ConfigurationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    auth_service: Arc<dyn AuthorizationService>,
}

impl ConfigurationService {
    pub fn new(
        configuration: Arc<dyn ConfigurationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        auth_service: Arc<dyn AuthorizationService>,
    ) -> Self {
        Self {
            configuration,
            event_publisher,
            auth_service,
        }
    }
}

#[async_trait]
impl AuthorizationHelper for ConfigurationService {
    fn auth_service(&self) -> &Arc<dyn AuthorizationService> {
        &self.auth_service
    }
}

impl ConfigurationService {
    #[instrument(skip(self, context))]
    pub async fn get_oxauth_config(
        &self,
        context: &AuthorizationContext,
    ) -> DomainResult<OxAuthConfig> {
        self.check_permission(context, resources::OXAUTH_CONFIGURATION, actions::READ)
            .await?;

        info!("Reading oxAuth configuration");
        self.configuration.find_oxauth_config().await
    }

    /// Validate and store `config`, then return the stored document
    #[instrument(skip(self, config, context), fields(issuer = %config.issuer))]
    pub async fn update_oxauth_config(
        &self,
        config: OxAuthConfig,
        context: &AuthorizationContext,
    ) -> DomainResult<OxAuthConfig> {
        self.check_permission(context, resources::OXAUTH_CONFIGURATION, actions::WRITE)
            .await?;

        config.validate()?;
        info!("Updating oxAuth configuration");

        self.configuration.save_oxauth_config(&config).await?;
        let stored = self.configuration.find_oxauth_config().await?;

        let dn = self.configuration.dn_for_oxauth_config();
        let event = DomainEvent::new(
            EventType::OxAuthConfigurationUpdated,
            dn.to_string(),
            AggregateType::Configuration,
            EventData::ConfigurationUpdated { dn: dn.to_string() },
        )
        .with_metadata(event_metadata(context));
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!("Failed to publish OxAuthConfigurationUpdated event: {}", e);
        }

        Ok(stored)
    }
}
