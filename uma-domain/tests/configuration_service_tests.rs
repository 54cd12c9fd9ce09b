use serde_json::json;
use std::sync::Arc;
use uma_domain::{
    application::{
        ports::{
            auth::AuthorizationContext,
            events::{AggregateType, EventType},
            repository::ConfigurationRepository,
        },
        services::ConfigurationService,
    },
    domain::{entities::*, errors::DomainError},
    infrastructure::adapters::ScopeAuthorizationService,
};

mod mocks;
use mocks::{ctx, FailingDirectory, MockAuthorizationService, MockEventPublisher, TestHarness};

/// Harness whose directory already holds an oxAuth configuration entry
async fn provisioned() -> TestHarness {
    let harness = TestHarness::new();
    let config: OxAuthConfig = serde_json::from_value(json!({
        "issuer": "https://idp.example.org",
        "sessionStorageType": "in-memory",
        "dynamicRegistrationEnabled": true
    }))
    .unwrap();
    harness.directory.save_oxauth_config(&config).await.unwrap();
    harness
}

#[tokio::test]
async fn get_returns_stored_document() {
    let harness = provisioned().await;

    let config = harness.configuration.get_oxauth_config(&ctx()).await.unwrap();

    assert_eq!(config.issuer, "https://idp.example.org");
    assert_eq!(config.session_storage_type, Some(SessionStorageType::InMemory));
    assert_eq!(config.other["dynamicRegistrationEnabled"], true);
}

#[tokio::test]
async fn get_without_stored_document_is_not_found() {
    let harness = TestHarness::new();

    let err = harness
        .configuration
        .get_oxauth_config(&ctx())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_replaces_and_returns_stored_document() {
    let harness = provisioned().await;
    let replacement = OxAuthConfig {
        session_id_lifetime: Some(86400),
        session_storage_type: Some(SessionStorageType::Redis),
        ..OxAuthConfig::new("https://login.example.org")
    };

    let stored = harness
        .configuration
        .update_oxauth_config(replacement.clone(), &ctx())
        .await
        .unwrap();

    assert_eq!(stored, replacement);
    assert!(stored.other.is_empty());

    let event = harness.events.published().pop().unwrap();
    assert_eq!(event.event_type, EventType::OxAuthConfigurationUpdated);
    assert_eq!(event.aggregate_type, AggregateType::Configuration);
    assert_eq!(
        event.aggregate_id,
        harness.directory.dn_for_oxauth_config().to_string()
    );
}

#[tokio::test]
async fn invalid_update_is_rejected_and_nothing_is_stored() {
    let harness = provisioned().await;
    let invalid = OxAuthConfig {
        token_endpoint: Some("not a url".to_string()),
        ..OxAuthConfig::new("https://login.example.org")
    };

    let err = harness
        .configuration
        .update_oxauth_config(invalid, &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let current = harness.configuration.get_oxauth_config(&ctx()).await.unwrap();
    assert_eq!(current.issuer, "https://idp.example.org");
    assert!(harness.events.published().is_empty());
}

#[tokio::test]
async fn read_only_context_cannot_update() {
    let harness = TestHarness::with_auth(Arc::new(ScopeAuthorizationService::new()));

    let err = harness
        .configuration
        .update_oxauth_config(
            OxAuthConfig::new("https://idp.example.org"),
            &AuthorizationContext::read_only(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::AuthorizationFailed { ref permission, .. }
            if permission == "oxauth_configuration:write"
    ));
}

#[tokio::test]
async fn backend_failures_propagate() {
    let service = ConfigurationService::new(
        Arc::new(FailingDirectory),
        Arc::new(MockEventPublisher::new()),
        Arc::new(MockAuthorizationService::allow_all()),
    );

    let err = service.get_oxauth_config(&ctx()).await.unwrap_err();

    assert!(matches!(err, DomainError::ExternalService { .. }));
}
