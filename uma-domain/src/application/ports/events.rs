use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event publisher port for domain events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventError>;
}

/// Something that happened to a directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: String,
    pub event_type: EventType,
    pub aggregate_id: String,
    pub aggregate_type: AggregateType,
    pub timestamp: DateTime<Utc>,
    pub metadata: EventMetadata,
    pub data: EventData,
}

impl DomainEvent {
    pub fn new(
        event_type: EventType,
        aggregate_id: String,
        aggregate_type: AggregateType,
        data: EventData,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
            aggregate_id,
            aggregate_type,
            timestamp: Utc::now(),
            metadata: EventMetadata::default(),
            data,
        }
    }

    pub fn with_metadata(mut self, metadata: EventMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn resource_created(id: String, inum: String, dn: String) -> Self {
        Self::new(
            EventType::ResourceCreated,
            id,
            AggregateType::Resource,
            EventData::ResourceCreated { inum, dn },
        )
    }

    pub fn resource_reference_changed(
        event_type: EventType,
        id: String,
        reference: String,
        count: usize,
    ) -> Self {
        Self::new(
            event_type,
            id,
            AggregateType::Resource,
            EventData::ReferenceChanged { reference, count },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventType {
    ResourceCreated,
    ResourceUpdated,
    ResourceDeleted,
    ResourceClientAdded,
    ResourceClientRemoved,
    ResourceScopeAdded,
    ResourceScopeRemoved,

    ScopeCreated,
    ScopeUpdated,
    ScopeDeleted,

    OxAuthConfigurationUpdated,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::ResourceCreated => "ResourceCreated",
            EventType::ResourceUpdated => "ResourceUpdated",
            EventType::ResourceDeleted => "ResourceDeleted",
            EventType::ResourceClientAdded => "ResourceClientAdded",
            EventType::ResourceClientRemoved => "ResourceClientRemoved",
            EventType::ResourceScopeAdded => "ResourceScopeAdded",
            EventType::ResourceScopeRemoved => "ResourceScopeRemoved",
            EventType::ScopeCreated => "ScopeCreated",
            EventType::ScopeUpdated => "ScopeUpdated",
            EventType::ScopeDeleted => "ScopeDeleted",
            EventType::OxAuthConfigurationUpdated => "OxAuthConfigurationUpdated",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AggregateType {
    Resource,
    Scope,
    Configuration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventMetadata {
    pub subject: Option<String>,
    pub request_id: Option<String>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: String) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// Event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventData {
    ResourceCreated { inum: String, dn: String },
    ResourceUpdated { dn: String },
    ResourceDeleted { dn: String },
    /// A client or scope reference was added to or removed from a resource;
    /// `count` is the collection length after the write.
    ReferenceChanged { reference: String, count: usize },
    ScopeCreated { inum: String, display_name: Option<String> },
    ScopeUpdated { inum: String },
    ScopeDeleted { inum: String },
    ConfigurationUpdated { dn: String },
}

/// Event processing errors
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event publishing failed: {message}")]
    PublishFailed { message: String },
}
