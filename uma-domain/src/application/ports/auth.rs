use crate::domain::errors::AuthError;
use async_trait::async_trait;

/// Access scopes granted to API callers
pub mod access_scopes {
    pub const READ_ACCESS: &str = "oxtrust-api-read";
    pub const WRITE_ACCESS: &str = "oxtrust-api-write";
}

/// Action definitions for authorization
pub mod actions {
    pub const READ: &str = "read";
    pub const WRITE: &str = "write";
}

/// Resource definitions for authorization
pub mod resources {
    pub const UMA_RESOURCES: &str = "uma_resources";
    pub const UMA_SCOPES: &str = "uma_scopes";
    pub const OXAUTH_CONFIGURATION: &str = "oxauth_configuration";
}

/// Who is calling and which access scopes the caller holds
#[derive(Debug, Clone, Default)]
pub struct AuthorizationContext {
    pub subject: Option<String>,
    pub request_id: Option<String>,
    pub scopes: Vec<String>,
}

impl AuthorizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Context holding both read and write access
    pub fn full_access() -> Self {
        Self::new().with_scopes(vec![
            access_scopes::READ_ACCESS.to_string(),
            access_scopes::WRITE_ACCESS.to_string(),
        ])
    }

    /// Context holding read access only
    pub fn read_only() -> Self {
        Self::new().with_scopes(vec![access_scopes::READ_ACCESS.to_string()])
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    pub fn subject_or_anonymous(&self) -> String {
        self.subject.clone().unwrap_or_else(|| "anonymous".to_string())
    }
}

/// Authorization service port
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Check if the context may perform `action` on `resource`
    async fn check_permission(
        &self,
        context: &AuthorizationContext,
        resource: &str,
        action: &str,
    ) -> Result<bool, AuthError>;
}
