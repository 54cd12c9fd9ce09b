use crate::{
    application::ports::auth::{AuthorizationContext, AuthorizationService},
    domain::errors::{DomainError, DomainResult},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Shared permission check for every service
#[async_trait]
pub trait AuthorizationHelper {
    fn auth_service(&self) -> &Arc<dyn AuthorizationService>;

    /// Check permissions and return AuthorizationFailed if denied
    async fn check_permission(
        &self,
        context: &AuthorizationContext,
        resource: &str,
        action: &str,
    ) -> DomainResult<()> {
        let has_permission = self
            .auth_service()
            .check_permission(context, resource, action)
            .await
            .map_err(|_e| DomainError::AuthorizationFailed {
                subject: context.subject_or_anonymous(),
                permission: format!("{resource}:{action}"),
            })?;

        if !has_permission {
            return Err(DomainError::AuthorizationFailed {
                subject: context.subject_or_anonymous(),
                permission: format!("{resource}:{action}"),
            });
        }

        Ok(())
    }
}
