use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::auth::*;
use crate::domain::errors::*;

/// Authorization backed purely by the access scopes carried in the context.
///
/// `read` is granted by either API scope, `write` only by the write scope.
#[derive(Debug, Default, Clone)]
pub struct ScopeAuthorizationService;

impl ScopeAuthorizationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthorizationService for ScopeAuthorizationService {
    async fn check_permission(
        &self,
        context: &AuthorizationContext,
        resource: &str,
        action: &str,
    ) -> Result<bool, AuthError> {
        let allowed = match action {
            actions::READ => {
                context.has_scope(access_scopes::READ_ACCESS)
                    || context.has_scope(access_scopes::WRITE_ACCESS)
            }
            actions::WRITE => context.has_scope(access_scopes::WRITE_ACCESS),
            other => {
                return Err(AuthError::UnknownAction {
                    action: other.to_string(),
                })
            }
        };

        debug!(
            "Access check {}:{} for '{}' -> {}",
            resource,
            action,
            context.subject_or_anonymous(),
            allowed
        );
        Ok(allowed)
    }
}
