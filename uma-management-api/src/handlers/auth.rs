use crate::{config::Config, error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uma_domain::application::ports::AuthorizationContext;

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolve the caller's access scopes from the API key and hand them to the
/// handlers as an `AuthorizationContext` request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Skip auth for health check
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let mut context = authorize(&state.config, request.headers())?;
    if let Some(request_id) = header_value(request.headers(), REQUEST_ID_HEADER) {
        context = context.with_request_id(request_id);
    }

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

fn authorize(config: &Config, headers: &HeaderMap) -> Result<AuthorizationContext, AppError> {
    if !config.requires_api_key() {
        // No API key configured, allow all requests
        return Ok(AuthorizationContext::full_access());
    }

    let presented = header_value(headers, API_KEY_HEADER).ok_or(AppError::Unauthorized)?;

    if config.api_key.as_deref() == Some(presented) {
        Ok(AuthorizationContext::full_access().with_subject("api-key"))
    } else if config.read_only_api_key.as_deref() == Some(presented) {
        Ok(AuthorizationContext::read_only().with_subject("read-only-api-key"))
    } else {
        debug!("Rejected request with unknown API key");
        Err(AppError::Unauthorized)
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}
