use crate::{error::AppResult, state::AppState};
use axum::{extract::State, Extension, Json};
use uma_domain::{application::ports::AuthorizationContext, OxAuthConfig};

pub async fn get_oxauth_config(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
) -> AppResult<Json<OxAuthConfig>> {
    let config = state.configuration_service.get_oxauth_config(&context).await?;
    Ok(Json(config))
}

/// Replace the stored document and answer with what was persisted
pub async fn update_oxauth_config(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Json(config): Json<OxAuthConfig>,
) -> AppResult<Json<OxAuthConfig>> {
    let updated = state
        .configuration_service
        .update_oxauth_config(config, &context)
        .await?;
    Ok(Json(updated))
}
