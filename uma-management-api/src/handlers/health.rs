use crate::{dto::HealthResponse, state::AppState};
use axum::{extract::State, Json};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        persistence_type: state.directory_service.persistence_type(),
        ldap: state.directory_service.is_ldap(),
    })
}
