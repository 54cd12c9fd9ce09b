use crate::{dto::ScopeSearchQuery, error::AppResult, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uma_domain::{application::ports::AuthorizationContext, UmaScope};

pub async fn list_scopes(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
) -> AppResult<Json<Vec<UmaScope>>> {
    let scopes = state.scope_service.list_scopes(&context).await?;
    Ok(Json(scopes))
}

pub async fn search_scopes(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Query(query): Query<ScopeSearchQuery>,
) -> AppResult<Json<Vec<UmaScope>>> {
    let scopes = state
        .scope_service
        .search_scopes(&query.pattern, query.size, &context)
        .await?;
    Ok(Json(scopes))
}

pub async fn get_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(inum): Path<String>,
) -> AppResult<Json<UmaScope>> {
    let scope = state.scope_service.get_scope(&inum, &context).await?;
    Ok(Json(scope))
}

pub async fn create_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Json(scope): Json<UmaScope>,
) -> AppResult<Json<UmaScope>> {
    let created = state.scope_service.create_scope(scope, &context).await?;
    Ok(Json(created))
}

pub async fn update_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Json(scope): Json<UmaScope>,
) -> AppResult<Json<UmaScope>> {
    let updated = state.scope_service.update_scope(scope, &context).await?;
    Ok(Json(updated))
}

pub async fn delete_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(inum): Path<String>,
) -> AppResult<StatusCode> {
    state.scope_service.delete_scope(&inum, &context).await?;
    Ok(StatusCode::NO_CONTENT)
}
