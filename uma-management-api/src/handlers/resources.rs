use crate::{dto::SearchQuery, error::AppResult, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uma_domain::{application::ports::AuthorizationContext, Client, UmaResource, UmaScope};

pub async fn list_resources(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
) -> AppResult<Json<Vec<UmaResource>>> {
    let resources = state.resource_service.list_resources(&context).await?;
    Ok(Json(resources))
}

pub async fn search_resources(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<UmaResource>>> {
    let resources = state
        .resource_service
        .search_resources(&query.pattern, query.size, &context)
        .await?;
    Ok(Json(resources))
}

pub async fn get_resource(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(id): Path<String>,
) -> AppResult<Json<UmaResource>> {
    let resource = state.resource_service.get_resource(&id, &context).await?;
    Ok(Json(resource))
}

pub async fn get_resource_clients(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = state
        .resource_service
        .get_resource_clients(&id, &context)
        .await?;
    Ok(Json(clients))
}

pub async fn get_resource_scopes(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UmaScope>>> {
    let scopes = state
        .resource_service
        .get_resource_scopes(&id, &context)
        .await?;
    Ok(Json(scopes))
}

pub async fn add_client(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path((id, inum)): Path<(String, String)>,
) -> AppResult<Json<UmaResource>> {
    let resource = state
        .resource_service
        .add_client(&id, &inum, &context)
        .await?;
    Ok(Json(resource))
}

pub async fn remove_client(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path((id, inum)): Path<(String, String)>,
) -> AppResult<Json<UmaResource>> {
    let resource = state
        .resource_service
        .remove_client(&id, &inum, &context)
        .await?;
    Ok(Json(resource))
}

pub async fn add_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path((id, inum)): Path<(String, String)>,
) -> AppResult<Json<UmaResource>> {
    let resource = state
        .resource_service
        .add_scope(&id, &inum, &context)
        .await?;
    Ok(Json(resource))
}

pub async fn remove_scope(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path((id, inum)): Path<(String, String)>,
) -> AppResult<Json<UmaResource>> {
    let resource = state
        .resource_service
        .remove_scope(&id, &inum, &context)
        .await?;
    Ok(Json(resource))
}

pub async fn create_resource(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Json(resource): Json<UmaResource>,
) -> AppResult<Json<UmaResource>> {
    let created = state
        .resource_service
        .create_resource(resource, &context)
        .await?;
    Ok(Json(created))
}

pub async fn update_resource(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Json(resource): Json<UmaResource>,
) -> AppResult<Json<UmaResource>> {
    let updated = state
        .resource_service
        .update_resource(resource, &context)
        .await?;
    Ok(Json(updated))
}

/// Responds 200 with an empty body
pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(context): Extension<AuthorizationContext>,
    Path(id): Path<String>,
) -> AppResult<()> {
    state.resource_service.delete_resource(&id, &context).await?;
    Ok(())
}
