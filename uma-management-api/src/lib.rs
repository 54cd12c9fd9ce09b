pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the HTTP router with every route, the API-key middleware and the
/// tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // UMA resource endpoints
        .route(
            "/uma/resources",
            get(handlers::resources::list_resources)
                .post(handlers::resources::create_resource)
                .put(handlers::resources::update_resource),
        )
        .route(
            "/uma/resources/search",
            get(handlers::resources::search_resources),
        )
        .route(
            "/uma/resources/:id",
            get(handlers::resources::get_resource).delete(handlers::resources::delete_resource),
        )
        .route(
            "/uma/resources/:id/clients",
            get(handlers::resources::get_resource_clients),
        )
        .route(
            "/uma/resources/:id/clients/:inum",
            axum::routing::post(handlers::resources::add_client)
                .delete(handlers::resources::remove_client),
        )
        .route(
            "/uma/resources/:id/scopes",
            get(handlers::resources::get_resource_scopes),
        )
        .route(
            "/uma/resources/:id/scopes/:inum",
            axum::routing::post(handlers::resources::add_scope)
                .delete(handlers::resources::remove_scope),
        )
        // UMA scope endpoints
        .route(
            "/uma/scopes",
            get(handlers::scopes::list_scopes)
                .post(handlers::scopes::create_scope)
                .put(handlers::scopes::update_scope),
        )
        .route("/uma/scopes/search", get(handlers::scopes::search_scopes))
        .route(
            "/uma/scopes/:inum",
            get(handlers::scopes::get_scope).delete(handlers::scopes::delete_scope),
        )
        // oxAuth configuration
        .route(
            "/configurations/oxauth",
            get(handlers::configuration::get_oxauth_config)
                .put(handlers::configuration::update_oxauth_config),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::auth::auth_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
