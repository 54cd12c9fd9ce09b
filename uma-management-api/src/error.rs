use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uma_domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                DomainError::ResourceNotFound { .. }
                | DomainError::ScopeNotFound { .. }
                | DomainError::ClientNotFound { .. }
                | DomainError::ReferenceNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::AlreadyExists { .. } => StatusCode::CONFLICT,
                DomainError::AuthorizationFailed { .. } => StatusCode::FORBIDDEN,
                DomainError::ExternalService { .. }
                | DomainError::Configuration { .. }
                | DomainError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            match self {
                AppError::Domain(e) => e.to_string(),
                AppError::Unauthorized => "Unauthorized".to_string(),
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
