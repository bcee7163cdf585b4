use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use homebudget_core::errors::{DatabaseError, Error as CoreError, ValidationError};
use homebudget_core::users::UserError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not found.")]
    NotFound,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// DRF-style bodies: field validation errors nest under `detail`, everything
/// else is a flat `{"detail": "<message>"}`.
fn validation_body(err: &ValidationError) -> serde_json::Value {
    match err {
        ValidationError::Field { field, message } => {
            json!({ "detail": { field.as_str(): [message] } })
        }
        ValidationError::InvalidInput(message) => {
            json!({ "detail": { "non_field_errors": [message] } })
        }
        ValidationError::DecimalParse(_) => {
            json!({ "detail": { "non_field_errors": ["A valid number is required."] } })
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(validation) => {
                    (StatusCode::BAD_REQUEST, validation_body(validation))
                }
                CoreError::User(user_error @ UserError::EmailTaken) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "detail": { "email": [user_error.to_string()] } }),
                ),
                CoreError::User(user_error @ UserError::InvalidCredentials) => (
                    StatusCode::UNAUTHORIZED,
                    json!({ "detail": user_error.to_string() }),
                ),
                CoreError::User(UserError::NotFound(_)) | CoreError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, json!({ "detail": "Not found." }))
                }
                CoreError::Forbidden(message) => {
                    (StatusCode::FORBIDDEN, json!({ "detail": message }))
                }
                CoreError::Database(DatabaseError::UniqueViolation(message)) => {
                    (StatusCode::CONFLICT, json!({ "detail": message }))
                }
                CoreError::Database(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error." }),
                ),
            },
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "detail": "Not found." })),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "detail": message }))
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "detail": message }))
            }
            ApiError::Anyhow(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "detail": "Internal server error." }),
            ),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
