//! API error types and response envelopes.
//!
//! Read handlers propagate `ApiError` and the framework renders the
//! `{error, message}` body. Mutation handlers never leak a raw failure:
//! every error is converted into the structured `{success: false, error}`
//! envelope via `MutationError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::MediaError;
use serde::Serialize;
use shared::password::PasswordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Media host error: {0}")]
    Media(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code, stable error code, and user-visible message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Media(msg) => (StatusCode::BAD_GATEWAY, "media_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();
        let body = ErrorBody {
            error: error_code.into(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field))
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages.into_iter().next().unwrap()
        } else {
            messages.join("; ")
        };

        ApiError::Validation(message)
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        ApiError::Media(err.to_string())
    }
}

impl From<domain::models::asset::AssetError> for ApiError {
    fn from(err: domain::models::asset::AssetError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Success envelope for mutation endpoints: `{success: true, data}`.
#[derive(Debug, Serialize)]
pub struct MutationSuccess<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> MutationSuccess<T> {
    pub fn respond(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Failure envelope for mutation endpoints: `{success: false, error}`.
///
/// Wraps `ApiError` so mutation handlers can use `?` on the same fallible
/// calls read handlers do while producing the mutation-shaped body.
#[derive(Debug)]
pub struct MutationError(pub ApiError);

#[derive(Debug, Serialize)]
struct MutationErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for MutationError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.0.parts();
        let body = MutationErrorBody {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApiError> for MutationError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<sqlx::Error> for MutationError {
    fn from(err: sqlx::Error) -> Self {
        Self(err.into())
    }
}

impl From<validator::ValidationErrors> for MutationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self(errors.into())
    }
}

impl From<MediaError> for MutationError {
    fn from(err: MediaError) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound("Donor not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError::Validation("bad input".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn media_failure_maps_to_502() {
        let response = ApiError::Media("upload failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_message_is_not_leaked() {
        let error = ApiError::Internal("connection string with password".into());
        let (_, _, message) = error.parts();
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn sqlx_row_not_found_becomes_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn mutation_error_keeps_the_status_code() {
        let response = MutationError(ApiError::Conflict("Admin with this email already exists".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn mutation_success_serializes_envelope() {
        let body = MutationSuccess {
            success: true,
            data: serde_json::json!({"id": 1}),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\""));
    }

    #[test]
    fn validation_errors_collapse_to_one_message() {
        use validator::Validate;

        #[derive(Validate)]
        struct Form {
            #[validate(length(min = 1, message = "Name must not be empty"))]
            name: String,
        }

        let errors = Form {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let error: ApiError = errors.into();
        match error {
            ApiError::Validation(msg) => assert_eq!(msg, "Name must not be empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
