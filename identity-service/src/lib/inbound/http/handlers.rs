use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::errors::ValidationErrors;

pub mod create_session;
pub mod get_identity;
pub mod register;

/// Success body for both token-returning operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// HTTP-boundary error taxonomy.
///
/// Validation, conflict, and bad credentials all map to 400; token failures
/// to 401; everything internal to a generic 500 whose detail reaches the log
/// but never the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(Vec<String>),
    Conflict(String),
    InvalidCredentials,
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            ApiError::Validation(messages) => (StatusCode::BAD_REQUEST, messages),
            ApiError::Conflict(message) => (StatusCode::BAD_REQUEST, vec![message]),
            ApiError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, vec!["invalid credentials".to_string()])
            }
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, vec![message]),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, vec!["server error".to_string()])
            }
        };

        (status, Json(ApiErrorBody::new(messages))).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.messages)
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailAlreadyExists(_) => {
                ApiError::Conflict("identity already exists".to_string())
            }
            IdentityError::InvalidCredentials => ApiError::InvalidCredentials,
            // A verified token whose subject no longer resolves is treated as
            // a stale token, not a server fault.
            IdentityError::NotFound(_) => ApiError::Unauthorized("invalid token".to_string()),
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::Database(_)
            | IdentityError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub errors: Vec<ApiErrorMessage>,
}

impl ApiErrorBody {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            errors: messages
                .into_iter()
                .map(|message| ApiErrorMessage { message })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_become_message_array() {
        let body = ApiErrorBody::new(vec!["name is required".to_string(), "x".to_string()]);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["errors"][0]["message"], "name is required");
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_internal_error_detail_not_in_body() {
        let response = ApiError::Internal("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflict_and_bad_credentials_share_status() {
        let conflict = ApiError::Conflict("identity already exists".to_string()).into_response();
        let credentials = ApiError::InvalidCredentials.into_response();
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(credentials.status(), StatusCode::BAD_REQUEST);
    }
}
