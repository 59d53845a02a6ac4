use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::services::ServiceError;
use crate::uploads::UploadError;

/// Every failure a handler can report. Rendered as
/// `{"error": true, "message": ..., "code": ...}` with the matching status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Required input absent; `field_errors` maps field name to reason
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },
    InvalidJson(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation { .. } | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            // A taken email is reported as a bad request; `code` still says CONFLICT
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    /// Machine-readable code; clients branch on this, not on the message
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg)
            | ApiError::Unavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "message": self.message(),
            "code": self.code(),
        });
        if let ApiError::Validation { field_errors, .. } = self {
            body["field_errors"] = json!(field_errors);
        }
        body
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Validation error naming a single required field
    pub fn missing_field(field: &str) -> Self {
        let field_errors = HashMap::from([(field.to_string(), "This field is required".to_string())]);
        ApiError::Validation {
            message: format!("Field '{}' is required", field),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) | DatabaseError::Sqlx(sqlx::Error::PoolClosed) => {
                tracing::error!("Database pool unavailable");
                ApiError::Unavailable("Database temporarily unavailable".to_string())
            }
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("Query failed: {}", sqlx_err);
                ApiError::internal("Database error occurred")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMissing => ApiError::unauthorized("Missing Authorization header"),
            AuthError::TokenInvalid(msg) => ApiError::unauthorized(format!("Invalid token: {}", msg)),
            AuthError::Forbidden { required, .. } => {
                ApiError::forbidden(format!("Access denied: {} role required", required))
            }
            AuthError::UnknownRole(role) => ApiError::bad_request(format!("Unknown role '{}'", role)),
            other => {
                tracing::error!("Auth error: {}", other);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(e) => {
                tracing::error!("Upload storage error: {}", e);
                ApiError::internal("Failed to store uploaded file")
            }
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::MissingField(field) => ApiError::missing_field(field),
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            ServiceError::Auth(e) => e.into(),
            ServiceError::Upload(e) => e.into(),
            ServiceError::Database(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::bad_request(format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Conflict("User exists".into()), 400),
            (ServiceError::NotFound("Staff not found".into()), 404),
            (ServiceError::MissingField("email"), 400),
            (ServiceError::InvalidCredentials, 401),
            (ServiceError::Upload(UploadError::Empty), 400),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn taken_email_is_bad_request_with_conflict_code() {
        let err = ApiError::from(ServiceError::Conflict("User exists".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json()["code"], "CONFLICT");
        assert_eq!(err.to_json()["message"], "User exists");
    }

    #[test]
    fn missing_field_names_the_field() {
        let body = ApiError::from(ServiceError::MissingField("reason")).to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["reason"], "This field is required");
    }

    #[test]
    fn wrong_role_is_forbidden() {
        let err = ApiError::from(AuthError::Forbidden {
            required: Role::Admin.to_string(),
            actual: Role::Staff.to_string(),
        });
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_json()["error"], true);
    }

    #[test]
    fn sql_details_are_not_exposed() {
        let err = ApiError::from(DatabaseError::Sqlx(sqlx::Error::RowNotFound));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Database error occurred");
    }
}
