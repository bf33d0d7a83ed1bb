// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body. The dashboard surfaces this string
    /// verbatim, so the body stays a flat `{"error": ...}` object.
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
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

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert domain error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::ConfigMissing(_) => {
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error")
            }
        }
    }
}

impl From<crate::messaging::resolver::ResolveError> for ApiError {
    fn from(err: crate::messaging::resolver::ResolveError) -> Self {
        use crate::messaging::resolver::ResolveError;
        match &err {
            ResolveError::MissingFields
            | ResolveError::InvalidRecipientConfiguration
            | ResolveError::InvalidMessageConfiguration => ApiError::bad_request(err.to_string()),
            ResolveError::NotFound(_) => ApiError::not_found(err.to_string()),
            ResolveError::Forbidden(_) | ResolveError::InvalidRecipientHints => {
                ApiError::forbidden(err.to_string())
            }
            ResolveError::Directory(source) => {
                tracing::error!("Directory lookup failed: {}", source);
                ApiError::internal_server_error("Database error")
            }
        }
    }
}

impl From<crate::services::message_service::StoreError> for ApiError {
    fn from(err: crate::services::message_service::StoreError) -> Self {
        tracing::error!("Message store failure: {}", err);
        ApiError::internal_server_error("Database error")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::resolver::ResolveError;

    #[test]
    fn resolve_errors_map_to_expected_statuses() {
        let cases: Vec<(ResolveError, u16, &str)> = vec![
            (ResolveError::MissingFields, 400, "Subject and message are required"),
            (ResolveError::NotFound("Team"), 404, "Team not found"),
            (
                ResolveError::Forbidden("You are not a member of this team"),
                403,
                "You are not a member of this team",
            ),
            (ResolveError::InvalidRecipientConfiguration, 400, "Invalid recipient configuration"),
            (
                ResolveError::InvalidRecipientHints,
                403,
                "Invalid recipient configuration for regular user",
            ),
            (ResolveError::InvalidMessageConfiguration, 400, "Invalid message configuration"),
        ];

        for (err, status, message) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn error_body_is_flat_error_object() {
        let api = ApiError::forbidden("Invalid recipient");
        assert_eq!(api.to_json(), serde_json::json!({ "error": "Invalid recipient" }));
    }
}
