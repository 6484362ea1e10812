// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::FieldError;
use crate::services::ServiceError;

/// HTTP API error rendered as the `{status: "failed", message, errors}` envelope
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(Vec<FieldError>),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Envelope message, a fixed discriminator per status
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => "StatusBadRequest",
            ApiError::Unauthorized(_) => "StatusUnauthorized",
            ApiError::NotFound(_) => "StatusNotFound",
            ApiError::InternalServerError(_) => "StatusInternalServerError",
            ApiError::ServiceUnavailable(_) => "StatusServiceUnavailable",
        }
    }

    /// Get client-safe error detail
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg.clone(),
            ApiError::ValidationError(errors) => format!("{} field(s) failed validation", errors.len()),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let errors = match self {
            ApiError::ValidationError(errors) => json!(errors),
            _ => json!(self.message()),
        };
        json!({
            "status": "failed",
            "message": self.error_code(),
            "errors": errors,
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
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

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(msg) => ApiError::bad_request(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Unauthorized(msg) => ApiError::unauthorized(msg),
            ServiceError::Internal(msg) => ApiError::internal_server_error(msg),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_envelope() {
        let err = ApiError::from(ServiceError::not_found("merchant not found"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_json(),
            json!({"status": "failed", "message": "StatusNotFound", "errors": "merchant not found"})
        );
    }

    #[test]
    fn validation_envelope_lists_fields() {
        let err = ApiError::validation_error(vec![FieldError {
            failed_field: "name".into(),
            tag: "length".into(),
            value: json!(""),
        }]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_json();
        assert_eq!(body["message"], "StatusBadRequest");
        assert_eq!(body["errors"][0]["failed_field"], "name");
        assert_eq!(body["errors"][0]["tag"], "length");
    }
}
