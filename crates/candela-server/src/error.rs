//! HTTP error responses
//!
//! Maps the core [`ServiceError`] taxonomy onto status codes and the flat
//! `{ "error": string }` body the API contract fixes. Server-side failures
//! are logged with their stable error code before the response is built.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use candela_core::ServiceError;
use serde_json::json;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            // Bad logins are 400, not 401; clients key off that status.
            ServiceError::LoginFailed => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Conflict { .. } => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.0.error_code(), error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(ServiceError::not_found("Product")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(ServiceError::conflict("dup")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError(ServiceError::LoginFailed).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(ServiceError::Unauthorized).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError(ServiceError::Forbidden).status_code(), StatusCode::FORBIDDEN);
    }
}
