//! Service error types
//!
//! One error taxonomy shared by every service. The HTTP status and response
//! body mapping lives in the server crate.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the storefront services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    /// Deliberately generic: the response must never reveal whether the
    /// email exists or only the password was wrong.
    #[error("Invalid email or password")]
    LoginFailed,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Admin access required")]
    Forbidden,

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    /// Create a validation error
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ServiceError::Validation { message: message.into() }
    }

    /// Create a bad request error
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        ServiceError::BadRequest { message: message.into() }
    }

    /// Create a not found error for a resource kind ("Product", "Order", ...)
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        ServiceError::NotFound { resource: resource.into() }
    }

    /// Create a conflict error
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        ServiceError::Conflict { message: message.into() }
    }

    /// Create an internal error
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ServiceError::Internal { message: message.into() }
    }

    /// Get a stable error code for logging and API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } => "VALIDATION_ERROR",
            ServiceError::BadRequest { .. } => "BAD_REQUEST",
            ServiceError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            ServiceError::Conflict { .. } => "RESOURCE_CONFLICT",
            ServiceError::LoginFailed => "LOGIN_FAILED",
            ServiceError::Unauthorized => "UNAUTHORIZED_ACCESS",
            ServiceError::Forbidden => "ACCESS_FORBIDDEN",
            ServiceError::Storage { .. } => "STORAGE_ERROR",
            ServiceError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Storage { message: err.to_string() }
    }
}

impl From<bcrypt::BcryptError> for ServiceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ServiceError::Internal { message: format!("password hashing failed: {}", err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ServiceError::not_found("Product");
        assert!(matches!(error, ServiceError::NotFound { .. }));
        assert_eq!(error.to_string(), "Product not found");
        assert_eq!(error.error_code(), "RESOURCE_NOT_FOUND");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ServiceError::validation("test").error_code(), "VALIDATION_ERROR");
        assert_eq!(ServiceError::conflict("test").error_code(), "RESOURCE_CONFLICT");
        assert_eq!(ServiceError::LoginFailed.error_code(), "LOGIN_FAILED");
    }

    #[test]
    fn test_login_failure_is_generic() {
        assert_eq!(ServiceError::LoginFailed.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_error = StoreError::Backend(sled::Error::Unsupported("test".into()));
        let error = ServiceError::from(store_error);
        assert!(matches!(error, ServiceError::Storage { .. }));
    }
}
