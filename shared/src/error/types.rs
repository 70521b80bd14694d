//! Error types and API response structures

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Every failure that crosses the HTTP boundary is one of these:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, ids)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid amount error for the given field
    pub fn invalid_amount(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidAmount, msg).with_detail("field", field)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a store not found error (also used for stores owned by others)
    pub fn store_not_found() -> Self {
        Self::with_message(ErrorCode::StoreNotFound, "Store not found or access denied")
    }

    /// The store already has an open register
    pub fn register_already_open(store_id: i64) -> Self {
        Self::new(ErrorCode::RegisterAlreadyOpen).with_detail("store_id", store_id)
    }

    /// The register is closed; its transaction set is frozen
    pub fn register_closed(register_id: i64) -> Self {
        Self::new(ErrorCode::RegisterClosed).with_detail("register_id", register_id)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Unique constraint hit on insert
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Body sent to the client; system details never leave the server
    pub fn to_response(&self) -> ApiResponse {
        let details = match self.code.category() {
            ErrorCategory::System => None,
            _ => self.details.clone(),
        };
        ApiResponse {
            code: self.code.code(),
            message: self.message.clone(),
            details,
        }
    }
}

/// Error body: `{ "code": 4002, "message": "...", "details": {...} }`
///
/// Successful responses carry the resource itself, so this shape only
/// appears on 4xx/5xx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    pub fn error(err: &AppError) -> Self {
        err.to_response()
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = self.to_response();

        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                details = ?self.details,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RegisterNotFound);
        assert_eq!(err.code, ErrorCode::RegisterNotFound);
        assert_eq!(err.message, "Cash register not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("amount must be greater than zero")
            .with_detail("field", "amount")
            .with_detail("value", "-1.00");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "amount");
        assert_eq!(details.get("value").unwrap(), "-1.00");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::register_already_open(1).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::register_closed(1).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::store_not_found().http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::invalid_amount("openingAmount", "must not be negative");
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(
            err.details.as_ref().unwrap().get("field").unwrap(),
            "openingAmount"
        );

        let err = AppError::database("pool timed out");
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_api_response_error_keeps_domain_details() {
        let err = AppError::register_closed(42);
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 4002);
        assert_eq!(response.message, "Cash register is closed");
        assert_eq!(
            response.details.unwrap().get("register_id").unwrap(),
            &Value::from(42)
        );
    }

    #[test]
    fn test_api_response_error_hides_system_details() {
        let err = AppError::database("disk I/O error").with_detail("sql", "INSERT ...");
        let response = ApiResponse::error(&err);
        assert_eq!(response.code, 9002);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_api_response_serialize() {
        let json = serde_json::to_value(ApiResponse::error(&AppError::not_authenticated())).unwrap();
        assert_eq!(json["code"], 1001);
        assert!(json.get("details").is_none());
    }
}
