//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::StoreNotFound
            | Self::RegisterNotFound
            | Self::TransactionNotFound
            | Self::ClientNotFound
            | Self::ClientValueNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::RegisterAlreadyOpen => StatusCode::CONFLICT,

            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 400 Bad Request (validation and frozen-register state)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::InvalidAmount
            | Self::InvalidTransactionType
            | Self::InvalidPaymentMethod
            | Self::RegisterClosed
            | Self::RegisterAlreadyClosed => StatusCode::BAD_REQUEST,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether a caller may retry the same request later with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DatabaseError)
    }
}
