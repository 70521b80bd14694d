//! Error codes of the ledger API
//!
//! Codes are grouped by range; see [`super::ErrorCategory`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error code carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx: request shape
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    /// Body or query could not be read at all
    InvalidRequest = 5,
    /// Body is not valid JSON
    InvalidFormat = 6,

    // 1xxx
    /// Missing `X-User-Id`
    NotAuthenticated = 1001,

    // 3xxx
    /// Missing, or owned by another user
    StoreNotFound = 3001,

    // 4xxx
    RegisterAlreadyOpen = 4001,
    /// Transaction changes on a closed register
    RegisterClosed = 4002,
    /// Closing twice
    RegisterAlreadyClosed = 4003,
    RegisterNotFound = 4004,

    // 5xxx
    TransactionNotFound = 5001,
    InvalidAmount = 5002,
    InvalidTransactionType = 5003,
    InvalidPaymentMethod = 5004,

    // 6xxx
    ClientNotFound = 6001,
    ClientValueNotFound = 6002,

    // 9xxx
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 19] = [
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::InvalidRequest,
        Self::InvalidFormat,
        Self::NotAuthenticated,
        Self::StoreNotFound,
        Self::RegisterAlreadyOpen,
        Self::RegisterClosed,
        Self::RegisterAlreadyClosed,
        Self::RegisterNotFound,
        Self::TransactionNotFound,
        Self::InvalidAmount,
        Self::InvalidTransactionType,
        Self::InvalidPaymentMethod,
        Self::ClientNotFound,
        Self::ClientValueNotFound,
        Self::InternalError,
        Self::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message, used when an error is built without one
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::NotAuthenticated => "User is not authenticated",
            Self::StoreNotFound => "Store not found",
            Self::RegisterAlreadyOpen => "A cash register is already open for this store",
            Self::RegisterClosed => "Cash register is closed",
            Self::RegisterAlreadyClosed => "Cash register is already closed",
            Self::RegisterNotFound => "Cash register not found",
            Self::TransactionNotFound => "Transaction not found",
            Self::InvalidAmount => "Invalid amount",
            Self::InvalidTransactionType => "Invalid transaction type",
            Self::InvalidPaymentMethod => "Invalid payment method",
            Self::ClientNotFound => "Client not found",
            Self::ClientValueNotFound => "Client ledger entry not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of our codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RegisterAlreadyOpen.code(), 4001);
        assert_eq!(ErrorCode::TransactionNotFound.code(), 5001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_accepts_every_code() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::RegisterClosed).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::RegisterAlreadyOpen);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::RegisterClosed.to_string(), "E4002");
    }
}
