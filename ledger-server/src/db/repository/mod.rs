//! Repository Module
//!
//! Free functions per table. Single-statement functions are generic over
//! [`sqlx::Executor`] so they run against the pool or inside a transaction
//! (`&mut *tx`). Money columns are TEXT and converted through
//! [`crate::utils::money`].

pub mod audit_log;
pub mod cash_register;
pub mod cash_transaction;
pub mod client;
pub mod client_value;
pub mod store;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Decode a money column, treating garbage as a storage fault
pub(crate) fn money_col(raw: &str, column: &str) -> RepoResult<rust_decimal::Decimal> {
    crate::utils::money::from_db(raw, column).map_err(RepoError::Database)
}

pub(crate) fn opt_money_col(
    raw: Option<&str>,
    column: &str,
) -> RepoResult<Option<rust_decimal::Decimal>> {
    raw.map(|r| money_col(r, column)).transpose()
}
