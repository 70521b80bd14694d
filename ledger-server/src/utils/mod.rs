//! Utilities - shared error re-exports, logging, time, validation, money
//!
//! - [`AppError`] / [`ApiResponse`] come from `shared::error`
//! - [`money`] is the only place amounts are parsed or formatted

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
