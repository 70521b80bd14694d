//! Data models
//!
//! Shared between ledger-server and its clients (via API).
//! All IDs are `i64` snowflakes, all timestamps Unix millis, all money
//! `rust_decimal::Decimal` (serialized as a string with two decimals).

pub mod cash_register;
pub mod cash_transaction;
pub mod client;
pub mod store;

// Re-exports
pub use cash_register::*;
pub use cash_transaction::*;
pub use client::*;
pub use store::*;
