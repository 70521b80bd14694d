//! Ledger Server - cash-register ledger for small retail stores
//!
//! # Modules
//!
//! - [`ledger`] - classifier, aggregator, history reducer (pure)
//! - [`registers`] - register lifecycle manager
//! - [`credit`] - client credit ledger and its bridge into registers
//! - [`db`] - SQLite pool, migrations, repositories
//! - [`cache`] - TTL read cache
//! - [`audit`] - operator audit trail
//! - [`api`] - axum routes
//! - [`core`] - configuration, state, server

pub mod api;
pub mod audit;
pub mod auth;
pub mod cache;
pub mod core;
pub mod credit;
pub mod db;
pub mod ledger;
pub mod registers;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
