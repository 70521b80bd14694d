//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check (public)
//! - [`stores`] - caller's stores
//! - [`registers`] - register lifecycle and transactions
//! - [`clients`] - clients and their credit ledger
//! - [`history`] - per-day analytics
//! - [`audit_log`] - operator audit trail
//!
//! Every `/api` route requires the `X-User-Id` header.

pub mod access;
pub mod extract;

pub mod audit_log;
pub mod clients;
pub mod health;
pub mod history;
pub mod registers;
pub mod stores;

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// All routes, no middleware, no state
pub fn build_routes() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(stores::router())
        .merge(registers::router())
        .merge(clients::router())
        .merge(history::router())
        .merge(audit_log::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms.max(1));
    let development = state.config.is_development();

    let mut app = build_routes()
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http());
    if development {
        app = app.layer(CorsLayer::permissive());
    }
    app.with_state(state)
}
