//! History API
//!
//! `GET /api/history?storeId=&startDate=&endDate=&closedOnly=` - per-day
//! totals, period payment breakdown and period summary.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/history", get(handler::history))
}
