//! Audit log API
//!
//! `GET /api/audit?storeId=&limit=&offset=` - newest first.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/audit", get(handler::list))
}
