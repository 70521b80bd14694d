//! Store API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/stores | POST | create a store owned by the caller |
//! | /api/stores | GET | the caller's stores |
//! | /api/stores/{id} | GET | one store |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
}
