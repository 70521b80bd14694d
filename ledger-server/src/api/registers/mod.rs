//! Cash Register API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/registers | POST | open a register |
//! | /api/registers?storeId=&include=transactions | GET | registers of a store, newest first |
//! | /api/registers/current?storeId= | GET | the open register, or `null` |
//! | /api/registers/{id} | GET | register with transactions and live totals |
//! | /api/registers/{id}/close | PATCH | close and persist totals |
//! | /api/registers/{id}/transactions | POST, GET | attach / list |
//! | /api/registers/{id}/transactions/{txnId} | PATCH, DELETE | edit / remove |

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/registers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::open))
        .route("/current", get(handler::get_current))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", patch(handler::close))
        .route(
            "/{id}/transactions",
            get(handler::list_transactions).post(handler::attach_transaction),
        )
        .route(
            "/{id}/transactions/{txn_id}",
            patch(handler::update_transaction).delete(handler::remove_transaction),
        )
}
