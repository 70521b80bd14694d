//! Client API (credit ledger)
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/clients | POST | create a client |
//! | /api/clients?storeId= | GET | clients of a store |
//! | /api/clients/{id} | GET, PATCH | read / rename, change phone |
//! | /api/clients/{id}/ledger | POST, GET | record an entry / list entries |
//! | /api/clients/{id}/ledger/{valueId} | DELETE | remove an entry |
//! | /api/clients/{id}/summary | GET | `{income, outcome, total}` |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .route("/{id}/ledger", get(handler::list_ledger).post(handler::record))
        .route("/{id}/ledger/{value_id}", delete(handler::delete_entry))
        .route("/{id}/summary", get(handler::summary))
}
