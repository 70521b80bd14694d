//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{
    Client, ClientCreate, ClientSummary, ClientUpdate, ClientValue, ClientValueCreate,
    ClientValueCreated,
};

use crate::api::access::{owned_client, verify_store};
use crate::api::extract::{ValidJson, ValidQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::credit;
use crate::db::repository::{client, client_value};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub store_id: i64,
}

/// POST /api/clients
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<ClientCreate>,
) -> AppResult<(StatusCode, Json<Client>)> {
    verify_store(&state, payload.store_id, &user).await?;
    let created = credit::create_client(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/clients?storeId=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> AppResult<Json<Vec<Client>>> {
    verify_store(&state, query.store_id, &user).await?;
    Ok(Json(client::list_by_store(state.pool(), query.store_id).await?))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    Ok(Json(owned_client(&state, id, &user).await?))
}

/// PATCH /api/clients/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let existing = owned_client(&state, id, &user).await?;
    Ok(Json(credit::update_client(state.pool(), existing.id, payload).await?))
}

/// POST /api/clients/{id}/ledger
///
/// The entry is returned even when the register side failed; see `warnings`.
pub async fn record(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<ClientValueCreate>,
) -> AppResult<(StatusCode, Json<ClientValueCreated>)> {
    let owner = owned_client(&state, id, &user).await?;
    let created = credit::record_client_value(&state.registers, &owner, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/clients/{id}/ledger
pub async fn list_ledger(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ClientValue>>> {
    let owner = owned_client(&state, id, &user).await?;
    Ok(Json(client_value::list_by_client(state.pool(), owner.id).await?))
}

/// DELETE /api/clients/{id}/ledger/{value_id}
pub async fn delete_entry(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, value_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    let owner = owned_client(&state, id, &user).await?;
    credit::delete_client_value(state.pool(), owner.id, value_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/clients/{id}/summary
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ClientSummary>> {
    let owner = owned_client(&state, id, &user).await?;
    let values = client_value::list_by_client(state.pool(), owner.id).await?;
    Ok(Json(credit::summarize(&values)))
}
