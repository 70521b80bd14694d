//! Cash Register API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{
    CashRegister, CashRegisterDetail, CashRegisterOpen, CashTransaction, CashTransactionCreate,
    CashTransactionUpdate,
};

use crate::api::access::{owned_register, verify_store};
use crate::api::extract::{ValidJson, ValidQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::cash_transaction;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub store_id: i64,
    /// Only `transactions` is supported
    pub include: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreQuery {
    pub store_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegisterListing {
    Plain(Vec<CashRegister>),
    WithTransactions(Vec<CashRegisterDetail>),
}

/// POST /api/registers - open a register
pub async fn open(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<CashRegisterOpen>,
) -> AppResult<(StatusCode, Json<CashRegister>)> {
    verify_store(&state, payload.store_id, &user).await?;
    let register = state
        .registers
        .open(payload.store_id, payload.opening_amount)
        .await?;
    Ok((StatusCode::CREATED, Json(register)))
}

/// GET /api/registers?storeId=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> AppResult<Json<RegisterListing>> {
    let with_transactions = match query.include.as_deref() {
        None | Some("") => false,
        Some("transactions") => true,
        Some(other) => {
            return Err(AppError::validation(format!("Unsupported include: {other}")));
        }
    };
    verify_store(&state, query.store_id, &user).await?;

    let snapshot = state.registers.snapshot(query.store_id).await?;
    let listing = if with_transactions {
        RegisterListing::WithTransactions(
            snapshot.iter().cloned().map(|l| l.into_detail()).collect(),
        )
    } else {
        RegisterListing::Plain(snapshot.iter().map(|l| l.register.clone()).collect())
    };
    Ok(Json(listing))
}

/// GET /api/registers/current?storeId=
pub async fn get_current(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidQuery(query): ValidQuery<StoreQuery>,
) -> AppResult<Json<Option<CashRegisterDetail>>> {
    verify_store(&state, query.store_id, &user).await?;
    let detail = match state.registers.current(query.store_id).await? {
        Some(register) => Some(state.registers.detail(register).await?),
        None => None,
    };
    Ok(Json(detail))
}

/// GET /api/registers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CashRegisterDetail>> {
    let register = owned_register(&state, id, &user).await?;
    Ok(Json(state.registers.detail(register).await?))
}

/// PATCH /api/registers/{id}/close
pub async fn close(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CashRegister>> {
    let register = owned_register(&state, id, &user).await?;
    Ok(Json(state.registers.close(&register).await?))
}

/// GET /api/registers/{id}/transactions
pub async fn list_transactions(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CashTransaction>>> {
    let register = owned_register(&state, id, &user).await?;
    let transactions = cash_transaction::list_by_register(state.pool(), register.id).await?;
    Ok(Json(transactions))
}

/// POST /api/registers/{id}/transactions
pub async fn attach_transaction(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<CashTransactionCreate>,
) -> AppResult<(StatusCode, Json<CashTransaction>)> {
    let register = owned_register(&state, id, &user).await?;
    let txn = state.registers.attach(&register, payload).await?;
    Ok((StatusCode::CREATED, Json(txn)))
}

/// PATCH /api/registers/{id}/transactions/{txn_id}
pub async fn update_transaction(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, txn_id)): Path<(i64, i64)>,
    ValidJson(payload): ValidJson<CashTransactionUpdate>,
) -> AppResult<Json<CashTransaction>> {
    let register = owned_register(&state, id, &user).await?;
    Ok(Json(state.registers.update(&register, txn_id, payload).await?))
}

/// DELETE /api/registers/{id}/transactions/{txn_id}
pub async fn remove_transaction(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, txn_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    let register = owned_register(&state, id, &user).await?;
    state.registers.remove(&register, txn_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
