//! Ownership checks shared by handlers
//!
//! A resource the caller does not own answers exactly like a missing one.

use shared::error::ErrorCode;
use shared::models::{CashRegister, Client, Store};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::credit;
use crate::db::repository::store;
use crate::utils::{AppError, AppResult};

pub async fn verify_store(state: &ServerState, store_id: i64, user: &CurrentUser) -> AppResult<Store> {
    store::find_owned(state.pool(), store_id, &user.user_id)
        .await?
        .ok_or_else(AppError::store_not_found)
}

pub async fn owned_register(
    state: &ServerState,
    register_id: i64,
    user: &CurrentUser,
) -> AppResult<CashRegister> {
    let register = state.registers.find(register_id).await?;
    if store::find_owned(state.pool(), register.store_id, &user.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::RegisterNotFound).with_detail("register_id", register_id));
    }
    Ok(register)
}

pub async fn owned_client(state: &ServerState, client_id: i64, user: &CurrentUser) -> AppResult<Client> {
    let client = credit::find_client(state.pool(), client_id).await?;
    if store::find_owned(state.pool(), client.store_id, &user.user_id)
        .await?
        .is_none()
    {
        return Err(credit::client_not_found(client_id));
    }
    Ok(client)
}
