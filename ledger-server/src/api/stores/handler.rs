//! Store API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Store, StoreCreate};

use crate::api::access::verify_store;
use crate::api::extract::ValidJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::store;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// POST /api/stores
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<StoreCreate>,
) -> AppResult<(StatusCode, Json<Store>)> {
    let name = payload.name.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    let created = store::create(state.pool(), &user.user_id, name).await?;
    tracing::info!(store_id = created.id, owner = %user.user_id, "Store created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/stores
pub async fn list(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<Store>>> {
    let stores = store::list_by_owner(state.pool(), &user.user_id).await?;
    Ok(Json(stores))
}

/// GET /api/stores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    Ok(Json(verify_store(&state, id, &user).await?))
}
