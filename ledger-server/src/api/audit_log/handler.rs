//! Audit log API Handler

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::api::access::verify_store;
use crate::api::extract::ValidQuery;
use crate::audit::AuditEntry;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::audit_log;
use crate::utils::AppResult;

const MAX_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub store_id: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/audit
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> AppResult<Json<Vec<AuditEntry>>> {
    verify_store(&state, query.store_id, &user).await?;
    let entries = audit_log::list_by_store(
        state.pool(),
        query.store_id,
        query.limit.clamp(1, MAX_LIMIT),
        query.offset.max(0),
    )
    .await?;
    Ok(Json(entries))
}
