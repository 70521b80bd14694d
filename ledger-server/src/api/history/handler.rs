//! History API Handler

use axum::{Json, extract::State};
use chrono::Days;
use serde::Deserialize;

use crate::api::access::verify_store;
use crate::api::extract::ValidQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::ledger::{HistoryQuery, HistoryReport, reduce_by_period};
use crate::utils::time;
use crate::utils::{AppError, AppResult};

/// Default window when `startDate` is omitted
const DEFAULT_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub store_id: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub closed_only: Option<bool>,
}

/// GET /api/history
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidQuery(params): ValidQuery<Params>,
) -> AppResult<Json<HistoryReport>> {
    let tz = state.tz();
    let end = match params.end_date.as_deref() {
        Some(s) => time::parse_date(s)?,
        None => time::today(tz),
    };
    let start = match params.start_date.as_deref() {
        Some(s) => time::parse_date(s)?,
        None => end.checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS)).unwrap_or(end),
    };
    if start > end {
        return Err(AppError::validation(format!(
            "startDate {start} is after endDate {end}"
        )));
    }

    verify_store(&state, params.store_id, &user).await?;
    let snapshot = state.registers.snapshot(params.store_id).await?;
    let query = HistoryQuery {
        start,
        end,
        closed_only: params.closed_only.unwrap_or(true),
        tz,
    };
    Ok(Json(reduce_by_period(&snapshot, &query)))
}
