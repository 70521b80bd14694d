//! Audit Log Repository

use super::{RepoError, RepoResult};
use crate::audit::{AuditAction, AuditEntry};
use sqlx::{Executor, Sqlite};

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: i64,
    store_id: i64,
    action: String,
    resource_id: Option<i64>,
    details: String,
    created_at: i64,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = RepoError;

    fn try_from(row: AuditRow) -> RepoResult<Self> {
        Ok(AuditEntry {
            id: row.id,
            store_id: row.store_id,
            action: row
                .action
                .parse::<AuditAction>()
                .map_err(RepoError::Database)?,
            resource_id: row.resource_id,
            details: serde_json::from_str(&row.details)
                .map_err(|e| RepoError::Database(format!("corrupt audit details: {e}")))?,
            created_at: row.created_at,
        })
    }
}

pub async fn insert<'e, E>(executor: E, entry: &AuditEntry) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO audit_log (id, store_id, action, resource_id, details, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.id)
    .bind(entry.store_id)
    .bind(entry.action.as_str())
    .bind(entry.resource_id)
    .bind(entry.details.to_string())
    .bind(entry.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Entries of a store, newest first
pub async fn list_by_store<'e, E>(
    executor: E,
    store_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<AuditEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, AuditRow>(
        "SELECT id, store_id, action, resource_id, details, created_at FROM audit_log \
         WHERE store_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(store_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(AuditEntry::try_from).collect()
}
