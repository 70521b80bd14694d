//! Client Value Repository (client credit ledger)

use super::{RepoError, RepoResult, money_col};
use crate::utils::money;
use shared::models::ClientValue;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, client_id, value, type, created_at";

#[derive(sqlx::FromRow)]
struct ClientValueRow {
    id: i64,
    client_id: i64,
    value: String,
    #[sqlx(rename = "type")]
    value_type: String,
    created_at: i64,
}

impl TryFrom<ClientValueRow> for ClientValue {
    type Error = RepoError;

    fn try_from(row: ClientValueRow) -> RepoResult<Self> {
        Ok(ClientValue {
            id: row.id,
            client_id: row.client_id,
            value: money_col(&row.value, "value")?,
            value_type: row
                .value_type
                .parse()
                .map_err(|e: shared::AppError| RepoError::Database(e.message))?,
            created_at: row.created_at,
        })
    }
}

pub async fn insert<'e, E>(executor: E, value: &ClientValue) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(&format!("INSERT INTO client_values ({COLUMNS}) VALUES (?, ?, ?, ?, ?)"))
        .bind(value.id)
        .bind(value.client_id)
        .bind(money::to_db(value.value))
        .bind(value.value_type.as_str())
        .bind(value.created_at)
        .execute(executor)
        .await?;
    Ok(())
}

/// Ledger entries of a client, newest first
pub async fn list_by_client<'e, E>(executor: E, client_id: i64) -> RepoResult<Vec<ClientValue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ClientValueRow>(&format!(
        "SELECT {COLUMNS} FROM client_values WHERE client_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(client_id)
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(ClientValue::try_from).collect()
}

pub async fn delete<'e, E>(executor: E, client_id: i64, value_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM client_values WHERE id = ? AND client_id = ?")
        .bind(value_id)
        .bind(client_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}
