//! Store Repository

use super::RepoResult;
use shared::models::Store;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, name, owner_id, created_at";

pub async fn create<'e, E>(executor: E, owner_id: &str, name: &str) -> RepoResult<Store>
where
    E: Executor<'e, Database = Sqlite>,
{
    let store = Store {
        id: shared::util::snowflake_id(),
        name: name.to_string(),
        owner_id: owner_id.to_string(),
        created_at: shared::util::now_millis(),
    };
    sqlx::query(
        "INSERT INTO stores (id, name, owner_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(store.id)
    .bind(&store.name)
    .bind(&store.owner_id)
    .bind(store.created_at)
    .execute(executor)
    .await?;
    Ok(store)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Store>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let store = sqlx::query_as::<_, (i64, String, String, i64)>(&format!(
        "SELECT {COLUMNS} FROM stores WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(store.map(into_store))
}

/// Store only when owned by `owner_id`
pub async fn find_owned<'e, E>(executor: E, id: i64, owner_id: &str) -> RepoResult<Option<Store>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let store = sqlx::query_as::<_, (i64, String, String, i64)>(&format!(
        "SELECT {COLUMNS} FROM stores WHERE id = ? AND owner_id = ?"
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await?;
    Ok(store.map(into_store))
}

pub async fn list_by_owner<'e, E>(executor: E, owner_id: &str) -> RepoResult<Vec<Store>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stores = sqlx::query_as::<_, (i64, String, String, i64)>(&format!(
        "SELECT {COLUMNS} FROM stores WHERE owner_id = ? ORDER BY created_at, id"
    ))
    .bind(owner_id)
    .fetch_all(executor)
    .await?;
    Ok(stores.into_iter().map(into_store).collect())
}

/// Write to the store row; used to take the write lock first in a transaction
pub async fn touch<'e, E>(executor: E, id: i64, now: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE stores SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

fn into_store((id, name, owner_id, created_at): (i64, String, String, i64)) -> Store {
    Store {
        id,
        name,
        owner_id,
        created_at,
    }
}
