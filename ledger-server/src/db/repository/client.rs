//! Client Repository

use super::RepoResult;
use shared::models::Client;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, store_id, name, phone, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    store_id: i64,
    name: String,
    phone: String,
    created_at: i64,
    updated_at: i64,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn create<'e, E>(executor: E, store_id: i64, name: &str, phone: &str) -> RepoResult<Client>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let client = Client {
        id: shared::util::snowflake_id(),
        store_id,
        name: name.to_string(),
        phone: phone.to_string(),
        created_at: now,
        updated_at: now,
    };
    sqlx::query(&format!("INSERT INTO clients ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"))
        .bind(client.id)
        .bind(client.store_id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(executor)
        .await?;
    Ok(client)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Client>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ClientRow>(&format!("SELECT {COLUMNS} FROM clients WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(Client::from))
}

/// Clients of a store, by name
pub async fn list_by_store<'e, E>(executor: E, store_id: i64) -> RepoResult<Vec<Client>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ClientRow>(&format!(
        "SELECT {COLUMNS} FROM clients WHERE store_id = ? ORDER BY name COLLATE NOCASE, id"
    ))
    .bind(store_id)
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Client::from).collect())
}

/// Update name/phone (absent fields keep their value)
pub async fn update<'e, E>(
    executor: E,
    id: i64,
    name: Option<&str>,
    phone: Option<&str>,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE clients SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), updated_at = ?3 \
         WHERE id = ?4",
    )
    .bind(name)
    .bind(phone)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
