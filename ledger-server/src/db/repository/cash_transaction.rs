//! Cash Transaction Repository

use super::{RepoError, RepoResult, money_col};
use crate::utils::money;
use shared::models::CashTransaction;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, cash_register_id, amount, type, payment_method, description, created_at";

#[derive(sqlx::FromRow)]
struct CashTransactionRow {
    id: i64,
    cash_register_id: i64,
    amount: String,
    #[sqlx(rename = "type")]
    transaction_type: String,
    payment_method: String,
    description: Option<String>,
    created_at: i64,
}

impl TryFrom<CashTransactionRow> for CashTransaction {
    type Error = RepoError;

    fn try_from(row: CashTransactionRow) -> RepoResult<Self> {
        Ok(CashTransaction {
            id: row.id,
            cash_register_id: row.cash_register_id,
            amount: money_col(&row.amount, "amount")?,
            transaction_type: row
                .transaction_type
                .parse()
                .map_err(|e: shared::AppError| RepoError::Database(e.message))?,
            payment_method: row
                .payment_method
                .parse()
                .map_err(|e: shared::AppError| RepoError::Database(e.message))?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

fn convert_all(rows: Vec<CashTransactionRow>) -> RepoResult<Vec<CashTransaction>> {
    rows.into_iter().map(CashTransaction::try_from).collect()
}

pub async fn insert<'e, E>(executor: E, txn: &CashTransaction) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO cash_transactions (id, cash_register_id, amount, type, payment_method, description, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(txn.id)
    .bind(txn.cash_register_id)
    .bind(money::to_db(txn.amount))
    .bind(txn.transaction_type.as_str())
    .bind(txn.payment_method.as_str())
    .bind(&txn.description)
    .bind(txn.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Transaction by id, only if it belongs to `register_id`
pub async fn find_in_register<'e, E>(
    executor: E,
    register_id: i64,
    txn_id: i64,
) -> RepoResult<Option<CashTransaction>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, CashTransactionRow>(&format!(
        "SELECT {COLUMNS} FROM cash_transactions WHERE id = ? AND cash_register_id = ?"
    ))
    .bind(txn_id)
    .bind(register_id)
    .fetch_optional(executor)
    .await?;
    row.map(CashTransaction::try_from).transpose()
}

/// Transactions of one register, newest first
pub async fn list_by_register<'e, E>(
    executor: E,
    register_id: i64,
) -> RepoResult<Vec<CashTransaction>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CashTransactionRow>(&format!(
        "SELECT {COLUMNS} FROM cash_transactions WHERE cash_register_id = ? \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(register_id)
    .fetch_all(executor)
    .await?;
    convert_all(rows)
}

/// Every transaction of every register of a store, newest first
pub async fn list_by_store<'e, E>(executor: E, store_id: i64) -> RepoResult<Vec<CashTransaction>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CashTransactionRow>(
        "SELECT t.id, t.cash_register_id, t.amount, t.type, t.payment_method, t.description, t.created_at \
         FROM cash_transactions t JOIN cash_registers r ON r.id = t.cash_register_id \
         WHERE r.store_id = ? ORDER BY t.created_at DESC, t.id DESC",
    )
    .bind(store_id)
    .fetch_all(executor)
    .await?;
    convert_all(rows)
}

/// Overwrite the mutable fields; `false` if the row is not in the register
pub async fn update<'e, E>(executor: E, txn: &CashTransaction) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE cash_transactions SET amount = ?, type = ?, payment_method = ?, description = ? \
         WHERE id = ? AND cash_register_id = ?",
    )
    .bind(money::to_db(txn.amount))
    .bind(txn.transaction_type.as_str())
    .bind(txn.payment_method.as_str())
    .bind(&txn.description)
    .bind(txn.id)
    .bind(txn.cash_register_id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete<'e, E>(executor: E, register_id: i64, txn_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM cash_transactions WHERE id = ? AND cash_register_id = ?")
        .bind(txn_id)
        .bind(register_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}
