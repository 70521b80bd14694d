//! Cash Register Repository
//!
//! Guards are conditional writes (`WHERE id = ? AND is_open = 1`) checked
//! through `rows_affected`.

use super::{RepoResult, money_col, opt_money_col};
use crate::utils::money;
use rust_decimal::Decimal;
use shared::models::{CashRegister, RegisterTotals};
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, store_id, opening_amount, opening_date, is_open, closing_date, \
                       total_incoming, total_outgoing, profit, closing_amount";

#[derive(sqlx::FromRow)]
struct CashRegisterRow {
    id: i64,
    store_id: i64,
    opening_amount: String,
    opening_date: i64,
    is_open: bool,
    closing_date: Option<i64>,
    total_incoming: Option<String>,
    total_outgoing: Option<String>,
    profit: Option<String>,
    closing_amount: Option<String>,
}

impl TryFrom<CashRegisterRow> for CashRegister {
    type Error = super::RepoError;

    fn try_from(row: CashRegisterRow) -> RepoResult<Self> {
        Ok(CashRegister {
            id: row.id,
            store_id: row.store_id,
            opening_amount: money_col(&row.opening_amount, "opening_amount")?,
            opening_date: row.opening_date,
            is_open: row.is_open,
            closing_date: row.closing_date,
            total_incoming: opt_money_col(row.total_incoming.as_deref(), "total_incoming")?,
            total_outgoing: opt_money_col(row.total_outgoing.as_deref(), "total_outgoing")?,
            profit: opt_money_col(row.profit.as_deref(), "profit")?,
            closing_amount: opt_money_col(row.closing_amount.as_deref(), "closing_amount")?,
        })
    }
}

fn convert_all(rows: Vec<CashRegisterRow>) -> RepoResult<Vec<CashRegister>> {
    rows.into_iter().map(CashRegister::try_from).collect()
}

/// Insert a new open register. The partial unique index rejects a second
/// open register for the same store with `RepoError::Duplicate`.
pub async fn insert_open<'e, E>(
    executor: E,
    store_id: i64,
    opening_amount: Decimal,
    now: i64,
) -> RepoResult<CashRegister>
where
    E: Executor<'e, Database = Sqlite>,
{
    let register = CashRegister {
        id: shared::util::snowflake_id(),
        store_id,
        opening_amount,
        opening_date: now,
        is_open: true,
        closing_date: None,
        total_incoming: None,
        total_outgoing: None,
        profit: None,
        closing_amount: None,
    };
    sqlx::query(
        "INSERT INTO cash_registers (id, store_id, opening_amount, opening_date, is_open, updated_at) \
         VALUES (?1, ?2, ?3, ?4, 1, ?4)",
    )
    .bind(register.id)
    .bind(store_id)
    .bind(money::to_db(opening_amount))
    .bind(now)
    .execute(executor)
    .await?;
    Ok(register)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<CashRegister>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, CashRegisterRow>(&format!(
        "SELECT {COLUMNS} FROM cash_registers WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    row.map(CashRegister::try_from).transpose()
}

pub async fn find_open<'e, E>(executor: E, store_id: i64) -> RepoResult<Option<CashRegister>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, CashRegisterRow>(&format!(
        "SELECT {COLUMNS} FROM cash_registers WHERE store_id = ? AND is_open = 1 LIMIT 1"
    ))
    .bind(store_id)
    .fetch_optional(executor)
    .await?;
    row.map(CashRegister::try_from).transpose()
}

/// All registers of a store, newest first
pub async fn list_by_store<'e, E>(executor: E, store_id: i64) -> RepoResult<Vec<CashRegister>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CashRegisterRow>(&format!(
        "SELECT {COLUMNS} FROM cash_registers WHERE store_id = ? ORDER BY opening_date DESC, id DESC"
    ))
    .bind(store_id)
    .fetch_all(executor)
    .await?;
    convert_all(rows)
}

pub async fn count_open<'e, E>(executor: E, store_id: i64) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM cash_registers WHERE store_id = ? AND is_open = 1")
            .bind(store_id)
            .fetch_one(executor)
            .await?;
    Ok(count)
}

/// Write to an open register only. `false` means missing or closed.
pub async fn touch_open<'e, E>(executor: E, id: i64, now: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE cash_registers SET updated_at = ? WHERE id = ? AND is_open = 1")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Close the register and persist its totals in one statement
pub async fn finalize<'e, E>(
    executor: E,
    id: i64,
    closing_date: i64,
    totals: &RegisterTotals,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE cash_registers SET is_open = 0, closing_date = ?1, total_incoming = ?2, \
         total_outgoing = ?3, profit = ?4, closing_amount = ?5, updated_at = ?1 \
         WHERE id = ?6 AND is_open = 1",
    )
    .bind(closing_date)
    .bind(money::to_db(totals.total_incoming))
    .bind(money::to_db(totals.total_outgoing))
    .bind(money::to_db(totals.profit))
    .bind(money::to_db(totals.current_amount))
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
