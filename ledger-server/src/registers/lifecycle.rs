//! Register Lifecycle
//!
//! `Open -> Closed`, never reopened. Each state change runs in one SQLite
//! transaction whose first statement is a guarding write: the store row
//! for `open`, the register row (`WHERE is_open = 1`) for everything else.
//! The write lock is therefore held before the guard is evaluated.

use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    CashRegister, CashTransaction, CashTransactionCreate, CashTransactionUpdate,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{RepoError, cash_register, cash_transaction, store};
use crate::ledger::aggregate;
use crate::utils::validation::{MAX_NOTE_LEN, normalize_optional_text, validate_optional_text};
use crate::utils::{AppError, AppResult, money};

fn storage(err: sqlx::Error) -> AppError {
    RepoError::from(err).into()
}

fn register_not_found(register_id: i64) -> AppError {
    AppError::new(ErrorCode::RegisterNotFound).with_detail("register_id", register_id)
}

fn transaction_not_found(register_id: i64, txn_id: i64) -> AppError {
    AppError::new(ErrorCode::TransactionNotFound)
        .with_detail("register_id", register_id)
        .with_detail("transaction_id", txn_id)
}

/// Lock an open register for writing, or explain why it can't be.
async fn guard_open(
    conn: &mut SqliteConnection,
    register_id: i64,
    now: i64,
    closed: ErrorCode,
) -> AppResult<()> {
    if cash_register::touch_open(&mut *conn, register_id, now).await? {
        return Ok(());
    }
    match cash_register::find_by_id(&mut *conn, register_id).await? {
        None => Err(register_not_found(register_id)),
        Some(_) => Err(AppError::new(closed).with_detail("register_id", register_id)),
    }
}

/// Open a register for `store_id`. Fails if one is already open.
pub async fn open(
    pool: &SqlitePool,
    store_id: i64,
    opening_amount: Decimal,
) -> AppResult<CashRegister> {
    let opening_amount = money::require_non_negative(opening_amount, "openingAmount")?;
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(storage)?;
    if !store::touch(&mut *tx, store_id, now).await? {
        return Err(AppError::store_not_found());
    }
    if cash_register::find_open(&mut *tx, store_id).await?.is_some() {
        return Err(AppError::register_already_open(store_id));
    }
    let register = match cash_register::insert_open(&mut *tx, store_id, opening_amount, now).await
    {
        Ok(register) => register,
        // Unique index backstop
        Err(RepoError::Duplicate(_)) => return Err(AppError::register_already_open(store_id)),
        Err(e) => return Err(e.into()),
    };
    tx.commit().await.map_err(storage)?;

    Ok(register)
}

pub async fn attach_transaction(
    pool: &SqlitePool,
    register_id: i64,
    data: CashTransactionCreate,
) -> AppResult<CashTransaction> {
    let amount = money::require_positive(data.amount, "amount")?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(storage)?;
    guard_open(&mut tx, register_id, now, ErrorCode::RegisterClosed).await?;

    let txn = CashTransaction {
        id: snowflake_id(),
        cash_register_id: register_id,
        amount,
        transaction_type: data.transaction_type,
        payment_method: data.payment_method,
        description: normalize_optional_text(data.description),
        created_at: now,
    };
    cash_transaction::insert(&mut *tx, &txn).await?;
    tx.commit().await.map_err(storage)?;

    Ok(txn)
}

pub async fn update_transaction(
    pool: &SqlitePool,
    register_id: i64,
    txn_id: i64,
    patch: CashTransactionUpdate,
) -> AppResult<CashTransaction> {
    let amount = patch
        .amount
        .map(|a| money::require_positive(a, "amount"))
        .transpose()?;
    if let Some(description) = &patch.description {
        validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    }
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(storage)?;
    guard_open(&mut tx, register_id, now, ErrorCode::RegisterClosed).await?;

    let mut txn = cash_transaction::find_in_register(&mut *tx, register_id, txn_id)
        .await?
        .ok_or_else(|| transaction_not_found(register_id, txn_id))?;
    if let Some(amount) = amount {
        txn.amount = amount;
    }
    if let Some(ty) = patch.transaction_type {
        txn.transaction_type = ty;
    }
    if let Some(method) = patch.payment_method {
        txn.payment_method = method;
    }
    if let Some(description) = patch.description {
        txn.description = normalize_optional_text(description);
    }

    if !cash_transaction::update(&mut *tx, &txn).await? {
        return Err(transaction_not_found(register_id, txn_id));
    }
    tx.commit().await.map_err(storage)?;

    Ok(txn)
}

pub async fn remove_transaction(pool: &SqlitePool, register_id: i64, txn_id: i64) -> AppResult<()> {
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(storage)?;
    guard_open(&mut tx, register_id, now, ErrorCode::RegisterClosed).await?;
    if !cash_transaction::delete(&mut *tx, register_id, txn_id).await? {
        return Err(transaction_not_found(register_id, txn_id));
    }
    tx.commit().await.map_err(storage)?;

    Ok(())
}

/// Close the register, persisting totals recomputed from its transactions
pub async fn close(pool: &SqlitePool, register_id: i64) -> AppResult<CashRegister> {
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(storage)?;
    guard_open(&mut tx, register_id, now, ErrorCode::RegisterAlreadyClosed).await?;

    let register = cash_register::find_by_id(&mut *tx, register_id)
        .await?
        .ok_or_else(|| register_not_found(register_id))?;
    let transactions = cash_transaction::list_by_register(&mut *tx, register_id).await?;
    let totals = aggregate(register.opening_amount, &transactions);

    if !cash_register::finalize(&mut *tx, register_id, now, &totals).await? {
        return Err(AppError::new(ErrorCode::RegisterAlreadyClosed)
            .with_detail("register_id", register_id));
    }
    tx.commit().await.map_err(storage)?;

    Ok(CashRegister {
        is_open: false,
        closing_date: Some(now),
        total_incoming: Some(totals.total_incoming),
        total_outgoing: Some(totals.total_outgoing),
        profit: Some(totals.profit),
        closing_amount: Some(totals.current_amount),
        ..register
    })
}
