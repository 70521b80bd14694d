//! Monetary values
//!
//! All money is `Decimal` with exactly two fractional digits. Amounts
//! arrive from JSON as strings or numbers, are checked here and leave as
//! canonical TEXT (`"12.50"`) for storage.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::{AppError, AppResult};

/// Monetary scale (cents)
pub const MONEY_SCALE: u32 = 2;

/// Upper bound for any single amount
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_192, 23, 0, false, 2); // 1_000_000_000.00

/// Rescale to two decimals, rejecting sub-cent precision
///
/// Trailing zeros are fine (`"1.500"`), significant third decimals are not
/// (`"1.505"`): nothing is rounded silently.
fn to_cents(amount: Decimal, field: &str) -> AppResult<Decimal> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(AppError::invalid_amount(
            field,
            format!("{field} has more than {MONEY_SCALE} decimal places: {amount}"),
        ));
    }
    let mut value = if amount.is_zero() { Decimal::ZERO } else { amount };
    value.rescale(MONEY_SCALE);
    Ok(value)
}

/// Normalize an amount entered by a caller
///
/// Single entries are capped at [`MAX_AMOUNT`]. Sums (register totals) are
/// not, so this is never applied to stored values.
pub fn normalize(amount: Decimal, field: &str) -> AppResult<Decimal> {
    let value = to_cents(amount, field)?;
    if value.abs() > MAX_AMOUNT {
        return Err(AppError::invalid_amount(
            field,
            format!("{field} exceeds the maximum of {MAX_AMOUNT}"),
        ));
    }
    Ok(value)
}

fn parse_decimal(raw: &str, field: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        AppError::invalid_amount(field, format!("{field} is not a decimal number: {raw:?}"))
    })
}

/// Parse a textual amount strictly
pub fn parse_money(raw: &str, field: &str) -> AppResult<Decimal> {
    normalize(parse_decimal(raw, field)?, field)
}

/// Amount must be > 0
pub fn require_positive(amount: Decimal, field: &str) -> AppResult<Decimal> {
    let value = normalize(amount, field)?;
    if value <= Decimal::ZERO {
        return Err(AppError::invalid_amount(
            field,
            format!("{field} must be greater than zero"),
        ));
    }
    Ok(value)
}

/// Amount must be >= 0
pub fn require_non_negative(amount: Decimal, field: &str) -> AppResult<Decimal> {
    let value = normalize(amount, field)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::invalid_amount(
            field,
            format!("{field} must not be negative"),
        ));
    }
    Ok(value)
}

/// Canonical storage form
pub fn to_db(amount: Decimal) -> String {
    let mut value = amount;
    value.rescale(MONEY_SCALE);
    value.to_string()
}

/// Parse a stored amount; a corrupt value is a storage fault, not user input
///
/// Only the format is checked: totals may legitimately exceed [`MAX_AMOUNT`].
pub fn from_db(raw: &str, column: &str) -> Result<Decimal, String> {
    parse_decimal(raw, column)
        .and_then(|amount| to_cents(amount, column))
        .map_err(|e| format!("corrupt {column} value {raw:?}: {}", e.message))
}
