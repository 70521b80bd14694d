//! Cash Register Model (one till session)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cash_transaction::CashTransaction;

/// Cash register entity
///
/// The four totals stay `None` while the register is open and are written
/// once, together with `is_open = false`, when it closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    pub id: i64,
    pub store_id: i64,
    pub opening_amount: Decimal,
    pub opening_date: i64,
    pub is_open: bool,
    pub closing_date: Option<i64>,
    pub total_incoming: Option<Decimal>,
    pub total_outgoing: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub closing_amount: Option<Decimal>,
}

/// Open register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterOpen {
    pub store_id: i64,
    pub opening_amount: Decimal,
}

/// Derived totals for one register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTotals {
    pub total_incoming: Decimal,
    pub total_outgoing: Decimal,
    pub profit: Decimal,
    /// Opening amount plus profit; the live balance while open
    pub current_amount: Decimal,
}

/// Amount attributed to one payment-method bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub payment_method: super::PaymentMethod,
    pub amount: Decimal,
    pub count: i64,
}

/// Register with its transactions and live aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterDetail {
    #[serde(flatten)]
    pub register: CashRegister,
    pub transactions: Vec<CashTransaction>,
    /// Recomputed from `transactions` on every read
    pub live_totals: RegisterTotals,
    pub breakdown: Vec<PaymentBreakdown>,
}
