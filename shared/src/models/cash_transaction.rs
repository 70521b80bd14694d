//! Cash Transaction Model (register ledger entry)

use crate::error::{AppError, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction type
///
/// `fiado_pending` records a sale on credit: the goods left, no cash came
/// in. The legacy client-flow spelling `deve` is accepted as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Incoming,
    Outgoing,
    #[serde(alias = "deve", alias = "DEVE")]
    FiadoPending,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [Self::Incoming, Self::Outgoing, Self::FiadoPending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::FiadoPending => "fiado_pending",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            "fiado_pending" | "deve" | "DEVE" => Ok(Self::FiadoPending),
            other => Err(AppError::with_message(
                ErrorCode::InvalidTransactionType,
                format!("Unknown transaction type: {other}"),
            )),
        }
    }
}

/// Payment method; doubles as the breakdown bucket for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Pix,
    Va,
    Vr,
    /// Goods handed over on the client's tab
    Fiado,
    /// Client settling a previous tab
    FiadoPayment,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 8] = [
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::Pix,
        Self::Va,
        Self::Vr,
        Self::Fiado,
        Self::FiadoPayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Pix => "pix",
            Self::Va => "va",
            Self::Vr => "vr",
            Self::Fiado => "fiado",
            Self::FiadoPayment => "fiado_payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidPaymentMethod,
                    format!("Unknown payment method: {s}"),
                )
            })
    }
}

/// Cash transaction entity, owned by exactly one register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTransaction {
    pub id: i64,
    pub cash_register_id: i64,
    /// Always > 0; direction comes from `transaction_type`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Attach transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTransactionCreate {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update transaction payload (absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTransactionUpdate {
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub payment_method: Option<PaymentMethod>,
    /// Absent: unchanged. `null`: cleared.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

/// A present field, `null` included, becomes `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
