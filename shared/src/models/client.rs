//! Client Model (customer with a running credit tab)

use crate::error::{AppError, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreate {
    pub store_id: i64,
    pub name: String,
    pub phone: String,
}

/// Update client payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Client ledger entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientValueType {
    /// Client owes (tab grows)
    #[serde(alias = "DEVE")]
    Deve,
    /// Client paid (tab shrinks)
    #[serde(alias = "PAGO")]
    Pago,
}

impl ClientValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deve => "deve",
            Self::Pago => "pago",
        }
    }
}

impl fmt::Display for ClientValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientValueType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deve" | "DEVE" => Ok(Self::Deve),
            "pago" | "PAGO" => Ok(Self::Pago),
            other => Err(AppError::with_message(
                ErrorCode::ValidationFailed,
                format!("Unknown client value type: {other}"),
            )),
        }
    }
}

/// Client ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValue {
    pub id: i64,
    pub client_id: i64,
    pub value: Decimal,
    #[serde(rename = "type")]
    pub value_type: ClientValueType,
    pub created_at: i64,
}

/// Create ledger entry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValueCreate {
    pub value: Decimal,
    #[serde(rename = "type")]
    pub value_type: ClientValueType,
}

/// Ledger entry as returned by the create endpoint
///
/// `warnings` carries bridge failures: the entry persisted but the matching
/// cash transaction could not be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValueCreated {
    #[serde(flatten)]
    pub value: ClientValue,
    /// Id of the synthesized cash transaction, when one was attached
    pub cash_transaction_id: Option<i64>,
    pub warnings: Vec<String>,
}

/// Client balance: `total = income - outcome`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    /// Sum of `pago` entries
    pub income: Decimal,
    /// Sum of `deve` entries
    pub outcome: Decimal,
    pub total: Decimal,
}
