//! Audit trail
//!
//! Append-only operator log. Writes are best effort: a failed audit write
//! is logged and never fails the operation that triggered it.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::repository::audit_log;

/// Audited operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    RegisterOpened,
    RegisterClosed,
    /// Client ledger entry persisted but its cash transaction was not
    CreditBridgeFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterOpened => "register_opened",
            Self::RegisterClosed => "register_closed",
            Self::CreditBridgeFailed => "credit_bridge_failed",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register_opened" => Ok(Self::RegisterOpened),
            "register_closed" => Ok(Self::RegisterClosed),
            "credit_bridge_failed" => Ok(Self::CreditBridgeFailed),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: i64,
    pub store_id: i64,
    pub action: AuditAction,
    /// Register or client value the entry is about
    pub resource_id: Option<i64>,
    pub details: serde_json::Value,
    pub created_at: i64,
}

impl AuditEntry {
    pub fn new(
        store_id: i64,
        action: AuditAction,
        resource_id: Option<i64>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: shared::util::snowflake_id(),
            store_id,
            action,
            resource_id,
            details,
            created_at: shared::util::now_millis(),
        }
    }
}

/// Append an entry; failures are logged and swallowed
pub async fn record(pool: &SqlitePool, entry: AuditEntry) {
    if let Err(e) = audit_log::insert(pool, &entry).await {
        tracing::error!(
            store_id = entry.store_id,
            action = entry.action.as_str(),
            error = %e,
            "Failed to write audit entry"
        );
    }
}
