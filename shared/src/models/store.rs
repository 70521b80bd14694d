//! Store Model (tenant boundary)

use serde::{Deserialize, Serialize};

/// Store entity; owns registers and clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    /// Account id forwarded by the identity provider
    pub owner_id: String,
    pub created_at: i64,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCreate {
    pub name: String,
}
