//! Client credit ledger
//!
//! Clients, their `deve`/`pago` entries and the bridge that mirrors new
//! entries into the store's open register.

pub mod bridge;
pub mod summary;

pub use bridge::{BridgeOutcome, on_client_value_created, synthesize};
pub use summary::summarize;

use shared::error::ErrorCode;
use shared::models::{Client, ClientCreate, ClientUpdate, ClientValue, ClientValueCreate, ClientValueCreated};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use crate::db::repository::{client, client_value};
use crate::registers::{RegisterManager, run_to_completion};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, money};

pub fn client_not_found(client_id: i64) -> AppError {
    AppError::new(ErrorCode::ClientNotFound).with_detail("client_id", client_id)
}

pub async fn find_client(pool: &SqlitePool, client_id: i64) -> AppResult<Client> {
    client::find_by_id(pool, client_id)
        .await?
        .ok_or_else(|| client_not_found(client_id))
}

pub async fn create_client(pool: &SqlitePool, data: ClientCreate) -> AppResult<Client> {
    let name = data.name.trim();
    let phone = data.phone.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let created = client::create(pool, data.store_id, name, phone).await?;
    tracing::info!(store_id = created.store_id, client_id = created.id, "Client created");
    Ok(created)
}

pub async fn update_client(pool: &SqlitePool, client_id: i64, data: ClientUpdate) -> AppResult<Client> {
    let name = data.name.as_deref().map(str::trim);
    let phone = data.phone.as_deref().map(str::trim);
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }

    if !client::update(pool, client_id, name, phone).await? {
        return Err(client_not_found(client_id));
    }
    find_client(pool, client_id).await
}

/// Persist a ledger entry, then mirror it into the open register.
///
/// The entry stands even when mirroring fails; the failure comes back as a
/// warning on the response. Both steps run on their own task, so a caller
/// that stops waiting can't leave an entry that was never mirrored nor
/// audited.
pub async fn record_client_value(
    registers: &RegisterManager,
    client: &Client,
    data: ClientValueCreate,
) -> AppResult<ClientValueCreated> {
    let value = money::require_positive(data.value, "value")?;
    let (registers, client) = (registers.clone(), client.clone());
    run_to_completion(async move {
        let entry = ClientValue {
            id: snowflake_id(),
            client_id: client.id,
            value,
            value_type: data.value_type,
            created_at: now_millis(),
        };
        client_value::insert(registers.pool(), &entry).await?;
        tracing::info!(
            store_id = client.store_id,
            client_id = client.id,
            client_value_id = entry.id,
            amount = %entry.value,
            value_type = %entry.value_type,
            "Client ledger entry recorded"
        );

        let (cash_transaction_id, warnings) =
            match on_client_value_created(&registers, &client, &entry).await {
                BridgeOutcome::Attached(txn) => (Some(txn.id), Vec::new()),
                BridgeOutcome::NoOpenRegister => (None, Vec::new()),
                BridgeOutcome::Failed(e) => (
                    None,
                    vec![format!(
                        "Ledger entry saved, but the cash register was not updated: {}",
                        e.message
                    )],
                ),
            };

        Ok(ClientValueCreated {
            value: entry,
            cash_transaction_id,
            warnings,
        })
    })
    .await
}

/// Remove a ledger entry. Any cash transaction it produced stays.
pub async fn delete_client_value(pool: &SqlitePool, client_id: i64, value_id: i64) -> AppResult<()> {
    if !client_value::delete(pool, client_id, value_id).await? {
        return Err(AppError::new(ErrorCode::ClientValueNotFound)
            .with_detail("client_id", client_id)
            .with_detail("value_id", value_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::db::repository::test_support::{seed_store, test_pool};
    use crate::db::repository::{audit_log, cash_transaction};
    use rust_decimal::Decimal;
    use shared::models::{ClientValueType, PaymentMethod, TransactionType};
    use std::time::Duration;

    async fn setup() -> (RegisterManager, Client) {
        let pool = test_pool().await;
        let store = seed_store(&pool, "owner").await;
        let c = create_client(
            &pool,
            ClientCreate {
                store_id: store.id,
                name: "  Seu Jorge ".into(),
                phone: "11 97777-0000".into(),
            },
        )
        .await
        .unwrap();
        (RegisterManager::new(pool, Duration::from_secs(300)), c)
    }

    fn entry(value: &str, ty: ClientValueType) -> ClientValueCreate {
        ClientValueCreate {
            value: value.parse().unwrap(),
            value_type: ty,
        }
    }

    #[tokio::test]
    async fn test_client_validation() {
        let (mgr, c) = setup().await;
        assert_eq!(c.name, "Seu Jorge");

        let err = create_client(
            mgr.pool(),
            ClientCreate {
                store_id: c.store_id,
                name: "   ".into(),
                phone: "1".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = update_client(mgr.pool(), c.id + 1, ClientUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientNotFound);
    }

    #[tokio::test]
    async fn test_deve_without_open_register_records_only_ledger() {
        let (mgr, c) = setup().await;
        let created = record_client_value(&mgr, &c, entry("25", ClientValueType::Deve))
            .await
            .unwrap();
        assert_eq!(created.cash_transaction_id, None);
        assert!(created.warnings.is_empty());
        assert_eq!(created.value.value.to_string(), "25.00");
        assert!(cash_transaction::list_by_store(mgr.pool(), c.store_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deve_with_open_register_is_mirrored_without_moving_cash() {
        let (mgr, c) = setup().await;
        let reg = mgr.open(c.store_id, Decimal::ZERO).await.unwrap();

        let created = record_client_value(&mgr, &c, entry("25", ClientValueType::Deve))
            .await
            .unwrap();
        let txn_id = created.cash_transaction_id.unwrap();

        let detail = mgr.detail(mgr.find(reg.id).await.unwrap()).await.unwrap();
        let txn = detail.transactions.iter().find(|t| t.id == txn_id).unwrap();
        assert_eq!(txn.transaction_type, TransactionType::FiadoPending);
        assert_eq!(txn.payment_method, PaymentMethod::Fiado);
        assert_eq!(txn.description.as_deref(), Some("Cliente: Seu Jorge"));
        assert_eq!(detail.live_totals.current_amount.to_string(), "0.00");
        assert_eq!(detail.breakdown[0].payment_method, PaymentMethod::Fiado);
    }

    #[tokio::test]
    async fn test_pago_with_open_register_adds_income_outside_breakdown() {
        let (mgr, c) = setup().await;
        let reg = mgr.open(c.store_id, Decimal::ZERO).await.unwrap();

        record_client_value(&mgr, &c, entry("10", ClientValueType::Pago))
            .await
            .unwrap();

        let detail = mgr.detail(mgr.find(reg.id).await.unwrap()).await.unwrap();
        assert_eq!(detail.live_totals.total_incoming.to_string(), "10.00");
        assert!(detail.breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_bridge_failure_keeps_entry_and_warns() {
        let (mgr, c) = setup().await;
        mgr.open(c.store_id, Decimal::ZERO).await.unwrap();
        sqlx::query(
            "CREATE TRIGGER reject_txn BEFORE INSERT ON cash_transactions \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END",
        )
        .execute(mgr.pool())
        .await
        .unwrap();

        let created = record_client_value(&mgr, &c, entry("25", ClientValueType::Deve))
            .await
            .unwrap();
        assert_eq!(created.cash_transaction_id, None);
        assert_eq!(created.warnings.len(), 1);

        let ledger = client_value::list_by_client(mgr.pool(), c.id).await.unwrap();
        assert_eq!(ledger, vec![created.value.clone()]);

        let audit = audit_log::list_by_store(mgr.pool(), c.store_id, 10, 0).await.unwrap();
        let failure = audit
            .iter()
            .find(|e| e.action == AuditAction::CreditBridgeFailed)
            .unwrap();
        assert_eq!(failure.resource_id, Some(created.value.id));
        assert_eq!(failure.details["paymentMethod"], "fiado");
        assert_eq!(failure.details["amount"], "25.00");
    }

    #[tokio::test]
    async fn test_abandoned_request_still_mirrors_and_audits() {
        let (mgr, c) = setup().await;
        mgr.open(c.store_id, Decimal::ZERO).await.unwrap();
        sqlx::query(
            "CREATE TRIGGER reject_txn BEFORE INSERT ON cash_transactions \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END",
        )
        .execute(mgr.pool())
        .await
        .unwrap();

        // The caller gives up right after the first poll
        let abandoned = tokio::time::timeout(
            Duration::ZERO,
            record_client_value(&mgr, &c, entry("25", ClientValueType::Deve)),
        )
        .await;
        assert!(abandoned.is_err());

        let mut failure = None;
        for _ in 0..200 {
            let audit = audit_log::list_by_store(mgr.pool(), c.store_id, 10, 0).await.unwrap();
            failure = audit
                .into_iter()
                .find(|e| e.action == AuditAction::CreditBridgeFailed);
            if failure.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let failure = failure.expect("bridge failure audited after the caller left");
        let ledger = client_value::list_by_client(mgr.pool(), c.id).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(failure.resource_id, Some(ledger[0].id));
    }

    #[tokio::test]
    async fn test_value_must_be_positive_and_delete_is_scoped() {
        let (mgr, c) = setup().await;
        let err = record_client_value(&mgr, &c, entry("0", ClientValueType::Pago))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);

        let created = record_client_value(&mgr, &c, entry("3", ClientValueType::Pago))
            .await
            .unwrap();
        let err = delete_client_value(mgr.pool(), c.id + 1, created.value.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientValueNotFound);
        delete_client_value(mgr.pool(), c.id, created.value.id).await.unwrap();
    }
}
