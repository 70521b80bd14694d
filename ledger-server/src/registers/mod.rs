//! Register Lifecycle Manager
//!
//! [`RegisterManager`] fronts the lifecycle operations in [`lifecycle`]:
//! every successful mutation invalidates the store's read snapshot and
//! opening/closing are written to the audit log.
//!
//! Mutations run on their own task. A request that times out or whose
//! client disconnects stops waiting, but the write and its follow-up
//! (invalidation, audit) still finish together.

pub mod lifecycle;

use rust_decimal::Decimal;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::{
    CashRegister, CashRegisterDetail, CashTransaction, CashTransactionCreate,
    CashTransactionUpdate,
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::audit::{self, AuditAction, AuditEntry};
use crate::cache::TtlCache;
use crate::db::repository::{RepoError, cash_register, cash_transaction};
use crate::ledger::RegisterLedger;
use crate::utils::{AppError, AppResult};

/// Run `work` to completion on its own task, independent of the caller
pub(crate) async fn run_to_completion<T, F>(work: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.map_err(|e| {
        tracing::error!(error = %e, "Ledger mutation task did not complete");
        AppError::with_message(ErrorCode::InternalError, "Ledger mutation was interrupted")
    })?
}

/// Store id -> every register of the store with its transactions, newest first
pub type StoreSnapshot = Arc<Vec<RegisterLedger>>;

#[derive(Clone)]
pub struct RegisterManager {
    pool: SqlitePool,
    cache: TtlCache<i64, StoreSnapshot>,
    ttl: Duration,
}

impl RegisterManager {
    pub fn new(pool: SqlitePool, ttl: Duration) -> Self {
        Self {
            pool,
            cache: TtlCache::new(),
            ttl,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn cache(&self) -> &TtlCache<i64, StoreSnapshot> {
        &self.cache
    }

    pub async fn open(&self, store_id: i64, opening_amount: Decimal) -> AppResult<CashRegister> {
        let this = self.clone();
        run_to_completion(async move { this.open_now(store_id, opening_amount).await }).await
    }

    async fn open_now(&self, store_id: i64, opening_amount: Decimal) -> AppResult<CashRegister> {
        let register = lifecycle::open(&self.pool, store_id, opening_amount).await?;
        self.cache.invalidate(&store_id);

        tracing::info!(
            store_id,
            register_id = register.id,
            opening_amount = %register.opening_amount,
            "Cash register opened"
        );
        audit::record(
            &self.pool,
            AuditEntry::new(
                store_id,
                AuditAction::RegisterOpened,
                Some(register.id),
                json!({ "openingAmount": register.opening_amount }),
            ),
        )
        .await;

        Ok(register)
    }

    pub async fn attach(
        &self,
        register: &CashRegister,
        data: CashTransactionCreate,
    ) -> AppResult<CashTransaction> {
        let (this, register) = (self.clone(), register.clone());
        run_to_completion(async move { this.attach_now(&register, data).await }).await
    }

    async fn attach_now(
        &self,
        register: &CashRegister,
        data: CashTransactionCreate,
    ) -> AppResult<CashTransaction> {
        let txn = lifecycle::attach_transaction(&self.pool, register.id, data).await?;
        self.cache.invalidate(&register.store_id);
        tracing::debug!(
            store_id = register.store_id,
            register_id = register.id,
            transaction_id = txn.id,
            amount = %txn.amount,
            "Transaction attached"
        );
        Ok(txn)
    }

    pub async fn update(
        &self,
        register: &CashRegister,
        txn_id: i64,
        patch: CashTransactionUpdate,
    ) -> AppResult<CashTransaction> {
        let this = self.clone();
        let (register_id, store_id) = (register.id, register.store_id);
        run_to_completion(async move {
            let txn = lifecycle::update_transaction(&this.pool, register_id, txn_id, patch).await?;
            this.cache.invalidate(&store_id);
            Ok(txn)
        })
        .await
    }

    pub async fn remove(&self, register: &CashRegister, txn_id: i64) -> AppResult<()> {
        let this = self.clone();
        let (register_id, store_id) = (register.id, register.store_id);
        run_to_completion(async move {
            lifecycle::remove_transaction(&this.pool, register_id, txn_id).await?;
            this.cache.invalidate(&store_id);
            Ok(())
        })
        .await
    }

    pub async fn close(&self, register: &CashRegister) -> AppResult<CashRegister> {
        let (this, register) = (self.clone(), register.clone());
        run_to_completion(async move { this.close_now(&register).await }).await
    }

    async fn close_now(&self, register: &CashRegister) -> AppResult<CashRegister> {
        let closed = lifecycle::close(&self.pool, register.id).await?;
        self.cache.invalidate(&register.store_id);

        tracing::info!(
            store_id = closed.store_id,
            register_id = closed.id,
            closing_amount = ?closed.closing_amount,
            "Cash register closed"
        );
        audit::record(
            &self.pool,
            AuditEntry::new(
                closed.store_id,
                AuditAction::RegisterClosed,
                Some(closed.id),
                json!({
                    "totalIncoming": closed.total_incoming,
                    "totalOutgoing": closed.total_outgoing,
                    "profit": closed.profit,
                    "closingAmount": closed.closing_amount,
                }),
            ),
        )
        .await;

        Ok(closed)
    }

    pub async fn find(&self, register_id: i64) -> AppResult<CashRegister> {
        cash_register::find_by_id(&self.pool, register_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::RegisterNotFound).with_detail("register_id", register_id)
            })
    }

    /// The open register of a store, if any
    pub async fn current(&self, store_id: i64) -> AppResult<Option<CashRegister>> {
        Ok(cash_register::find_open(&self.pool, store_id).await?)
    }

    /// Register with transactions and totals recomputed from them
    pub async fn detail(&self, register: CashRegister) -> AppResult<CashRegisterDetail> {
        let transactions = cash_transaction::list_by_register(&self.pool, register.id).await?;
        Ok(RegisterLedger {
            register,
            transactions,
        }
        .into_detail())
    }

    /// Cached per-store view used by listings and history
    pub async fn snapshot(&self, store_id: i64) -> AppResult<StoreSnapshot> {
        let pool = self.pool.clone();
        self.cache
            .get_or_fetch(store_id, self.ttl, || load_snapshot(pool, store_id))
            .await
    }
}

async fn load_snapshot(pool: SqlitePool, store_id: i64) -> AppResult<StoreSnapshot> {
    // One read transaction so registers and transactions agree
    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    let registers = cash_register::list_by_store(&mut *tx, store_id).await?;
    let transactions = cash_transaction::list_by_store(&mut *tx, store_id).await?;
    tx.commit().await.map_err(RepoError::from)?;

    let mut by_register: HashMap<i64, Vec<CashTransaction>> = HashMap::new();
    for txn in transactions {
        by_register.entry(txn.cash_register_id).or_default().push(txn);
    }

    let ledgers = registers
        .into_iter()
        .map(|register| {
            let transactions = by_register.remove(&register.id).unwrap_or_default();
            RegisterLedger {
                register,
                transactions,
            }
        })
        .collect();

    Ok(Arc::new(ledgers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::audit_log;
    use crate::db::repository::test_support::{seed_store, test_pool};
    use shared::models::{PaymentMethod, TransactionType};

    fn sale(amount: &str) -> CashTransactionCreate {
        CashTransactionCreate {
            amount: amount.parse().unwrap(),
            transaction_type: TransactionType::Incoming,
            payment_method: PaymentMethod::Cash,
            description: None,
        }
    }

    async fn manager() -> RegisterManager {
        RegisterManager::new(test_pool().await, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_mutations_invalidate_snapshot() {
        let mgr = manager().await;
        let store = seed_store(mgr.pool(), "owner").await;

        assert!(mgr.snapshot(store.id).await.unwrap().is_empty());

        let reg = mgr.open(store.id, Decimal::ONE_HUNDRED).await.unwrap();
        let snap = mgr.snapshot(store.id).await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(snap[0].transactions.is_empty());

        let txn = mgr.attach(&reg, sale("12.50")).await.unwrap();
        let snap = mgr.snapshot(store.id).await.unwrap();
        assert_eq!(snap[0].transactions, vec![txn.clone()]);

        mgr.remove(&reg, txn.id).await.unwrap();
        assert!(mgr.snapshot(store.id).await.unwrap()[0].transactions.is_empty());

        mgr.close(&reg).await.unwrap();
        assert!(!mgr.snapshot(store.id).await.unwrap()[0].register.is_open);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cached_snapshot() {
        let mgr = manager().await;
        let store = seed_store(mgr.pool(), "owner").await;
        let reg = mgr.open(store.id, Decimal::ZERO).await.unwrap();
        let before = mgr.snapshot(store.id).await.unwrap();

        assert!(mgr.attach(&reg, sale("0")).await.is_err());
        let after = mgr.snapshot(store.id).await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_abandoned_close_still_invalidates_and_audits() {
        let mgr = manager().await;
        let store = seed_store(mgr.pool(), "owner").await;
        let reg = mgr.open(store.id, Decimal::TEN).await.unwrap();
        assert!(mgr.snapshot(store.id).await.unwrap()[0].register.is_open);

        let abandoned = tokio::time::timeout(Duration::ZERO, mgr.close(&reg)).await;
        assert!(abandoned.is_err());

        let mut closed = false;
        for _ in 0..200 {
            if !mgr.snapshot(store.id).await.unwrap()[0].register.is_open {
                closed = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(closed, "snapshot still shows the register open");

        let mut actions = Vec::new();
        for _ in 0..200 {
            actions = audit_log::list_by_store(mgr.pool(), store.id, 10, 0)
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.action)
                .collect();
            if actions.len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(actions, vec![AuditAction::RegisterClosed, AuditAction::RegisterOpened]);
    }

    #[tokio::test]
    async fn test_open_and_close_are_audited() {
        let mgr = manager().await;
        let store = seed_store(mgr.pool(), "owner").await;
        let reg = mgr.open(store.id, Decimal::TEN).await.unwrap();
        mgr.attach(&reg, sale("5")).await.unwrap();
        let closed = mgr.close(&reg).await.unwrap();
        assert_eq!(closed.closing_amount.unwrap().to_string(), "15.00");

        let entries = audit_log::list_by_store(mgr.pool(), store.id, 10, 0)
            .await
            .unwrap();
        let actions: Vec<_> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::RegisterClosed, AuditAction::RegisterOpened]);
        assert_eq!(entries[0].resource_id, Some(reg.id));
        assert_eq!(entries[0].details["closingAmount"], "15.00");
    }

    #[tokio::test]
    async fn test_detail_recomputes_live_totals() {
        let mgr = manager().await;
        let store = seed_store(mgr.pool(), "owner").await;
        let reg = mgr.open(store.id, Decimal::ONE_HUNDRED).await.unwrap();
        mgr.attach(&reg, sale("50")).await.unwrap();
        mgr.attach(
            &reg,
            CashTransactionCreate {
                amount: "20".parse().unwrap(),
                transaction_type: TransactionType::Outgoing,
                payment_method: PaymentMethod::Cash,
                description: Some("gelo".into()),
            },
        )
        .await
        .unwrap();

        let detail = mgr.detail(mgr.find(reg.id).await.unwrap()).await.unwrap();
        assert!(detail.register.is_open);
        assert_eq!(detail.transactions.len(), 2);
        assert_eq!(detail.live_totals.current_amount.to_string(), "130.00");
        assert_eq!(detail.breakdown.len(), 1);
        assert_eq!(detail.breakdown[0].count, 2);

        let err = mgr.find(reg.id + 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RegisterNotFound);
        assert_eq!(mgr.current(store.id).await.unwrap().map(|r| r.id), Some(reg.id));
    }
}
