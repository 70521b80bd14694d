//! Client-Credit Bridge
//!
//! Mirrors each new client ledger entry into the store's open register:
//!
//! | entry  | transaction type | payment method  |
//! |--------|------------------|-----------------|
//! | `deve` | `fiado_pending`  | `fiado`         |
//! | `pago` | `incoming`       | `fiado_payment` |
//!
//! The ledger entry is already committed when the bridge runs; a bridge
//! failure never rolls it back. Failures are logged and audited instead.

use serde_json::json;
use shared::models::{
    CashTransaction, CashTransactionCreate, Client, ClientValue, ClientValueType, PaymentMethod,
    TransactionType,
};

use crate::audit::{self, AuditAction, AuditEntry};
use crate::registers::RegisterManager;
use crate::utils::AppError;

pub const DESCRIPTION_PREFIX: &str = "Cliente: ";

/// What happened to the register side of a client ledger entry
#[derive(Debug)]
pub enum BridgeOutcome {
    Attached(CashTransaction),
    /// No register open for the store; nothing to mirror into
    NoOpenRegister,
    Failed(AppError),
}

/// Cash transaction equivalent of a ledger entry
pub fn synthesize(client: &Client, value: &ClientValue) -> CashTransactionCreate {
    let (transaction_type, payment_method) = match value.value_type {
        ClientValueType::Deve => (TransactionType::FiadoPending, PaymentMethod::Fiado),
        ClientValueType::Pago => (TransactionType::Incoming, PaymentMethod::FiadoPayment),
    };
    CashTransactionCreate {
        amount: value.value,
        transaction_type,
        payment_method,
        description: Some(format!("{DESCRIPTION_PREFIX}{}", client.name)),
    }
}

pub async fn on_client_value_created(
    registers: &RegisterManager,
    client: &Client,
    value: &ClientValue,
) -> BridgeOutcome {
    let register = match registers.current(client.store_id).await {
        Ok(Some(register)) => register,
        Ok(None) => {
            tracing::debug!(
                store_id = client.store_id,
                client_value_id = value.id,
                "No open register, ledger entry not mirrored"
            );
            return BridgeOutcome::NoOpenRegister;
        }
        Err(e) => return failed(registers, client, value, e).await,
    };

    match registers.attach(&register, synthesize(client, value)).await {
        Ok(txn) => {
            tracing::info!(
                store_id = client.store_id,
                register_id = register.id,
                client_id = client.id,
                transaction_id = txn.id,
                amount = %txn.amount,
                "Client ledger entry mirrored into register"
            );
            BridgeOutcome::Attached(txn)
        }
        Err(e) => failed(registers, client, value, e).await,
    }
}

async fn failed(
    registers: &RegisterManager,
    client: &Client,
    value: &ClientValue,
    error: AppError,
) -> BridgeOutcome {
    let intended = synthesize(client, value);
    tracing::warn!(
        store_id = client.store_id,
        client_id = client.id,
        client_value_id = value.id,
        amount = %value.value,
        error = %error,
        "Client ledger entry saved but register transaction failed"
    );
    audit::record(
        registers.pool(),
        AuditEntry::new(
            client.store_id,
            AuditAction::CreditBridgeFailed,
            Some(value.id),
            json!({
                "clientId": client.id,
                "clientName": client.name,
                "clientValueId": value.id,
                "valueType": value.value_type,
                "amount": value.value,
                "transactionType": intended.transaction_type,
                "paymentMethod": intended.payment_method,
                "code": error.code,
                "error": error.message,
            }),
        ),
    )
    .await;
    BridgeOutcome::Failed(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn client() -> Client {
        Client {
            id: 1,
            store_id: 2,
            name: "Dona Maria".into(),
            phone: "11 98888-7777".into(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn value(ty: ClientValueType) -> ClientValue {
        ClientValue {
            id: 3,
            client_id: 1,
            value: Decimal::new(2500, 2),
            value_type: ty,
            created_at: 0,
        }
    }

    #[test]
    fn test_deve_becomes_fiado_pending() {
        let txn = synthesize(&client(), &value(ClientValueType::Deve));
        assert_eq!(txn.transaction_type, TransactionType::FiadoPending);
        assert_eq!(txn.payment_method, PaymentMethod::Fiado);
        assert_eq!(txn.amount, Decimal::new(2500, 2));
        assert_eq!(txn.description.as_deref(), Some("Cliente: Dona Maria"));
    }

    #[test]
    fn test_pago_becomes_fiado_payment_income() {
        let txn = synthesize(&client(), &value(ClientValueType::Pago));
        assert_eq!(txn.transaction_type, TransactionType::Incoming);
        assert_eq!(txn.payment_method, PaymentMethod::FiadoPayment);
    }
}
