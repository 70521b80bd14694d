//! Transaction Classifier
//!
//! Maps `(type, payment_method)` to its effect on register totals and on
//! the payment-method breakdown. Rules, first match wins:
//!
//! 1. `fiado` + `fiado_pending`: no cash moved; reported under `fiado`
//! 2. `fiado_payment`: incoming cash; left out of the breakdown so the
//!    original `fiado` debt is not counted twice
//! 3. anything else: counted by its type, reported under its own method

use shared::models::{CashTransaction, PaymentMethod, TransactionType};

/// Effect of one transaction on the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub counts_as_incoming: bool,
    pub counts_as_outgoing: bool,
    /// `None` when excluded from the payment breakdown
    pub breakdown_bucket: Option<PaymentMethod>,
}

impl Classification {
    pub fn include_in_breakdown(&self) -> bool {
        self.breakdown_bucket.is_some()
    }
}

pub fn classify(transaction_type: TransactionType, payment_method: PaymentMethod) -> Classification {
    match (transaction_type, payment_method) {
        (TransactionType::FiadoPending, PaymentMethod::Fiado) => Classification {
            counts_as_incoming: false,
            counts_as_outgoing: false,
            breakdown_bucket: Some(PaymentMethod::Fiado),
        },
        (_, PaymentMethod::FiadoPayment) => Classification {
            counts_as_incoming: true,
            counts_as_outgoing: false,
            breakdown_bucket: None,
        },
        (ty, method) => Classification {
            counts_as_incoming: ty == TransactionType::Incoming,
            counts_as_outgoing: ty == TransactionType::Outgoing,
            breakdown_bucket: Some(method),
        },
    }
}

pub fn classify_transaction(txn: &CashTransaction) -> Classification {
    classify(txn.transaction_type, txn.payment_method)
}
