//! Ledger core
//!
//! Pure functions over registers and their transactions. Nothing here
//! touches storage; every total can be recomputed from the transaction log.

pub mod aggregator;
pub mod classifier;
pub mod history;

pub use aggregator::{Accumulator, aggregate, payment_breakdown};
pub use classifier::{Classification, classify};
pub use history::{DayTotals, HistoryQuery, HistoryReport, PeriodSummary, reduce_by_period};

use shared::models::{CashRegister, CashRegisterDetail, CashTransaction};

/// A register together with its full transaction list
#[derive(Debug, Clone)]
pub struct RegisterLedger {
    pub register: CashRegister,
    pub transactions: Vec<CashTransaction>,
}

impl RegisterLedger {
    /// Attach live totals and the payment breakdown
    pub fn into_detail(self) -> CashRegisterDetail {
        let mut acc = Accumulator::new();
        acc.extend(&self.transactions);
        CashRegisterDetail {
            live_totals: acc.totals(self.register.opening_amount),
            breakdown: acc.breakdown(),
            register: self.register,
            transactions: self.transactions,
        }
    }
}
