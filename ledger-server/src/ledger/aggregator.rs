//! Register Aggregator
//!
//! `profit = incoming - outgoing`, `amount = opening + profit`. Pure and
//! re-derivable; the totals persisted at close come from here.

use rust_decimal::Decimal;
use shared::models::{CashTransaction, PaymentBreakdown, PaymentMethod, RegisterTotals};
use std::collections::BTreeMap;

use super::classifier::classify_transaction;

/// Running sums over classified transactions
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub incoming: Decimal,
    pub outgoing: Decimal,
    buckets: BTreeMap<PaymentMethod, (Decimal, i64)>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, txn: &CashTransaction) {
        let class = classify_transaction(txn);
        if class.counts_as_incoming {
            self.incoming += txn.amount;
        }
        if class.counts_as_outgoing {
            self.outgoing += txn.amount;
        }
        if let Some(bucket) = class.breakdown_bucket {
            let entry = self.buckets.entry(bucket).or_insert((Decimal::ZERO, 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }
    }

    pub fn extend<'a>(&mut self, txns: impl IntoIterator<Item = &'a CashTransaction>) {
        for txn in txns {
            self.add(txn);
        }
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: &Accumulator) {
        self.incoming += other.incoming;
        self.outgoing += other.outgoing;
        for (method, (amount, count)) in &other.buckets {
            let entry = self.buckets.entry(*method).or_insert((Decimal::ZERO, 0));
            entry.0 += *amount;
            entry.1 += *count;
        }
    }

    pub fn profit(&self) -> Decimal {
        self.incoming - self.outgoing
    }

    pub fn totals(&self, opening_amount: Decimal) -> RegisterTotals {
        let profit = self.profit();
        RegisterTotals {
            total_incoming: cents(self.incoming),
            total_outgoing: cents(self.outgoing),
            profit: cents(profit),
            current_amount: cents(opening_amount + profit),
        }
    }

    /// Breakdown entries in payment-method order
    pub fn breakdown(&self) -> Vec<PaymentBreakdown> {
        self.buckets
            .iter()
            .map(|(method, (amount, count))| PaymentBreakdown {
                payment_method: *method,
                amount: cents(*amount),
                count: *count,
            })
            .collect()
    }
}

/// Totals for one register from its transaction list
pub fn aggregate(opening_amount: Decimal, transactions: &[CashTransaction]) -> RegisterTotals {
    let mut acc = Accumulator::new();
    acc.extend(transactions);
    acc.totals(opening_amount)
}

/// Payment-method breakdown for one transaction list
pub fn payment_breakdown(transactions: &[CashTransaction]) -> Vec<PaymentBreakdown> {
    let mut acc = Accumulator::new();
    acc.extend(transactions);
    acc.breakdown()
}

fn cents(value: Decimal) -> Decimal {
    let mut v = value;
    v.rescale(2);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TransactionType;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn txn(amount: &str, ty: TransactionType, method: PaymentMethod) -> CashTransaction {
        CashTransaction {
            id: 0,
            cash_register_id: 1,
            amount: d(amount),
            transaction_type: ty,
            payment_method: method,
            description: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_empty_register_keeps_opening_amount() {
        let totals = aggregate(d("100.00"), &[]);
        assert_eq!(totals.total_incoming, Decimal::ZERO);
        assert_eq!(totals.total_outgoing, Decimal::ZERO);
        assert_eq!(totals.profit, Decimal::ZERO);
        assert_eq!(totals.current_amount, d("100.00"));
    }

    #[test]
    fn test_incoming_and_outgoing_cash() {
        let txns = vec![
            txn("50", TransactionType::Incoming, PaymentMethod::Cash),
            txn("20", TransactionType::Outgoing, PaymentMethod::Cash),
        ];
        let totals = aggregate(d("100.00"), &txns);
        assert_eq!(totals.total_incoming.to_string(), "50.00");
        assert_eq!(totals.total_outgoing.to_string(), "20.00");
        assert_eq!(totals.profit.to_string(), "30.00");
        assert_eq!(totals.current_amount.to_string(), "130.00");

        let breakdown = payment_breakdown(&txns);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].payment_method, PaymentMethod::Cash);
        assert_eq!(breakdown[0].amount, d("70.00"));
        assert_eq!(breakdown[0].count, 2);
    }

    #[test]
    fn test_fiado_pending_only_shows_in_breakdown() {
        let txns = vec![txn("40", TransactionType::FiadoPending, PaymentMethod::Fiado)];
        let totals = aggregate(d("80.00"), &txns);
        assert_eq!(totals.total_incoming, Decimal::ZERO);
        assert_eq!(totals.total_outgoing, Decimal::ZERO);
        assert_eq!(totals.profit, Decimal::ZERO);
        assert_eq!(totals.current_amount, d("80.00"));

        let breakdown = payment_breakdown(&txns);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].payment_method, PaymentMethod::Fiado);
        assert_eq!(breakdown[0].amount.to_string(), "40.00");
    }

    #[test]
    fn test_fiado_payment_counts_but_is_not_broken_down() {
        let txns = vec![
            txn("15.50", TransactionType::Incoming, PaymentMethod::FiadoPayment),
            txn("4.50", TransactionType::Incoming, PaymentMethod::Pix),
        ];
        let totals = aggregate(d("0"), &txns);
        assert_eq!(totals.total_incoming, d("20.00"));
        let breakdown = payment_breakdown(&txns);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].payment_method, PaymentMethod::Pix);
    }

    #[test]
    fn test_cent_sums_are_exact() {
        let txns: Vec<_> = (0..10)
            .map(|_| txn("0.10", TransactionType::Incoming, PaymentMethod::Cash))
            .collect();
        let totals = aggregate(d("0.20"), &txns);
        assert_eq!(totals.total_incoming.to_string(), "1.00");
        assert_eq!(totals.current_amount.to_string(), "1.20");
    }

    #[test]
    fn test_profit_can_be_negative() {
        let txns = vec![txn("30", TransactionType::Outgoing, PaymentMethod::DebitCard)];
        let totals = aggregate(d("10.00"), &txns);
        assert_eq!(totals.profit, d("-30.00"));
        assert_eq!(totals.current_amount, d("-20.00"));
    }

    #[test]
    fn test_merge_equals_single_pass() {
        let a = vec![
            txn("10", TransactionType::Incoming, PaymentMethod::Cash),
            txn("40", TransactionType::FiadoPending, PaymentMethod::Fiado),
        ];
        let b = vec![
            txn("5", TransactionType::Outgoing, PaymentMethod::Cash),
            txn("7", TransactionType::Incoming, PaymentMethod::FiadoPayment),
        ];

        let mut left = Accumulator::new();
        left.extend(&a);
        let mut right = Accumulator::new();
        right.extend(&b);
        left.merge(&right);

        let mut all = Accumulator::new();
        all.extend(a.iter().chain(b.iter()));

        assert_eq!(left.totals(d("1")), all.totals(d("1")));
        assert_eq!(left.breakdown(), all.breakdown());
    }
}
