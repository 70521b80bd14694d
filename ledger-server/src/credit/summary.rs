//! Client balance

use rust_decimal::Decimal;
use shared::models::{ClientSummary, ClientValue, ClientValueType};

/// `income` sums `pago`, `outcome` sums `deve`, `total = income - outcome`.
/// A negative total means the client still owes the store.
pub fn summarize(values: &[ClientValue]) -> ClientSummary {
    let (income, outcome) =
        values
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, out), v| match v.value_type {
                ClientValueType::Pago => (inc + v.value, out),
                ClientValueType::Deve => (inc, out + v.value),
            });

    let mut summary = ClientSummary {
        income,
        outcome,
        total: income - outcome,
    };
    summary.income.rescale(2);
    summary.outcome.rescale(2);
    summary.total.rescale(2);
    summary
}
