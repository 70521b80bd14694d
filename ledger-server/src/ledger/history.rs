//! History / Analytics Reducer
//!
//! Groups registers by the local calendar day they were opened, merges
//! registers of the same day, and accumulates a period-wide payment
//! breakdown. Days are returned most recent first.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::PaymentBreakdown;
use std::collections::BTreeMap;

use super::RegisterLedger;
use super::aggregator::Accumulator;
use crate::utils::time::{day_end_millis, day_start_millis, local_date};

/// Period filter
#[derive(Debug, Clone, Copy)]
pub struct HistoryQuery {
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
    pub closed_only: bool,
    pub tz: Tz,
}

/// Merged totals of all registers opened on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub date: NaiveDate,
    /// `dd/MM`
    pub label: String,
    pub register_count: i64,
    pub opening_amount: Decimal,
    pub total_incoming: Decimal,
    pub total_outgoing: Decimal,
    pub profit: Decimal,
    pub closing_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub register_count: i64,
    pub opening_amount: Decimal,
    pub total_incoming: Decimal,
    pub total_outgoing: Decimal,
    pub profit: Decimal,
    pub closing_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub per_day: Vec<DayTotals>,
    pub payment_methods: Vec<PaymentBreakdown>,
    pub summary: PeriodSummary,
}

#[derive(Default)]
struct DayBucket {
    count: i64,
    opening: Decimal,
    acc: Accumulator,
}

pub fn reduce_by_period(registers: &[RegisterLedger], query: &HistoryQuery) -> HistoryReport {
    let from = day_start_millis(query.start, query.tz);
    let until = day_end_millis(query.end, query.tz);

    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for ledger in registers {
        let reg = &ledger.register;
        if reg.opening_date < from || reg.opening_date >= until {
            continue;
        }
        if query.closed_only && reg.is_open {
            continue;
        }
        let bucket = days.entry(local_date(reg.opening_date, query.tz)).or_default();
        bucket.count += 1;
        bucket.opening += reg.opening_amount;
        bucket.acc.extend(&ledger.transactions);
    }

    let mut period = Accumulator::new();
    let mut period_opening = Decimal::ZERO;
    let mut period_count = 0;
    let mut per_day = Vec::with_capacity(days.len());

    for (date, bucket) in days.iter().rev() {
        let totals = bucket.acc.totals(bucket.opening);
        per_day.push(DayTotals {
            date: *date,
            label: date.format("%d/%m").to_string(),
            register_count: bucket.count,
            opening_amount: totals.current_amount - totals.profit,
            total_incoming: totals.total_incoming,
            total_outgoing: totals.total_outgoing,
            profit: totals.profit,
            closing_amount: totals.current_amount,
        });
        period.merge(&bucket.acc);
        period_opening += bucket.opening;
        period_count += bucket.count;
    }

    let totals = period.totals(period_opening);
    HistoryReport {
        per_day,
        payment_methods: period.breakdown(),
        summary: PeriodSummary {
            start_date: query.start,
            end_date: query.end,
            register_count: period_count,
            opening_amount: totals.current_amount - totals.profit,
            total_incoming: totals.total_incoming,
            total_outgoing: totals.total_outgoing,
            profit: totals.profit,
            closing_amount: totals.current_amount,
        },
    }
}
