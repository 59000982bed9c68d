// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard analytics over a snapshot of transactions.
//!
//! Everything in this module is pure: no I/O, no clock reads, no logging.
//! The reference date is always passed in by the caller, and the same input
//! always produces the same [`DashboardAnalytics`].

pub mod categories;
pub mod normalize;
pub mod period;
pub mod projection;
pub mod ranking;
pub mod summary;
pub mod totals;
pub mod trend;

use crate::error::AnalyticsError;
use crate::models::{DashboardAnalytics, Kind, RawRecord, Transaction};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_WINDOW_MONTHS: usize = 6;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_RECENT_LIMIT: usize = 5;
/// Longest trend window; larger requests are clamped to it.
pub const MAX_WINDOW_MONTHS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsOptions {
    pub window_months: usize,
    pub top_k: usize,
    pub recent_limit: usize,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        AnalyticsOptions {
            window_months: DEFAULT_WINDOW_MONTHS,
            top_k: DEFAULT_TOP_K,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

pub fn compute_analytics<I>(
    records: I,
    now: NaiveDate,
    opts: &AnalyticsOptions,
) -> DashboardAnalytics
where
    I: IntoIterator,
    I::Item: AsRef<RawRecord>,
{
    let txs = normalize::normalize(records);
    analyze(&txs, now, opts)
}

/// Same as [`compute_analytics`] for an untyped JSON document.
///
/// The document must be an array. Elements that are not transaction-shaped
/// are dropped like any other invalid record.
pub fn compute_analytics_json(
    value: &serde_json::Value,
    now: NaiveDate,
    opts: &AnalyticsOptions,
) -> Result<DashboardAnalytics, AnalyticsError> {
    let items = value
        .as_array()
        .ok_or_else(|| AnalyticsError::NotACollection(json_kind(value)))?;
    let records = items
        .iter()
        .filter_map(|v| serde_json::from_value::<RawRecord>(v.clone()).ok());
    Ok(compute_analytics(records, now, opts))
}

/// Runs every calculator over already normalized transactions.
pub fn analyze(txs: &[Transaction], now: NaiveDate, opts: &AnalyticsOptions) -> DashboardAnalytics {
    let all = totals::totals(txs);
    let income_by_category = categories::breakdown(txs, Kind::Income);
    let expense_by_category = categories::breakdown(txs, Kind::Expense);

    let current = period::current_period(txs, now);
    let months = period::trend_window(now, opts.window_months);
    let trend = trend::trend_series(txs, &months);

    let summary = summary::summarize(&all, &current);
    let top_income_categories =
        ranking::top_categories(&income_by_category, opts.top_k, all.for_kind(Kind::Income));
    let top_expense_categories =
        ranking::top_categories(&expense_by_category, opts.top_k, all.for_kind(Kind::Expense));
    let projection = projection::project(&trend);

    DashboardAnalytics {
        summary,
        income_by_category,
        expense_by_category,
        trend,
        top_income_categories,
        top_expense_categories,
        projection,
        recent_income: recent(txs, Kind::Income, opts.recent_limit),
        recent_expense: recent(txs, Kind::Expense, opts.recent_limit),
    }
}

/// Latest transactions of a kind, newest first; same-day entries keep input order.
pub fn recent(txs: &[Transaction], kind: Kind, limit: usize) -> Vec<Transaction> {
    let mut items: Vec<&Transaction> = txs.iter().filter(|t| t.kind == kind).collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.into_iter().take(limit).cloned().collect()
}

/// `part / whole * 100` to one decimal place, or zero when `whole` is zero.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        })
        .map(|p| p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
