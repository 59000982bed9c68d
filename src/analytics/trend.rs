// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, MonthlyPoint, Transaction, YearMonth};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// One point per requested month, in the order given. Months without
/// activity are zero-filled.
pub fn trend_series(transactions: &[Transaction], months: &[YearMonth]) -> Vec<MonthlyPoint> {
    let mut sums: BTreeMap<YearMonth, (Decimal, Decimal)> = months
        .iter()
        .map(|m| (*m, (Decimal::ZERO, Decimal::ZERO)))
        .collect();
    for tx in transactions {
        if let Some(entry) = sums.get_mut(&YearMonth::of(tx.date)) {
            match tx.kind {
                Kind::Income => entry.0 = entry.0.saturating_add(tx.amount),
                Kind::Expense => entry.1 = entry.1.saturating_add(tx.amount),
            }
        }
    }

    months
        .iter()
        .map(|m| {
            let (income, expense) = sums.get(m).copied().unwrap_or_default();
            MonthlyPoint {
                period: *m,
                period_label: m.label(),
                income_total: income,
                expense_total: expense,
                net_savings: income.saturating_sub(expense),
            }
        })
        .collect()
}
