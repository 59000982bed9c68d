// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::totals::{Totals, totals};
use super::{percent_of, round_money};
use crate::models::{PeriodSummary, Transaction};
use rust_decimal::Decimal;

/// Combines whole-history totals with the current month.
pub fn summarize(all: &Totals, current: &[&Transaction]) -> PeriodSummary {
    let cur = totals(current.iter().copied());
    let current_savings = cur.income.saturating_sub(cur.expenses);

    PeriodSummary {
        total_income: all.income,
        total_expenses: all.expenses,
        net_balance: all.net,
        current_income: cur.income,
        current_expense: cur.expenses,
        current_savings,
        savings_rate_percent: percent_of(current_savings, cur.income),
        average_income: average(all.income, all.income_count),
        average_expense: average(all.expenses, all.expense_count),
        transaction_count: all.income_count + all.expense_count,
        income_count: all.income_count,
        expense_count: all.expense_count,
        is_empty: all.income_count + all.expense_count == 0,
    }
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::new(0, 2);
    }
    round_money(total / Decimal::from(count))
}
