// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Next-month estimate from the tail of the trend series.
//!
//! History starts at the first month with any activity; empty months before
//! it are not counted. The last (up to) three history months are averaged.

use super::round_money;
use crate::models::{Confidence, MonthlyPoint, Projection};
use rust_decimal::Decimal;

pub const TRAILING_MONTHS: usize = 3;

pub fn project(trend: &[MonthlyPoint]) -> Projection {
    let first_active = trend
        .iter()
        .position(|p| !p.income_total.is_zero() || !p.expense_total.is_zero());
    let history = match first_active {
        Some(i) => &trend[i..],
        None => &[][..],
    };
    let used = &history[history.len().saturating_sub(TRAILING_MONTHS)..];

    let (income, expenses) = if used.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let n = Decimal::from(used.len());
        let inc = used
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.income_total));
        let exp = used
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.expense_total));
        (round_money(inc / n), round_money(exp / n))
    };

    Projection {
        projected_income: income,
        projected_expenses: expenses,
        projected_savings: income.saturating_sub(expenses),
        confidence: confidence_for(used.len()),
        months_used: used.len(),
    }
}

pub fn confidence_for(months: usize) -> Confidence {
    match months {
        0 | 1 => Confidence::Low,
        2 => Confidence::Medium,
        _ => Confidence::High,
    }
}
