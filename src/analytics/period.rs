// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::MAX_WINDOW_MONTHS;
use crate::models::{Transaction, YearMonth};
use chrono::NaiveDate;

/// Transactions dated in the calendar month of `now`.
pub fn current_period(transactions: &[Transaction], now: NaiveDate) -> Vec<&Transaction> {
    let month = YearMonth::of(now);
    transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .collect()
}

/// The `n` calendar months ending with the month of `now`, oldest first.
/// `n` is clamped to [`MAX_WINDOW_MONTHS`].
pub fn trend_window(now: NaiveDate, n: usize) -> Vec<YearMonth> {
    let n = n.min(MAX_WINDOW_MONTHS);
    let mut months = Vec::with_capacity(n);
    let mut cur = YearMonth::of(now);
    for _ in 0..n {
        months.push(cur);
        cur = cur.pred();
    }
    months.reverse();
    months
}
