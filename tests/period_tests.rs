// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketdash::analytics::normalize::normalize;
use pocketdash::analytics::period::{current_period, trend_window};
use pocketdash::analytics::trend::trend_series;
use pocketdash::models::{Kind, RawRecord, YearMonth};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn window_wraps_year() {
    let months: Vec<String> = trend_window(d(2025, 4, 30), 6)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(
        months,
        vec!["2024-11", "2024-12", "2025-01", "2025-02", "2025-03", "2025-04"]
    );
}

#[test]
fn window_sizes() {
    assert!(trend_window(d(2025, 1, 1), 0).is_empty());
    assert_eq!(trend_window(d(2025, 1, 1), 1), vec![YearMonth::new(2025, 1).unwrap()]);
    let long = trend_window(d(2025, 1, 1), 25);
    assert_eq!(long.len(), 25);
    assert_eq!(long[0].to_string(), "2023-01");
    assert!(long.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn current_period_matches_month_and_year() {
    let txs = normalize(vec![
        RawRecord::new(Kind::Income, "1", None, "2025-03-01"),
        RawRecord::new(Kind::Income, "2", None, "2024-03-15"),
        RawRecord::new(Kind::Income, "3", None, "2025-03-31"),
        RawRecord::new(Kind::Income, "4", None, "2025-04-01"),
        RawRecord::new(Kind::Income, "5", None, "2025-02-28"),
    ]);
    let cur = current_period(&txs, d(2025, 3, 10));
    let amounts: Vec<String> = cur.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["1", "3"]);
}

#[test]
fn trend_zero_fills_and_ignores_outside_months() {
    let txs = normalize(vec![
        RawRecord::new(Kind::Income, "100", None, "2025-01-10"),
        RawRecord::new(Kind::Expense, "30", None, "2025-03-10"),
        RawRecord::new(Kind::Expense, "999", None, "2024-06-10"),
    ]);
    let months = trend_window(d(2025, 3, 10), 3);
    let pts = trend_series(&txs, &months);
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[0].income_total, Decimal::from(100));
    assert!(pts[1].income_total.is_zero() && pts[1].expense_total.is_zero());
    assert_eq!(pts[1].period_label, "Feb 2025");
    assert_eq!(pts[2].expense_total, Decimal::from(30));
    assert_eq!(pts[2].net_savings, Decimal::from(-30));
}

#[test]
fn year_month_parse_and_order() {
    let a: YearMonth = "2024-12".parse().unwrap();
    let b: YearMonth = "2025-01".parse().unwrap();
    assert!(a < b);
    assert_eq!(a.succ(), b);
    assert_eq!(b.pred(), a);
    assert!("2025-13".parse::<YearMonth>().is_err());
    assert!("202501".parse::<YearMonth>().is_err());
    assert_eq!(a.label(), "Dec 2024");
}
