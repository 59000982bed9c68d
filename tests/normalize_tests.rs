// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketdash::analytics::normalize::{Rejection, inspect, normalize};
use pocketdash::models::{Kind, RawAmount, RawRecord, UNCATEGORIZED};
use rust_decimal::Decimal;

fn rec(kind: Option<&str>, amount: Option<&str>, date: Option<&str>) -> RawRecord {
    RawRecord {
        id: Some("x".into()),
        kind: kind.map(|s| s.to_string()),
        amount: amount.map(RawAmount::from),
        category: Some("Food".into()),
        date: date.map(|s| s.to_string()),
        description: None,
    }
}

#[test]
fn accepts_well_formed_record() {
    let t = inspect(&rec(Some("Expense"), Some("12.34"), Some("2025-03-01"))).unwrap();
    assert_eq!(t.kind, Kind::Expense);
    assert_eq!(t.amount, Decimal::new(1234, 2));
    assert_eq!(t.date.to_string(), "2025-03-01");
    assert_eq!(t.id, "x");
}

#[test]
fn rejects_bad_amounts() {
    for (amount, expect_invalid) in [("abc", true), ("NaN", true), ("inf", true), ("", true)] {
        let err = inspect(&rec(Some("income"), Some(amount), Some("2025-03-01"))).unwrap_err();
        assert_eq!(matches!(err, Rejection::InvalidAmount(_)), expect_invalid, "{}", amount);
    }
    assert_eq!(
        inspect(&rec(Some("income"), Some("0"), Some("2025-03-01"))).unwrap_err(),
        Rejection::NonPositiveAmount(Decimal::ZERO)
    );
    assert!(matches!(
        inspect(&rec(Some("income"), Some("-3"), Some("2025-03-01"))).unwrap_err(),
        Rejection::NonPositiveAmount(_)
    ));
    assert_eq!(
        inspect(&rec(Some("income"), None, Some("2025-03-01"))).unwrap_err(),
        Rejection::MissingAmount
    );
}

#[test]
fn numeric_amounts_from_json() {
    let r: RawRecord = serde_json::from_str(
        r#"{"kind":"income","amount":1.5e3,"date":"2025-01-31"}"#,
    )
    .unwrap();
    let t = inspect(&r).unwrap();
    assert_eq!(t.amount, Decimal::new(1500, 0));
    assert_eq!(t.category, UNCATEGORIZED);
}

#[test]
fn rejects_bad_dates() {
    for date in ["2025-13-01", "2025-02-29", "03/15/2025", "yesterday", "2025-3-1"] {
        let err = inspect(&rec(Some("income"), Some("1"), Some(date))).unwrap_err();
        assert_eq!(err, Rejection::InvalidDate(date.to_string()));
    }
    assert_eq!(
        inspect(&rec(Some("income"), Some("1"), None)).unwrap_err(),
        Rejection::MissingDate
    );
    let leap = inspect(&rec(Some("income"), Some("1"), Some("2024-02-29"))).unwrap();
    assert_eq!(leap.date.to_string(), "2024-02-29");
    let stamp = inspect(&rec(Some("income"), Some("1"), Some("2025-03-15T23:59:59Z"))).unwrap();
    assert_eq!(stamp.date.to_string(), "2025-03-15");
}

#[test]
fn rejects_unknown_kinds() {
    assert_eq!(
        inspect(&rec(Some("transfer"), Some("1"), Some("2025-03-01"))).unwrap_err(),
        Rejection::UnknownKind("transfer".into())
    );
    assert_eq!(
        inspect(&rec(None, Some("1"), Some("2025-03-01"))).unwrap_err(),
        Rejection::MissingKind
    );
    assert!(inspect(&rec(Some(" INCOME "), Some("1"), Some("2025-03-01"))).is_ok());
}

#[test]
fn blank_category_becomes_uncategorized() {
    let mut r = rec(Some("expense"), Some("1"), Some("2025-03-01"));
    r.category = Some("   ".into());
    assert_eq!(inspect(&r).unwrap().category, UNCATEGORIZED);
    r.category = None;
    assert_eq!(inspect(&r).unwrap().category, UNCATEGORIZED);
}

#[test]
fn normalize_keeps_order_and_skips_bad_rows() {
    let rows = vec![
        RawRecord::new(Kind::Income, "1", Some("A"), "2025-01-01").with_id("1"),
        RawRecord::new(Kind::Income, "x", Some("B"), "2025-01-01").with_id("2"),
        RawRecord::new(Kind::Expense, "3", Some("C"), "2025-01-01").with_id("3"),
        RawRecord::new(Kind::Expense, "4", Some("D"), "bad").with_id("4"),
        RawRecord::new(Kind::Income, "5", Some("E"), "2024-12-31")
            .with_id("5")
            .with_description("bonus"),
    ];
    let out = normalize(rows.into_iter());
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
    assert_eq!(out[2].description.as_deref(), Some("bonus"));
}

#[test]
fn rejects_amounts_above_the_ceiling() {
    use pocketdash::analytics::normalize::MAX_AMOUNT;

    assert_eq!(MAX_AMOUNT, "1000000000000000".parse::<Decimal>().unwrap());
    let at_limit = inspect(&rec(Some("expense"), Some("1000000000000000"), Some("2025-03-01")));
    assert_eq!(at_limit.unwrap().amount, MAX_AMOUNT);

    let huge = "1000000000000000000000000000";
    assert_eq!(
        inspect(&rec(Some("expense"), Some(huge), Some("2025-03-01"))).unwrap_err(),
        Rejection::AmountTooLarge(huge.parse().unwrap())
    );
}

#[test]
fn loosely_typed_json_fields_do_not_drop_records() {
    let parse = |s: &str| serde_json::from_str::<RawRecord>(s).unwrap();

    let numeric_id = parse(r#"{"id":42,"kind":"expense","amount":10,"date":"2025-03-01"}"#);
    assert_eq!(numeric_id.id.as_deref(), Some("42"));

    let both_ids = parse(r#"{"_id":"a","id":"b","type":"expense","kind":"income","amount":20,"date":"2025-03-01"}"#);
    assert_eq!(both_ids.id.as_deref(), Some("a"));
    assert_eq!(both_ids.kind.as_deref(), Some("income"));

    let odd_category = parse(r#"{"kind":"expense","amount":30,"category":7,"description":false,"date":"2025-03-01"}"#);
    let t = inspect(&odd_category).unwrap();
    assert_eq!(t.category, UNCATEGORIZED);
    assert_eq!(t.description, None);

    let bool_amount = parse(r#"{"kind":"expense","amount":true,"date":"2025-03-01"}"#);
    assert_eq!(
        inspect(&bool_amount).unwrap_err(),
        Rejection::InvalidAmount("true".into())
    );
}
