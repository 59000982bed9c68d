// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketdash::cli;
use pocketdash::commands::dashboard;
use pocketdash::config::{Settings, set_setting};
use pocketdash::models::{Confidence, Kind};
use pocketdash::store::sqlite::{LocalStore, NewTransaction};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    pocketdash::db::init_schema(&conn).unwrap();
    conn
}

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pocketdash", "dashboard"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    match m.subcommand() {
        Some(("dashboard", sub)) => sub.clone(),
        _ => panic!("no dashboard subcommand"),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn add(conn: &Connection, kind: Kind, amount: Decimal, date: &str, category: &str) {
    LocalStore::new(conn)
        .add(&NewTransaction {
            kind,
            amount,
            date: date.parse().unwrap(),
            category: Some(category.to_string()),
            description: None,
        })
        .unwrap();
}

#[test]
fn local_store_feeds_the_dashboard() {
    let conn = setup();
    add(&conn, Kind::Income, dec("3000"), "2025-01-05", "Salary");
    add(&conn, Kind::Income, dec("3000"), "2025-02-05", "Salary");
    add(&conn, Kind::Income, dec("3000"), "2025-03-05", "Salary");
    add(&conn, Kind::Expense, dec("1000"), "2025-01-10", "Rent");
    add(&conn, Kind::Expense, dec("1200"), "2025-02-10", "Rent");
    add(&conn, Kind::Expense, dec("800"), "2025-03-10", "Food");

    let sub = matches(&["--now", "2025-03-20", "--months", "3", "--top", "1"]);
    let d = dashboard::build(&conn, &sub, &Settings::default()).unwrap();

    assert_eq!(d.summary.total_income, dec("9000"));
    assert_eq!(d.summary.total_expenses, dec("3000"));
    assert_eq!(d.summary.current_income, dec("3000"));
    assert_eq!(d.summary.current_expense, dec("800"));
    assert_eq!(d.trend.len(), 3);
    assert_eq!(d.trend[0].period.to_string(), "2025-01");
    assert_eq!(d.top_expense_categories.len(), 1);
    assert_eq!(d.top_expense_categories[0].category, "Rent");
    assert_eq!(d.projection.confidence, Confidence::High);
    assert_eq!(d.projection.projected_expenses, dec("1000"));
}

#[test]
fn flags_override_stored_settings() {
    let conn = setup();
    set_setting(&conn, "window_months", "12").unwrap();
    set_setting(&conn, "top_k", "4").unwrap();
    let settings = Settings::load_with_env(&conn, |_| None).unwrap();

    let (now, opts) = dashboard::options(&matches(&["--now", "2024-06-01"]), &settings).unwrap();
    assert_eq!(now.to_string(), "2024-06-01");
    assert_eq!((opts.window_months, opts.top_k), (12, 4));

    let (_, opts) = dashboard::options(&matches(&["--months", "2"]), &settings).unwrap();
    assert_eq!((opts.window_months, opts.top_k), (2, 4));
}

#[test]
fn bad_reference_date_is_an_error() {
    let conn = setup();
    let sub = matches(&["--now", "20/03/2025"]);
    assert!(dashboard::build(&conn, &sub, &Settings::default()).is_err());
}

#[test]
fn json_input_file_is_analyzed() {
    let conn = setup();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"_id": "a", "type": "income", "amount": 1000, "category": "Job", "date": "2025-03-01"}},
            {{"_id": "b", "type": "expense", "amount": "250.50", "category": "Food", "date": "2025-03-02T10:00:00Z"}},
            {{"_id": "c", "type": "expense", "amount": "oops", "category": "Food", "date": "2025-03-02"}},
            "not a record"
        ]"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    let sub = matches(&["--now", "2025-03-15", "--input", path]);
    let d = dashboard::build(&conn, &sub, &Settings::default()).unwrap();
    assert_eq!(d.summary.transaction_count, 2);
    assert_eq!(d.summary.current_savings, dec("749.50"));
    assert_eq!(d.recent_expense[0].id, "b");
}

#[test]
fn non_array_input_is_rejected() {
    let conn = setup();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"transactions": []}}"#).unwrap();
    let path = file.path().to_str().unwrap();
    let sub = matches(&["--input", path]);
    assert!(dashboard::build(&conn, &sub, &Settings::default()).is_err());
}

#[test]
fn remote_without_api_url_is_an_error() {
    let conn = setup();
    let sub = matches(&["--remote"]);
    assert!(dashboard::build(&conn, &sub, &Settings::default()).is_err());
}
