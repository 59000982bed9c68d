// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketdash::analytics::normalize::Rejection;
use pocketdash::commands::importer;
use pocketdash::store::sqlite::{ListFilter, LocalStore};
use pocketdash::cli;
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    pocketdash::db::init_schema(&conn).unwrap();
    conn
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn imports_valid_rows_and_skips_bad_ones() {
    let mut conn = base_conn();
    let file = csv_file(
        "kind,date,amount,category,description\n\
         income,2025-03-01,2500.00,Salary,March pay\n\
         expense,2025-03-02,abc,Food,\n\
         expense,2025-03-03,42.10,,Groceries\n\
         transfer,2025-03-04,10,Misc,\n\
         expense,2025-02-30,5,Food,\n",
    );
    let path = file.path().to_str().unwrap();
    let report = importer::import_transactions(&mut conn, path).unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped.len(), 3);
    assert_eq!(report.skipped[0].0, 3);
    assert_eq!(report.skipped[0].1, Rejection::InvalidAmount("abc".into()));
    assert_eq!(report.skipped[1].1, Rejection::UnknownKind("transfer".into()));
    assert!(matches!(report.skipped[2].1, Rejection::InvalidDate(_)));

    let rows = LocalStore::new(&conn).list(&ListFilter::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].kind, "expense");
    assert_eq!(rows[0].category, "");
    assert_eq!(rows[0].description, "Groceries");
    assert_eq!(rows[1].amount, "2500.00");
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut conn = base_conn();
    let file = csv_file("kind,date,amount,category,description\nexpense,2025-02-03,5.00,Shop,\n");
    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);

    let matches = cli::build_cli().get_matches_from(["pocketdash", "import", "transactions", &padded]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn missing_file_is_an_error() {
    let mut conn = base_conn();
    assert!(importer::import_transactions(&mut conn, "/nonexistent/pocketdash.csv").is_err());
}
