// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::normalize::{Rejection, inspect};
use crate::models::{RawAmount, RawRecord};
use crate::store::sqlite::{LocalStore, NewTransaction};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use tracing::warn;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let report = import_transactions(conn, path)?;
            println!(
                "Imported {} transactions from {} ({} skipped)",
                report.imported,
                path,
                report.skipped.len()
            );
            for (line, why) in &report.skipped {
                println!("  line {}: {}", line, why);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// CSV line number and the reason the row was left out.
    pub skipped: Vec<(u64, Rejection)>,
}

/// Reads `kind,date,amount,category,description` rows. Rows that would not
/// count towards the dashboard are skipped; everything else is written in a
/// single SQL transaction.
pub fn import_transactions(conn: &mut Connection, path: &str) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let store = LocalStore::new(&tx);
    let mut report = ImportReport::default();

    for result in rdr.records() {
        let rec = result.with_context(|| format!("Read CSV {}", path))?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let field = |i: usize| rec.get(i).filter(|s| !s.is_empty()).map(|s| s.to_string());
        let raw = RawRecord {
            id: None,
            kind: field(0),
            date: field(1),
            amount: field(2).map(RawAmount::Text),
            category: field(3),
            description: field(4),
        };
        match inspect(&raw) {
            Ok(t) => {
                store.add(&NewTransaction {
                    kind: t.kind,
                    amount: t.amount,
                    date: t.date,
                    category: raw.category.clone(),
                    description: t.description,
                })?;
                report.imported += 1;
            }
            Err(why) => {
                warn!(line, reason = %why, "skipping CSV row");
                report.skipped.push((line, why));
            }
        }
    }
    tx.commit()?;
    Ok(report)
}
