// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::sqlite::{ListFilter, LocalStore};
use crate::utils::parse_kind;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let kind = sub
        .get_one::<String>("kind")
        .map(|k| parse_kind(k))
        .transpose()?;

    let mut rows = LocalStore::new(conn).list(&ListFilter {
        kind,
        ..ListFilter::default()
    })?;
    // oldest first in files
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["kind", "date", "amount", "category", "description"])?;
            for r in &rows {
                wtr.write_record([&r.kind, &r.date, &r.amount, &r.category, &r.description])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id, "kind": r.kind, "date": r.date, "amount": r.amount,
                        "category": r.category, "description": r.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
