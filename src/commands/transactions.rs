// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::sqlite::{ListFilter, LocalStore, NewTransaction, StoredRow, TransactionPatch};
use crate::utils::{
    maybe_print_json, parse_amount, parse_date, parse_kind, parse_month, pretty_table,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn optional_text(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let tx = NewTransaction {
        kind,
        amount,
        date,
        category: optional_text(sub, "category"),
        description: optional_text(sub, "description"),
    };
    let id = LocalStore::new(conn).add(&tx)?;
    println!(
        "Recorded {} #{}: {} on {} ({})",
        kind,
        id,
        amount,
        date,
        tx.category.as_deref().unwrap_or(crate::models::UNCATEGORIZED)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<StoredRow>> {
    let filter = ListFilter {
        kind: sub
            .get_one::<String>("kind")
            .map(|k| parse_kind(k))
            .transpose()?,
        month: sub
            .get_one::<String>("month")
            .map(|m| parse_month(m))
            .transpose()?,
        search: optional_text(sub, "search"),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    Ok(LocalStore::new(conn).list(&filter)?)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|a| parse_amount(a))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_date(d))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string()),
    };
    if patch.is_empty() {
        return Err(anyhow!(
            "Nothing to change; pass --amount, --date, --category or --description"
        ));
    }
    if !LocalStore::new(conn).update(id, &patch)? {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !LocalStore::new(conn).remove(id)? {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}
