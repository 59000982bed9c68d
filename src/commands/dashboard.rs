// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{AnalyticsOptions, compute_analytics, compute_analytics_json};
use crate::config::Settings;
use crate::models::{CategoryBreakdown, DashboardAnalytics, RawRecord, Transaction};
use crate::store::http::HttpStore;
use crate::store::sqlite::LocalStore;
use crate::store::{TransactionStore, fetch_snapshot};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = Settings::load(conn)?;
    let data = build(conn, sub, &settings)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_dashboard(&data);
    }
    Ok(())
}

/// Reference date, window and top-K from the flags, falling back to settings.
pub fn options(sub: &clap::ArgMatches, settings: &Settings) -> Result<(NaiveDate, AnalyticsOptions)> {
    let now = match sub.get_one::<String>("now") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let mut opts = settings.analytics_options();
    if let Some(m) = sub.get_one::<u64>("months") {
        opts.window_months = *m as usize;
    }
    if let Some(k) = sub.get_one::<u64>("top") {
        opts.top_k = *k as usize;
    }
    Ok((now, opts))
}

pub fn build(
    conn: &Connection,
    sub: &clap::ArgMatches,
    settings: &Settings,
) -> Result<DashboardAnalytics> {
    let (now, opts) = options(sub, settings)?;
    debug!(%now, window = opts.window_months, top = opts.top_k, "computing dashboard");

    if let Some(path) = sub.get_one::<String>("input") {
        let path = path.trim();
        let text =
            std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("Parse JSON in {}", path))?;
        return compute_analytics_json(&value, now, &opts)
            .with_context(|| format!("Unusable input {}", path));
    }

    let snapshot = if sub.get_flag("remote") {
        let url = settings
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow!("No api_url configured; run `pocketdash config set api_url <url>`"))?;
        let store = HttpStore::new(url, settings.api_token.clone(), settings.timeout())?;
        load(&store, sub.get_flag("partial"))?
    } else {
        load(&LocalStore::new(conn), false)?
    };
    Ok(compute_analytics(&snapshot, now, &opts))
}

fn load(store: &dyn TransactionStore, allow_partial: bool) -> Result<Vec<RawRecord>> {
    let snap = fetch_snapshot(store, allow_partial).context("Could not load transactions")?;
    for (kind, err) in &snap.failures {
        eprintln!("warning: {} records unavailable: {}", kind, err);
    }
    Ok(snap.records)
}

fn category_rows(items: &[CategoryBreakdown]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.total),
                c.count.to_string(),
                fmt_percent(&c.percentage),
            ]
        })
        .collect()
}

fn recent_rows(items: &[Transaction]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                fmt_money(&t.amount),
                t.category.clone(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn print_dashboard(d: &DashboardAnalytics) {
    let s = &d.summary;
    if s.is_empty {
        println!("No transactions yet. Add one with `pocketdash tx add`.");
    }
    let summary = vec![
        vec!["Total income".into(), fmt_money(&s.total_income)],
        vec!["Total expenses".into(), fmt_money(&s.total_expenses)],
        vec!["Balance".into(), fmt_money(&s.net_balance)],
        vec!["This month income".into(), fmt_money(&s.current_income)],
        vec!["This month expenses".into(), fmt_money(&s.current_expense)],
        vec!["This month savings".into(), fmt_money(&s.current_savings)],
        vec!["Savings rate".into(), fmt_percent(&s.savings_rate_percent)],
        vec!["Average income".into(), fmt_money(&s.average_income)],
        vec!["Average expense".into(), fmt_money(&s.average_expense)],
        vec!["Transactions".into(), s.transaction_count.to_string()],
    ];
    println!("{}", pretty_table(&["Summary", "Value"], summary));

    let headers = ["Category", "Total", "Count", "Share"];
    println!(
        "Top income\n{}",
        pretty_table(&headers, category_rows(&d.top_income_categories))
    );
    println!(
        "Top expenses\n{}",
        pretty_table(&headers, category_rows(&d.top_expense_categories))
    );

    let trend: Vec<Vec<String>> = d
        .trend
        .iter()
        .map(|p| {
            vec![
                p.period_label.clone(),
                fmt_money(&p.income_total),
                fmt_money(&p.expense_total),
                fmt_money(&p.net_savings),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Savings"], trend)
    );

    let p = &d.projection;
    println!(
        "{}",
        pretty_table(
            &["Projection", "Income", "Expenses", "Savings", "Confidence"],
            vec![vec![
                "Next month".into(),
                fmt_money(&p.projected_income),
                fmt_money(&p.projected_expenses),
                fmt_money(&p.projected_savings),
                p.confidence.as_str().into(),
            ]],
        )
    );

    let recent_headers = ["Date", "Amount", "Category", "Description"];
    if !d.recent_income.is_empty() {
        println!(
            "Recent income\n{}",
            pretty_table(&recent_headers, recent_rows(&d.recent_income))
        );
    }
    if !d.recent_expense.is_empty() {
        println!(
            "Recent expenses\n{}",
            pretty_table(&recent_headers, recent_rows(&d.recent_expense))
        );
    }
}
