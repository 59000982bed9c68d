// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Validation of raw store records into canonical [`Transaction`]s.
//!
//! A record that fails validation is dropped on its own; the rest of the
//! batch is unaffected.

use crate::models::{Kind, RawAmount, RawRecord, Transaction, UNCATEGORIZED};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Largest amount a single record may carry (10^15). Keeps every sum, share
/// and average far inside the range of `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

// Plain dates and ISO-8601 date-times; only the calendar date is kept.
static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:$|[T ])").expect("date pattern is valid")
});

/// Why a record was left out of the analytics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("amount missing")]
    MissingAmount,
    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),
    #[error("amount {0} is not positive")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} exceeds the largest supported amount")]
    AmountTooLarge(Decimal),
    #[error("date missing")]
    MissingDate,
    #[error("date '{0}' is not a valid calendar date")]
    InvalidDate(String),
    #[error("kind missing")]
    MissingKind,
    #[error("kind '{0}' is neither income nor expense")]
    UnknownKind(String),
}

/// Keeps the valid records, in input order.
pub fn normalize<I>(records: I) -> Vec<Transaction>
where
    I: IntoIterator,
    I::Item: AsRef<RawRecord>,
{
    records
        .into_iter()
        .filter_map(|r| inspect(r.as_ref()).ok())
        .collect()
}

/// Validates a single record.
pub fn inspect(record: &RawRecord) -> Result<Transaction, Rejection> {
    let amount = match &record.amount {
        Some(raw) => parse_amount(raw)?,
        None => return Err(Rejection::MissingAmount),
    };
    let date = match record.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => return Err(Rejection::MissingDate),
    };
    let kind = match record.kind.as_deref() {
        Some(raw) => raw
            .parse::<Kind>()
            .map_err(|_| Rejection::UnknownKind(raw.to_string()))?,
        None => return Err(Rejection::MissingKind),
    };
    let category = record
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string();

    Ok(Transaction {
        id: record.id.clone().unwrap_or_default(),
        kind,
        amount,
        category,
        date,
        description: record.description.clone(),
    })
}

fn parse_amount(raw: &RawAmount) -> Result<Decimal, Rejection> {
    let text = match raw {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s.trim().to_string(),
    };
    let amount = text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| Rejection::InvalidAmount(text.clone()))?;
    if amount <= Decimal::ZERO {
        return Err(Rejection::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(Rejection::AmountTooLarge(amount));
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    let s = raw.trim();
    let caps = DATE_PREFIX
        .captures(s)
        .ok_or_else(|| Rejection::InvalidDate(raw.to_string()))?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
    let (y, m, d) = (
        field(1).parse::<i32>(),
        field(2).parse::<u32>(),
        field(3).parse::<u32>(),
    );
    match (y, m, d) {
        (Ok(y), Ok(m), Ok(d)) => {
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| Rejection::InvalidDate(raw.to_string()))
        }
        _ => Err(Rejection::InvalidDate(raw.to_string())),
    }
}
