// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Label given to transactions recorded without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("income") {
            Ok(Kind::Income)
        } else if t.eq_ignore_ascii_case("expense") {
            Ok(Kind::Expense)
        } else {
            Err(format!("Unknown kind '{}', expected income|expense", s))
        }
    }
}

/// Amount as it arrives from a store: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

/// A transaction-like record before validation.
///
/// Deserialization never fails on an object: fields of an unexpected JSON
/// type are read as missing, so only validation decides whether a record
/// counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct RawRecord {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<RawAmount>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

// Wire shape of a record. `_id`/`id` and `kind`/`type` are separate fields
// so a document carrying both spellings still deserializes.
#[derive(Deserialize)]
struct RecordFields {
    #[serde(default, rename = "_id")]
    object_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    kind: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    type_name: Option<serde_json::Value>,
    #[serde(default)]
    amount: Option<serde_json::Value>,
    #[serde(default)]
    category: Option<serde_json::Value>,
    #[serde(default)]
    date: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<serde_json::Value>,
}

fn json_text(v: Option<serde_json::Value>) -> Option<String> {
    match v {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

fn json_id(v: Option<serde_json::Value>) -> Option<String> {
    match v {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

impl From<RecordFields> for RawRecord {
    fn from(f: RecordFields) -> Self {
        let amount = match f.amount {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Number(n)) => Some(RawAmount::Number(n)),
            Some(serde_json::Value::String(s)) => Some(RawAmount::Text(s)),
            // kept so validation reports it as an invalid amount
            Some(other) => Some(RawAmount::Text(other.to_string())),
        };
        RawRecord {
            id: json_id(f.object_id).or_else(|| json_id(f.id)),
            kind: json_text(f.kind).or_else(|| json_text(f.type_name)),
            amount,
            category: json_text(f.category),
            date: json_text(f.date),
            description: json_text(f.description),
        }
    }
}

impl RawRecord {
    /// Convenience constructor used by stores and tests.
    pub fn new(kind: Kind, amount: &str, category: Option<&str>, date: &str) -> Self {
        RawRecord {
            id: None,
            kind: Some(kind.as_str().to_string()),
            amount: Some(RawAmount::from(amount)),
            category: category.map(|c| c.to_string()),
            date: Some(date.to_string()),
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl AsRef<RawRecord> for RawRecord {
    fn as_ref(&self) -> &RawRecord {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: Kind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(YearMonth { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn pred(&self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn succ(&self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Short display token, e.g. `Mar 2025`.
    pub fn label(&self) -> String {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let year: i32 = y
            .parse()
            .map_err(|_| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let month: u32 = m
            .parse()
            .map_err(|_| format!("Invalid month '{}', expected YYYY-MM", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("Invalid month number {}", month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub period: YearMonth,
    pub period_label: String,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub net_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub current_income: Decimal,
    pub current_expense: Decimal,
    pub current_savings: Decimal,
    pub savings_rate_percent: Decimal,
    pub average_income: Decimal,
    pub average_expense: Decimal,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub is_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub projected_income: Decimal,
    pub projected_expenses: Decimal,
    pub projected_savings: Decimal,
    pub confidence: Confidence,
    pub months_used: usize,
}

/// Everything the dashboard shows, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub summary: PeriodSummary,
    pub income_by_category: Vec<CategoryBreakdown>,
    pub expense_by_category: Vec<CategoryBreakdown>,
    pub trend: Vec<MonthlyPoint>,
    pub top_income_categories: Vec<CategoryBreakdown>,
    pub top_expense_categories: Vec<CategoryBreakdown>,
    pub projection: Projection,
    pub recent_income: Vec<Transaction>,
    pub recent_expense: Vec<Transaction>,
}
