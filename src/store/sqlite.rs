// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::TransactionStore;
use crate::error::StoreError;
use crate::models::{Kind, RawAmount, RawRecord, YearMonth};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Transactions kept in the local SQLite database.
///
/// Rows are stored as text and handed out unvalidated, so a row edited by
/// hand goes through the same normalization as remote data.
pub struct LocalStore<'a> {
    conn: &'a Connection,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: Kind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub kind: Option<Kind>,
    pub month: Option<YearMonth>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRow {
    pub id: i64,
    pub kind: String,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl StoredRow {
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            id: Some(self.id.to_string()),
            kind: Some(self.kind.clone()),
            amount: Some(RawAmount::Text(self.amount.clone())),
            category: Some(self.category.clone()).filter(|c| !c.is_empty()),
            date: Some(self.date.clone()),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
        }
    }
}

impl<'a> LocalStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        LocalStore { conn }
    }

    pub fn add(&self, tx: &NewTransaction) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions(kind, amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tx.kind.as_str(),
                tx.amount.to_string(),
                tx.category,
                tx.date.to_string(),
                tx.description
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        Ok(id)
    }

    /// Inserts raw text as-is, without validation.
    pub fn insert_raw(&self, rec: &RawRecord) -> Result<i64, StoreError> {
        let amount = match &rec.amount {
            Some(RawAmount::Text(s)) => s.clone(),
            Some(RawAmount::Number(n)) => n.to_string(),
            None => String::new(),
        };
        self.conn.execute(
            "INSERT INTO transactions(kind, amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                rec.kind.clone().unwrap_or_default(),
                amount,
                rec.category,
                rec.date.clone().unwrap_or_default(),
                rec.description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<StoredRow>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, kind, date, amount, category, description FROM transactions WHERE id=?1",
                params![id],
                read_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Applies the set fields of `patch`. Returns false when no row has `id`.
    pub fn update(&self, id: i64, patch: &TransactionPatch) -> Result<bool, StoreError> {
        if self.get(id)?.is_none() {
            return Ok(false);
        }
        if let Some(a) = patch.amount {
            self.conn.execute(
                "UPDATE transactions SET amount=?1 WHERE id=?2",
                params![a.to_string(), id],
            )?;
        }
        if let Some(d) = patch.date {
            self.conn.execute(
                "UPDATE transactions SET date=?1 WHERE id=?2",
                params![d.to_string(), id],
            )?;
        }
        if let Some(ref c) = patch.category {
            self.conn.execute(
                "UPDATE transactions SET category=?1 WHERE id=?2",
                params![c, id],
            )?;
        }
        if let Some(ref d) = patch.description {
            self.conn.execute(
                "UPDATE transactions SET description=?1 WHERE id=?2",
                params![d, id],
            )?;
        }
        info!(id, "transaction updated");
        Ok(true)
    }

    pub fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n > 0 {
            info!(id, "transaction removed");
        }
        Ok(n > 0)
    }

    /// Newest first.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<StoredRow>, StoreError> {
        let mut sql = String::from(
            "SELECT id, kind, date, amount, category, description FROM transactions WHERE 1=1",
        );
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(kind) = filter.kind {
            sql.push_str(" AND lower(trim(kind))=?");
            params_vec.push(kind.as_str().to_string());
        }
        if let Some(month) = filter.month {
            sql.push_str(" AND substr(date,1,7)=?");
            params_vec.push(month.to_string());
        }
        if let Some(ref term) = filter.search {
            sql.push_str(" AND (category LIKE ? OR description LIKE ?)");
            let pat = format!("%{}%", term.trim());
            params_vec.push(pat.clone());
            params_vec.push(pat);
        }
        sql.push_str(" ORDER BY date DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), read_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        debug!(count = data.len(), "listed stored transactions");
        Ok(data)
    }

    /// Every row in insertion order, as unvalidated records.
    pub fn all_raw(&self) -> Result<Vec<RawRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, date, amount, category, description FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], read_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.to_raw());
        }
        Ok(data)
    }

    fn list_kind(&self, kind: Kind) -> Result<Vec<RawRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, date, amount, category, description FROM transactions
             WHERE lower(trim(kind))=?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], read_row)?;
        let mut data = Vec::new();
        for row in rows {
            let mut rec = row?.to_raw();
            rec.kind = Some(kind.as_str().to_string());
            data.push(rec);
        }
        debug!(%kind, count = data.len(), "loaded local records");
        Ok(data)
    }
}

impl TransactionStore for LocalStore<'_> {
    fn list_income(&self) -> Result<Vec<RawRecord>, StoreError> {
        self.list_kind(Kind::Income)
    }

    fn list_expense(&self) -> Result<Vec<RawRecord>, StoreError> {
        self.list_kind(Kind::Expense)
    }
}

fn read_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        id: r.get(0)?,
        kind: r.get(1)?,
        date: r.get(2)?,
        amount: r.get(3)?,
        category: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
        description: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}
