// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::TransactionStore;
use crate::error::StoreError;
use crate::models::{Kind, RawRecord};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

const UA: &str = concat!(
    "pocketdash/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/pocketdash)"
);

/// Read-only client for a remote income/expense API.
///
/// Lists are fetched from `{base_url}/incomes` and `{base_url}/expenses`
/// with a bearer token.
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(UA)
            .build()
            .map_err(|e| StoreError::NetworkUnavailable(e.to_string()))?;
        Ok(HttpStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn endpoint(&self, kind: Kind) -> String {
        format!("{}/{}", self.base_url, list_name(kind))
    }

    fn fetch(&self, kind: Kind) -> Result<Vec<RawRecord>, StoreError> {
        let token = self.token.as_deref().ok_or(StoreError::Unauthorized)?;
        let url = self.endpoint(kind);
        debug!(%url, "fetching records");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(classify)?;
        if let Some(e) = status_error(resp.status().as_u16()) {
            return Err(e);
        }
        let body: serde_json::Value = resp.json().map_err(classify)?;
        let recs = records_from_body(&body, kind)?;
        debug!(%url, count = recs.len(), "records received");
        Ok(recs)
    }
}

impl TransactionStore for HttpStore {
    fn list_income(&self) -> Result<Vec<RawRecord>, StoreError> {
        self.fetch(Kind::Income)
    }

    fn list_expense(&self) -> Result<Vec<RawRecord>, StoreError> {
        self.fetch(Kind::Expense)
    }
}

/// Maps a non-success HTTP status to a store error.
pub fn status_error(status: u16) -> Option<StoreError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(StoreError::Unauthorized),
        s => Some(StoreError::ServerError(s)),
    }
}

/// Turns a response body into records of `kind`. The body is either a JSON
/// array or an object wrapping the array under the list name (`incomes` or
/// `expenses`); elements that are not record-shaped are skipped.
pub fn records_from_body(body: &serde_json::Value, kind: Kind) -> Result<Vec<RawRecord>, StoreError> {
    let items = body
        .as_array()
        .or_else(|| body.get(list_name(kind)).and_then(|v| v.as_array()))
        .ok_or_else(|| StoreError::Decode(format!("expected a list of {} records", kind)))?;
    Ok(items
        .iter()
        .filter_map(|v| serde_json::from_value::<RawRecord>(v.clone()).ok())
        .map(|mut r| {
            r.kind = Some(kind.as_str().to_string());
            r
        })
        .collect())
}

fn list_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Income => "incomes",
        Kind::Expense => "expenses",
    }
}

fn classify(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else if e.is_decode() {
        StoreError::Decode(e.to_string())
    } else if let Some(s) = e.status() {
        status_error(s.as_u16()).unwrap_or(StoreError::ServerError(s.as_u16()))
    } else {
        StoreError::NetworkUnavailable(e.to_string())
    }
}
