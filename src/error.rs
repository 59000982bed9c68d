// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the analytics engine. Bad individual records are never
/// errors; only an input that is not a collection at all is.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Expected a list of transactions, got {0}")]
    NotACollection(&'static str),
}

/// Failures of a transaction store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),
    #[error("Unauthorized: token missing, invalid or expired")]
    Unauthorized,
    #[error("Server error (HTTP {0})")]
    ServerError(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Could not decode store response: {0}")]
    Decode(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
