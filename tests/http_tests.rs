// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketdash::error::StoreError;
use pocketdash::models::Kind;
use pocketdash::store::TransactionStore;
use pocketdash::store::http::{HttpStore, records_from_body, status_error};
use serde_json::json;
use std::time::Duration;

#[test]
fn status_mapping() {
    assert!(status_error(200).is_none());
    assert!(status_error(204).is_none());
    assert!(matches!(status_error(401), Some(StoreError::Unauthorized)));
    assert!(matches!(status_error(403), Some(StoreError::Unauthorized)));
    assert!(matches!(status_error(500), Some(StoreError::ServerError(500))));
    assert!(matches!(status_error(404), Some(StoreError::ServerError(404))));
}

#[test]
fn endpoints_follow_base_url() {
    let store = HttpStore::new("http://localhost:5000/api/", None, Duration::from_secs(1)).unwrap();
    assert_eq!(store.endpoint(Kind::Income), "http://localhost:5000/api/incomes");
    assert_eq!(store.endpoint(Kind::Expense), "http://localhost:5000/api/expenses");
}

#[test]
fn missing_token_is_unauthorized_without_a_request() {
    let store = HttpStore::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
    assert!(matches!(store.list_income(), Err(StoreError::Unauthorized)));
    assert!(matches!(store.list_expense(), Err(StoreError::Unauthorized)));
}

#[test]
fn body_records_get_kind_from_endpoint() {
    let body = json!([
        {"_id": "65f0", "amount": 1200, "category": "Salary", "date": "2025-03-01T00:00:00.000Z", "icon": "$"},
        {"_id": "65f1", "amount": "80", "category": "Gift", "date": "2025-03-02", "type": "expense"},
        42
    ]);
    let recs = records_from_body(&body, Kind::Income).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.kind.as_deref() == Some("income")));
    assert_eq!(recs[0].id.as_deref(), Some("65f0"));

    let err = records_from_body(&json!({"message": "nope"}), Kind::Expense).unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn wrapped_bodies_are_unwrapped_by_list_name() {
    let body = json!({"incomes": [
        {"_id": "i1", "amount": 1200, "category": "Salary", "date": "2025-03-01"}
    ]});
    let recs = records_from_body(&body, Kind::Income).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id.as_deref(), Some("i1"));
    assert_eq!(recs[0].kind.as_deref(), Some("income"));

    let body = json!({"expenses": [{"amount": "9.99", "date": "2025-03-02"}]});
    assert_eq!(records_from_body(&body, Kind::Expense).unwrap().len(), 1);

    // the wrapper key must match the list being read
    assert!(matches!(
        records_from_body(&json!({"incomes": []}), Kind::Expense),
        Err(StoreError::Decode(_))
    ));
}
