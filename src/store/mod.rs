// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sources of raw transaction records.

pub mod http;
pub mod sqlite;

use crate::error::StoreError;
use crate::models::{Kind, RawRecord};
use tracing::debug;

/// Anything that can list the income and expense records of a user.
///
/// Implementations stamp `kind` on every record they return according to the
/// list it came from.
pub trait TransactionStore {
    fn list_income(&self) -> Result<Vec<RawRecord>, StoreError>;
    fn list_expense(&self) -> Result<Vec<RawRecord>, StoreError>;
}

/// Records gathered from a store, plus the lists that could not be loaded.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub records: Vec<RawRecord>,
    pub failures: Vec<(Kind, StoreError)>,
}

impl Snapshot {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Loads both lists. With `allow_partial` a single failing list is tolerated
/// and reported in [`Snapshot::failures`]; if both fail the first error is
/// returned.
pub fn fetch_snapshot(
    store: &dyn TransactionStore,
    allow_partial: bool,
) -> Result<Snapshot, StoreError> {
    let mut snap = Snapshot::default();
    for kind in [Kind::Income, Kind::Expense] {
        let res = match kind {
            Kind::Income => store.list_income(),
            Kind::Expense => store.list_expense(),
        };
        match res {
            Ok(mut recs) => snap.records.append(&mut recs),
            Err(e) if allow_partial => {
                debug!(%kind, error = %e, "could not load records, continuing without them");
                snap.failures.push((kind, e));
            }
            Err(e) => return Err(e),
        }
    }
    if snap.failures.len() == 2 {
        let (_, first) = snap.failures.remove(0);
        return Err(first);
    }
    Ok(snap)
}
