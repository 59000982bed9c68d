// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::normalize::inspect;
use crate::store::sqlite::LocalStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Stored records the dashboard would drop, with the reason.
pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();
    for rec in LocalStore::new(conn).all_raw()? {
        if let Err(why) = inspect(&rec) {
            issues.push((rec.id.clone().unwrap_or_default(), why.to_string()));
        }
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|(id, why)| vec![id, why]).collect();
        println!("{}", pretty_table(&["ID", "Ignored because"], rows));
    }
    Ok(())
}
