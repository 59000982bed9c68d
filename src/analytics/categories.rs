// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::percent_of;
use crate::models::{CategoryBreakdown, Kind, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Per-category totals for one kind, largest first.
///
/// Equal totals keep the order in which their categories first appeared.
pub fn breakdown(transactions: &[Transaction], kind: Kind) -> Vec<CategoryBreakdown> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<(&str, Decimal, usize)> = Vec::new();
    for tx in transactions.iter().filter(|t| t.kind == kind) {
        match index.get(tx.category.as_str()) {
            Some(&i) => {
                rows[i].1 = rows[i].1.saturating_add(tx.amount);
                rows[i].2 += 1;
            }
            None => {
                index.insert(tx.category.as_str(), rows.len());
                rows.push((tx.category.as_str(), tx.amount, 1));
            }
        }
    }

    let kind_total = rows
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.1));
    let mut items: Vec<CategoryBreakdown> = rows
        .into_iter()
        .map(|(category, total, count)| CategoryBreakdown {
            category: category.to_string(),
            total,
            count,
            percentage: percent_of(total, kind_total),
        })
        .collect();
    // sort_by is stable
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items
}
