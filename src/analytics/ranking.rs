// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::percent_of;
use crate::models::CategoryBreakdown;
use rust_decimal::Decimal;

/// The first `k` categories of an already sorted breakdown.
///
/// Shares are taken against `kind_total`, the total of every category of the
/// kind, so they do not change with `k`.
pub fn top_categories(
    breakdown: &[CategoryBreakdown],
    k: usize,
    kind_total: Decimal,
) -> Vec<CategoryBreakdown> {
    breakdown
        .iter()
        .take(k)
        .map(|c| CategoryBreakdown {
            percentage: percent_of(c.total, kind_total),
            ..c.clone()
        })
        .collect()
}
