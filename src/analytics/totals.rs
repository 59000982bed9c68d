// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, Transaction};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Totals {
    pub fn for_kind(&self, kind: Kind) -> Decimal {
        match kind {
            Kind::Income => self.income,
            Kind::Expense => self.expenses,
        }
    }
}

/// Sums saturate at the bounds of `Decimal` instead of overflowing.
pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut t = Totals::default();
    for tx in transactions {
        match tx.kind {
            Kind::Income => {
                t.income = t.income.saturating_add(tx.amount);
                t.income_count += 1;
            }
            Kind::Expense => {
                t.expenses = t.expenses.saturating_add(tx.amount);
                t.expense_count += 1;
            }
        }
    }
    t.net = t.income.saturating_sub(t.expenses);
    t
}
