// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart series: spend per category for a month, spend per month for a year.
//!
//! Conversion and rounding match [`crate::report::build_report`], so a pie for
//! a month adds up to that month's report total (up to per-slice rounding).

use crate::db::CostStore;
use crate::error::Result;
use crate::models::{Category, Currency};
use crate::query::{find_by_year, find_by_year_month};
use crate::rates::{accumulate, RateTable};
use crate::utils::round_money;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSpend {
    pub month: u32,
    pub name: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Per-category totals for one month, in first-seen order.
pub fn spend_by_category(
    store: &CostStore,
    year: i32,
    month: u32,
    target: Currency,
    rates: &RateTable,
) -> Result<Vec<CategorySpend>> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();
    for r in find_by_year_month(store, year, month)? {
        let converted = rates.convert(r.sum, r.currency, target)?;
        match totals.iter_mut().find(|(c, _)| *c == r.category) {
            Some((_, amt)) => accumulate(amt, converted, r.currency, target)?,
            None => totals.push((r.category, converted)),
        }
    }
    Ok(totals
        .into_iter()
        .map(|(category, amt)| CategorySpend {
            category,
            amount: round_money(amt),
        })
        .collect())
}

/// Twelve monthly totals for `year`, zero for months without costs.
pub fn spend_by_month(
    store: &CostStore,
    year: i32,
    target: Currency,
    rates: &RateTable,
) -> Result<Vec<MonthSpend>> {
    let mut totals = [Decimal::ZERO; 12];
    for r in find_by_year(store, year)? {
        let idx = r.date.month0() as usize;
        let converted = rates.convert(r.sum, r.currency, target)?;
        accumulate(&mut totals[idx], converted, r.currency, target)?;
    }
    Ok(totals
        .iter()
        .zip(MONTH_NAMES)
        .enumerate()
        .map(|(i, (amt, name))| MonthSpend {
            month: i as u32 + 1,
            name,
            amount: round_money(*amt),
        })
        .collect())
}
