// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::CostStore;
use crate::error::{CostError, Result};
use crate::models::{CalendarDate, Category, Currency};
use crate::query::find_by_year_month;
use crate::rates::{accumulate, RateTable};
use crate::utils::round_money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub year: i32,
    pub month: u32,
    pub costs: Vec<ReportLine>,
    pub total: ReportTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    #[serde(with = "rust_decimal::serde::float")]
    pub sum: Decimal,
    pub currency: Currency,
    pub category: Category,
    pub description: String,
    pub date: CalendarDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotal {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Builds the month report in `target` currency.
///
/// Each line is rounded to cents on its own while the total is accumulated
/// from the unrounded conversions and rounded once, so the total can differ
/// from the sum of the printed lines by a few cents.
pub fn build_report(
    store: &CostStore,
    year: i32,
    month: u32,
    target: Currency,
    rates: &RateTable,
) -> Result<Report> {
    let failed = |e: CostError| CostError::ReportGenerationFailed {
        year,
        month,
        currency: target.to_string(),
        source: Box::new(e),
    };
    let records = find_by_year_month(store, year, month).map_err(failed)?;

    let mut total = Decimal::ZERO;
    let mut costs = Vec::with_capacity(records.len());
    for r in records {
        let converted = rates.convert(r.sum, r.currency, target).map_err(failed)?;
        accumulate(&mut total, converted, r.currency, target).map_err(failed)?;
        costs.push(ReportLine {
            sum: round_money(converted),
            currency: target,
            category: r.category,
            description: r.description,
            date: CalendarDate::from(&r.date),
        });
    }

    debug!(year, month, %target, lines = costs.len(), "report generated");
    Ok(Report {
        year,
        month,
        costs,
        total: ReportTotal {
            currency: target,
            total: round_money(total),
        },
    })
}
