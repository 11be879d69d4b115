// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month and year lookups over the cost table.
//!
//! The two entry points deliberately use different index access paths: a month
//! is an exact key on `year_month`, a year is a half-open range on `date`.

use crate::db::{CostStore, MAX_YEAR};
use crate::error::Result;
use crate::models::{year_month_key, CostRecord};
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

/// All records whose year-month key equals `YYYY-MM` for `year`/`month`.
///
/// A month outside 1..=12 matches nothing and yields an empty vector.
pub fn find_by_year_month(store: &CostStore, year: i32, month: u32) -> Result<Vec<CostRecord>> {
    let key = year_month_key(year, month);
    let records = store.lookup_year_month(&key)?;
    debug!(%key, count = records.len(), "fetched costs for month");
    Ok(records)
}

/// All records dated in `[Jan 1 year, Jan 1 year+1)` UTC, ascending by date.
pub fn find_by_year(store: &CostStore, year: i32) -> Result<Vec<CostRecord>> {
    let (true, Some(start), Some(end)) = (
        (0..=MAX_YEAR).contains(&year),
        year_start(year),
        year.checked_add(1).and_then(year_start),
    ) else {
        // no storable stamp falls in this year, but a closed handle still fails
        store.count()?;
        return Ok(Vec::new());
    };
    let records = store.scan_date_range(&start, &end)?;
    debug!(year, count = records.len(), "fetched costs for year");
    Ok(records)
}

fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}
