// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CostError, Result};
use crate::models::Currency;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Conversion factors relative to a common base, one per currency.
///
/// Factors are always finite and strictly positive. A currency missing from the
/// table converts at factor 1; completeness is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<Currency, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: Currency, factor: Decimal) -> Result<()> {
        if factor <= Decimal::ZERO {
            return Err(CostError::invalid_rates(format!(
                "rate for {} must be positive, got {}",
                code, factor
            )));
        }
        self.rates.insert(code, factor);
        Ok(())
    }

    pub fn get(&self, code: Currency) -> Option<Decimal> {
        self.rates.get(&code).copied()
    }

    pub fn rate_of(&self, code: Currency) -> Decimal {
        self.get(code).unwrap_or(Decimal::ONE)
    }

    /// `(sum / rate(from)) * rate(to)`, unrounded. Fails with
    /// `ConversionOverflow` when the result leaves the `Decimal` range.
    pub fn convert(&self, sum: Decimal, from: Currency, to: Currency) -> Result<Decimal> {
        sum.checked_div(self.rate_of(from))
            .and_then(|d| d.checked_mul(self.rate_of(to)))
            .ok_or_else(|| overflow(sum, from, to))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let v: Value = serde_json::from_str(s)
            .map_err(|e| CostError::invalid_rates(format!("malformed JSON: {}", e)))?;
        Self::from_json_value(&v)
    }

    /// Validates a `{code: factor}` document. Codes outside the supported set
    /// are skipped.
    pub fn from_json_value(v: &Value) -> Result<Self> {
        let obj = v
            .as_object()
            .ok_or_else(|| CostError::invalid_rates("expected a JSON object of currency rates"))?;
        let mut table = RateTable::new();
        for (code, raw) in obj {
            let Ok(ccy) = code.parse::<Currency>() else {
                debug!(%code, "ignoring rate for unsupported currency");
                continue;
            };
            let f = raw.as_f64().filter(|f| f.is_finite()).ok_or_else(|| {
                CostError::invalid_rates(format!("rate for {} is not a number: {}", code, raw))
            })?;
            let factor = Decimal::try_from(f).map_err(|e| {
                CostError::invalid_rates(format!("rate for {} out of range: {}", code, e))
            })?;
            table.insert(ccy, factor)?;
        }
        Ok(table)
    }
}

pub(crate) fn overflow(sum: Decimal, from: Currency, to: Currency) -> CostError {
    CostError::ConversionOverflow {
        sum,
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Adds `converted` into `acc`, failing instead of wrapping past `Decimal::MAX`.
pub(crate) fn accumulate(
    acc: &mut Decimal,
    converted: Decimal,
    from: Currency,
    to: Currency,
) -> Result<()> {
    *acc = acc
        .checked_add(converted)
        .ok_or_else(|| overflow(converted, from, to))?;
    Ok(())
}

/// GET the rate document at `url`.
///
/// Transport errors, non-2xx statuses and undecodable bodies are
/// `RateFetchFailed`; a decodable document with bad content is `InvalidRateTable`.
pub fn fetch_rates(client: &reqwest::blocking::Client, url: &str) -> Result<RateTable> {
    let fetch_failed = |reason: String| CostError::RateFetchFailed {
        url: url.to_string(),
        reason,
    };
    let resp = client
        .get(url)
        .send()
        .map_err(|e| fetch_failed(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(fetch_failed(format!("HTTP error status {}", status)));
    }
    let body: Value = resp
        .json()
        .map_err(|e| fetch_failed(format!("malformed JSON: {}", e)))?;
    let table = RateTable::from_json_value(&body)?;
    debug!(%url, currencies = table.len(), "currency rates fetched");
    Ok(table)
}
