// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the storage, query, report and rate layers.
///
/// Nothing here is retried internally; every variant is handed back to the
/// caller with its original cause attached.
#[derive(Error, Debug)]
pub enum CostError {
    #[error("cost storage is unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("failed to write cost record: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    #[error("failed to read cost records: {0}")]
    ReadFailed(#[source] rusqlite::Error),

    #[error("invalid rate table: {reason}")]
    InvalidRateTable { reason: String },

    #[error("failed to generate report for {year}-{month:02} in {currency}: {source}")]
    ReportGenerationFailed {
        year: i32,
        month: u32,
        currency: String,
        #[source]
        source: Box<CostError>,
    },

    #[error("failed to fetch rates from {url}: {reason}")]
    RateFetchFailed { url: String, reason: String },

    #[error("amount overflow converting {sum} {from} to {to}")]
    ConversionOverflow {
        sum: rust_decimal::Decimal,
        from: String,
        to: String,
    },

    #[error("settings error: {0}")]
    Settings(#[source] rusqlite::Error),
}

impl CostError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        CostError::StorageUnavailable {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_rates(reason: impl Into<String>) -> Self {
        CostError::InvalidRateTable {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CostError>;
