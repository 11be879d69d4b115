// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ILS")]
    Ils,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "EURO")]
    Euro,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Ils, Currency::Gbp, Currency::Euro];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ils => "ILS",
            Currency::Gbp => "GBP",
            Currency::Euro => "EURO",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown currency '{}' (expected USD, ILS, GBP or EURO)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}' (expected Food, Transport, Entertainment, Utilities or Other)",
                    s
                )
            })
    }
}

// Both enums are stored as their display text so the CHECK constraints in the
// schema stay readable.
macro_rules! text_column {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.to_string()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                s.parse::<$ty>()
                    .map_err(|e| FromSqlError::Other(e.into()))
            }
        }
    };
}

text_column!(Currency);
text_column!(Category);

/// Input for a new cost item. The store stamps the date itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCost {
    pub sum: Decimal,
    pub currency: Currency,
    pub category: Category,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub sum: Decimal,
    pub currency: Currency,
    pub category: Category,
    pub description: String,
    pub date: DateTime<Utc>,
    pub year_month: String, // YYYY-MM
}

/// UTC calendar fields of a cost date, as shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl From<&DateTime<Utc>> for CalendarDate {
    fn from(d: &DateTime<Utc>) -> Self {
        CalendarDate {
            day: d.day(),
            month: d.month(),
            year: d.year(),
        }
    }
}

/// Exact-match key of the year-month index, e.g. `2024-03`.
pub fn year_month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Year-month key a record stamped at `date` belongs to.
pub fn year_month_of(date: &DateTime<Utc>) -> String {
    year_month_key(date.year(), date.month())
}
