// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CostError, Result};
use crate::models::{year_month_of, CostRecord, NewCost};
use anyhow::Context;
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Costmanager", "costmanager"));

pub const COSTS_TABLE: &str = "costs";
pub const SCHEMA_VERSION: i32 = 1;

// Fixed width so that text order on the date index is chronological order.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
// `%Y` is four digits only up to here.
pub const MAX_YEAR: i32 = 9999;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Append-only: rows are never updated or deleted.
    CREATE TABLE IF NOT EXISTS costs(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL CHECK(CAST(amount AS REAL) > 0),
        currency TEXT NOT NULL CHECK(currency IN ('USD','ILS','GBP','EURO')),
        category TEXT NOT NULL
            CHECK(category IN ('Food','Transport','Entertainment','Utilities','Other')),
        description TEXT NOT NULL,
        date TEXT NOT NULL,       -- ISO 8601 UTC, store-assigned
        year_month TEXT NOT NULL  -- YYYY-MM derived from date
    );
    CREATE INDEX IF NOT EXISTS idx_costs_date ON costs(date);
    CREATE INDEX IF NOT EXISTS idx_costs_year_month ON costs(year_month);

    PRAGMA user_version = 1;
"#;

const SELECT_COSTS: &str =
    "SELECT id, amount, currency, category, description, date, year_month FROM costs";

/// Source of insert timestamps. Stamps outside years 0..=9999 are refused by
/// [`CostStore::insert`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Used to place records on known dates.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Handle on the cost table and its two secondary indexes (`date`, `year_month`).
///
/// The handle is opened once and shared by every read and write. After
/// [`CostStore::close`] every operation fails with `StorageUnavailable`.
pub struct CostStore {
    conn: Option<Connection>,
    clock: Box<dyn Clock>,
}

pub fn db_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("costmanager.sqlite"))
}

pub fn open_or_init(path: Option<&Path>) -> anyhow::Result<CostStore> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let store =
        CostStore::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    Ok(store)
}

impl CostStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            CostError::unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CostError::unavailable(format!("cannot open in-memory db: {}", e)))?;
        Self::from_connection(conn)
    }

    /// Wraps an already open connection, creating the schema when absent.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(CostStore {
            conn: Some(conn),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!("cost store closed");
        }
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| CostError::unavailable("store handle is not open"))
    }

    /// Stamps `cost` with the current UTC time, derives its year-month key and
    /// appends it. Returns the stored record including the assigned id.
    pub fn insert(&self, cost: NewCost) -> Result<CostRecord> {
        let conn = self.conn()?;
        let date = self.clock.now().trunc_subsecs(3);
        if !(0..=MAX_YEAR).contains(&date.year()) {
            return Err(CostError::WriteFailed(rusqlite::Error::ToSqlConversionFailure(
                format!("timestamp {} is outside years 0000-9999", date).into(),
            )));
        }
        let year_month = year_month_of(&date);
        conn.execute(
            "INSERT INTO costs(amount, currency, category, description, date, year_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                cost.sum.to_string(),
                cost.currency,
                cost.category,
                cost.description,
                format_date(&date),
                year_month
            ],
        )
        .map_err(CostError::WriteFailed)?;
        let id = conn.last_insert_rowid();
        debug!(id, %year_month, sum = %cost.sum, currency = %cost.currency, "cost added");
        Ok(CostRecord {
            id,
            sum: cost.sum,
            currency: cost.currency,
            category: cost.category,
            description: cost.description,
            date,
            year_month,
        })
    }

    /// Exact-match lookup on the year-month index.
    pub fn lookup_year_month(&self, key: &str) -> Result<Vec<CostRecord>> {
        self.select(
            &format!("{SELECT_COSTS} WHERE year_month = ?1 ORDER BY date, id"),
            &[&key],
        )
    }

    /// Half-open `[from, to)` scan on the date index, ascending by date.
    pub fn scan_date_range(
        &self,
        from: &DateTime<Utc>,
        to: &DateTime<Utc>,
    ) -> Result<Vec<CostRecord>> {
        if to.year() > MAX_YEAR {
            // every storable stamp lies below the bound
            return self.select(
                &format!("{SELECT_COSTS} WHERE date >= ?1 ORDER BY date, id"),
                &[&format_date(from)],
            );
        }
        let (from, to) = (format_date(from), format_date(to));
        self.select(
            &format!("{SELECT_COSTS} WHERE date >= ?1 AND date < ?2 ORDER BY date, id"),
            &[&from, &to],
        )
    }

    pub fn count(&self) -> Result<i64> {
        self.conn()?
            .query_row("SELECT COUNT(*) FROM costs", [], |r| r.get(0))
            .map_err(CostError::ReadFailed)
    }

    fn select(&self, sql: &str, args: &[&dyn ToSql]) -> Result<Vec<CostRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql).map_err(CostError::ReadFailed)?;
        let rows = stmt
            .query_map(args, record_from_row)
            .map_err(CostError::ReadFailed)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(CostError::ReadFailed)?);
        }
        Ok(out)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .map_err(|e| CostError::unavailable(format!("cannot read schema version: {}", e)))?;
    if version > SCHEMA_VERSION {
        return Err(CostError::unavailable(format!(
            "database schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }
    conn.execute_batch(SCHEMA)
        .map_err(|e| CostError::unavailable(format!("cannot initialize schema: {}", e)))?;
    if version < SCHEMA_VERSION {
        info!(
            table = COSTS_TABLE,
            version = SCHEMA_VERSION,
            "cost table created with date and year_month indexes"
        );
    }
    Ok(())
}

pub fn format_date(d: &DateTime<Utc>) -> String {
    d.format(DATE_FORMAT).to_string()
}

fn record_from_row(r: &Row<'_>) -> rusqlite::Result<CostRecord> {
    let amount: String = r.get(1)?;
    let sum = amount
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let date: String = r.get(5)?;
    let date = DateTime::parse_from_rfc3339(&date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);
    Ok(CostRecord {
        id: r.get(0)?,
        sum,
        currency: r.get(2)?,
        category: r.get(3)?,
        description: r.get(4)?,
        date,
        year_month: r.get(6)?,
    })
}
