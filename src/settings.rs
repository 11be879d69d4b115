// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::CostStore;
use crate::error::{CostError, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

pub const RATES_URL_KEY: &str = "currency_rates_url";
pub const DEFAULT_RATES_URL_ENV: &str = "COSTMANAGER_DEFAULT_RATES_URL";
pub const FALLBACK_RATES_URL: &str =
    "https://cost-manager-application.onrender.com/exchange_rates.json";

pub fn default_rates_url() -> String {
    match std::env::var(DEFAULT_RATES_URL_ENV) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => FALLBACK_RATES_URL.to_string(),
    }
}

/// Stored rates URL. The first call on a fresh database stores the default.
pub fn get_rates_url(store: &CostStore) -> Result<String> {
    let conn = store.conn()?;
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![RATES_URL_KEY],
            |r| r.get(0),
        )
        .optional()
        .map_err(CostError::Settings)?;
    match v {
        Some(url) => Ok(url),
        None => {
            let url = default_rates_url();
            info!(%url, "no rates URL configured, storing default");
            set_rates_url(store, &url)?;
            Ok(url)
        }
    }
}

/// Overwrites the rates URL; a blank value resets it to the default.
pub fn set_rates_url(store: &CostStore, url: &str) -> Result<()> {
    let url = match url.trim() {
        "" => default_rates_url(),
        u => u.to_string(),
    };
    store
        .conn()?
        .execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![RATES_URL_KEY, url],
        )
        .map_err(CostError::Settings)?;
    debug!(%url, "rates URL saved");
    Ok(())
}

pub fn reset_rates_url(store: &CostStore) -> Result<String> {
    let url = default_rates_url();
    set_rates_url(store, &url)?;
    Ok(url)
}
