// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::CostStore;
use crate::rates::{fetch_rates, RateTable};
use crate::settings::get_rates_url;
use crate::utils::{http_client, pretty_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let table = load_rates(store, sub)?;
    if table.is_empty() {
        println!("Rate source returned no supported currencies.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|(ccy, rate)| vec![ccy.to_string(), rate.to_string()])
        .collect();
    println!("{}", pretty_table(&["Currency", "Rate"], rows));
    Ok(())
}

/// Rates from `--rates-file` when given, else fetched from the configured URL.
pub fn load_rates(store: &CostStore, sub: &clap::ArgMatches) -> Result<RateTable> {
    if let Some(path) = sub.get_one::<String>("rates-file") {
        return read_rates_file(Path::new(path));
    }
    let url = get_rates_url(store)?;
    let client = http_client()?;
    let table = fetch_rates(&client, &url)?;
    Ok(table)
}

pub fn read_rates_file(path: &Path) -> Result<RateTable> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rates file {}", path.display()))?;
    let table = RateTable::from_json_str(&s)
        .with_context(|| format!("Invalid rates file {}", path.display()))?;
    Ok(table)
}
