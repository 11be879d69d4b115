// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::target_currency;
use crate::db::CostStore;
use crate::models::{Category, CostRecord, NewCost};
use crate::query::{find_by_year, find_by_year_month};
use crate::utils::{fmt_money, maybe_print_json, parse_positive_decimal, pretty_table};
use anyhow::{Context, Result};

pub fn add(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let cost = new_cost_from(sub)?;
    let rec = store.insert(cost).context("Failed to add cost item")?;
    println!(
        "Recorded {} {} for {} ('{}') on {} [id {}]",
        rec.sum,
        rec.currency,
        rec.category,
        rec.description,
        rec.date.format("%Y-%m-%d %H:%M UTC"),
        rec.id
    );
    Ok(())
}

pub fn new_cost_from(sub: &clap::ArgMatches) -> Result<NewCost> {
    let sum = parse_positive_decimal(sub.get_one::<String>("sum").context("missing --sum")?)?;
    let currency = target_currency(sub)?;
    let category = sub
        .get_one::<String>("category")
        .context("missing --category")?
        .parse::<Category>()
        .map_err(anyhow::Error::msg)?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    Ok(NewCost {
        sum,
        currency,
        category,
        description,
    })
}

pub fn list(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.format("%Y-%m-%d").to_string(),
                    r.category.to_string(),
                    r.description.clone(),
                    fmt_money(&r.sum),
                    r.currency.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Category", "Description", "Sum", "CCY"],
                rows
            )
        );
    }
    Ok(())
}

/// Month lookup when `--month` is given, whole-year scan otherwise.
pub fn query_rows(store: &CostStore, sub: &clap::ArgMatches) -> Result<Vec<CostRecord>> {
    let year = *sub.get_one::<i32>("year").context("missing --year")?;
    let rows = match sub.get_one::<u32>("month") {
        Some(month) => find_by_year_month(store, year, *month)
            .with_context(|| format!("Failed to list costs for {}-{:02}", year, month))?,
        None => find_by_year(store, year)
            .with_context(|| format!("Failed to list costs for {}", year))?,
    };
    Ok(rows)
}
