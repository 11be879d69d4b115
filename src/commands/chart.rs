// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::{spend_by_category, spend_by_month};
use crate::commands::{rates::load_rates, target_currency};
use crate::db::CostStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;

pub fn handle(store: &CostStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pie", sub)) => pie(store, sub)?,
        Some(("bar", sub)) => bar(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn pie(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").context("missing --year")?;
    let month = *sub.get_one::<u32>("month").context("missing --month")?;
    let target = target_currency(sub)?;
    let rates = load_rates(store, sub)?;

    let data = spend_by_category(store, year, month, target, &rates)
        .with_context(|| format!("Failed to generate chart data for {}-{:02}", year, month))?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No data available for the selected period.");
        return Ok(());
    }
    let sum: Decimal = data.iter().map(|d| d.amount).sum();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|d| {
            let share = if sum.is_zero() {
                Decimal::ZERO
            } else {
                d.amount / sum * Decimal::ONE_HUNDRED
            };
            vec![
                d.category.to_string(),
                fmt_money(&d.amount),
                format!("{:.0}%", share),
            ]
        })
        .collect();
    let hdr = format!("Spent ({})", target);
    println!("{}", pretty_table(&["Category", &hdr, "Share"], rows));
    Ok(())
}

fn bar(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").context("missing --year")?;
    let target = target_currency(sub)?;
    let rates = load_rates(store, sub)?;

    let data = spend_by_month(store, year, target, &rates)
        .with_context(|| format!("Failed to generate chart data for {}", year))?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.iter().all(|d| d.amount.is_zero()) {
        println!("No data available for the selected year.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|d| vec![d.name.to_string(), fmt_money(&d.amount)])
        .collect();
    let hdr = format!("Total Cost ({})", target);
    println!("{}", pretty_table(&["Month", &hdr], rows));
    Ok(())
}
