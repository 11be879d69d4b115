// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{rates::load_rates, target_currency};
use crate::db::CostStore;
use crate::report::build_report;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &CostStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").context("missing --year")?;
    let month = *sub.get_one::<u32>("month").context("missing --month")?;
    let target = target_currency(sub)?;
    let rates = load_rates(store, sub)?;

    let report = build_report(store, year, month, target, &rates)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!(
        "Report for {}/{} in {}",
        report.month, report.year, report.total.currency
    );
    let rows: Vec<Vec<String>> = report
        .costs
        .iter()
        .map(|c| {
            vec![
                format!("{}/{}/{}", c.date.day, c.date.month, c.date.year),
                c.category.to_string(),
                c.description.clone(),
                fmt_money(&c.sum),
            ]
        })
        .collect();
    let amount_hdr = format!("Amount ({})", report.total.currency);
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Description", &amount_hdr], rows)
    );
    println!("Total: {}", fmt_money(&report.total.total));
    Ok(())
}
