// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::CostStore;
use crate::settings::{default_rates_url, get_rates_url, reset_rates_url, set_rates_url};
use anyhow::{Context, Result};

pub fn handle(store: &CostStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").context("missing url")?;
            set_rates_url(store, url)?;
            println!("Currency rates URL set to {}", get_rates_url(store)?);
        }
        Some(("reset", _)) => {
            let url = reset_rates_url(store)?;
            println!("Currency rates URL reset to {}", url);
        }
        _ => {
            println!("Currency rates URL: {}", get_rates_url(store)?);
            println!("Default: {}", default_rates_url());
        }
    }
    Ok(())
}
