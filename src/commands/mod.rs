// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod costs;
pub mod report;
pub mod chart;
pub mod settings;
pub mod rates;

use crate::models::Currency;
use anyhow::{Context, Result};

pub(crate) fn target_currency(sub: &clap::ArgMatches) -> Result<Currency> {
    let raw = sub
        .get_one::<String>("currency")
        .context("missing --currency")?;
    raw.parse::<Currency>().map_err(anyhow::Error::msg)
}
