// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use costmanager::commands::{costs, rates};
use costmanager::db::{CostStore, FixedClock};
use costmanager::models::{Category, Currency};
use costmanager::{cli, CostError};
use rust_decimal::Decimal;
use std::io::Write;

fn sub_of<'a>(m: &'a clap::ArgMatches, name: &str) -> &'a clap::ArgMatches {
    match m.subcommand() {
        Some((n, sub)) if n == name => sub,
        _ => panic!("no {} subcommand", name),
    }
}

#[test]
fn add_parses_case_insensitive_codes() {
    let m = cli::build_cli().get_matches_from([
        "costmanager",
        "add",
        "--sum",
        "12.50",
        "--currency",
        "euro",
        "--category",
        "food",
        "-d",
        "bagel",
    ]);
    let cost = costs::new_cost_from(sub_of(&m, "add")).unwrap();
    assert_eq!(cost.sum, Decimal::new(1250, 2));
    assert_eq!(cost.currency, Currency::Euro);
    assert_eq!(cost.category, Category::Food);
    assert_eq!(cost.description, "bagel");
}

#[test]
fn add_rejects_non_positive_sum() {
    let m = cli::build_cli().get_matches_from([
        "costmanager", "add", "--sum", "0", "--category", "Other",
    ]);
    assert!(costs::new_cost_from(sub_of(&m, "add")).is_err());
}

#[test]
fn month_out_of_range_is_rejected() {
    let res = cli::build_cli().try_get_matches_from([
        "costmanager", "report", "--year", "2024", "--month", "13",
    ]);
    assert!(res.is_err());
}

#[test]
fn list_uses_month_or_year() {
    let mut store = CostStore::open_in_memory().unwrap();
    for (m, d) in [(2u32, 1u32), (2, 14), (9, 30)] {
        store.set_clock(FixedClock(Utc.with_ymd_and_hms(2024, m, d, 8, 0, 0).unwrap()));
        let m = cli::build_cli().get_matches_from([
            "costmanager", "add", "--sum", "3", "--category", "Transport",
        ]);
        store
            .insert(costs::new_cost_from(sub_of(&m, "add")).unwrap())
            .unwrap();
    }

    let m = cli::build_cli().get_matches_from(["costmanager", "list", "--year", "2024", "--month", "2"]);
    let rows = costs::query_rows(&store, sub_of(&m, "list")).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.year_month == "2024-02"));

    let m = cli::build_cli().get_matches_from(["costmanager", "list", "--year", "2024"]);
    let rows = costs::query_rows(&store, sub_of(&m, "list")).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].year_month, "2024-09");
}

#[test]
fn rates_file_is_read_and_validated() {
    let mut good = tempfile::NamedTempFile::new().unwrap();
    write!(good, r#"{{"USD": 1, "ILS": 3.7}}"#).unwrap();
    let t = rates::read_rates_file(good.path()).unwrap();
    assert_eq!(t.get(Currency::Ils), Some(Decimal::new(37, 1)));

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    write!(bad, r#"{{"USD": "one"}}"#).unwrap();
    let err = rates::read_rates_file(bad.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CostError>(),
        Some(CostError::InvalidRateTable { .. })
    ));
}

#[test]
fn report_loads_rates_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{"USD": 1, "GBP": 0.5}}"#).unwrap();
    let path = f.path().to_string_lossy().to_string();
    let m = cli::build_cli().get_matches_from([
        "costmanager", "report", "-y", "2024", "-m", "1", "-c", "GBP", "--rates-file", &path,
    ]);
    let store = CostStore::open_in_memory().unwrap();
    let t = rates::load_rates(&store, sub_of(&m, "report")).unwrap();
    assert_eq!(t.rate_of(Currency::Gbp), Decimal::new(5, 1));
}

#[test]
fn chart_needs_a_kind() {
    assert!(cli::build_cli()
        .try_get_matches_from(["costmanager", "chart"])
        .is_err());
    assert!(cli::build_cli()
        .try_get_matches_from(["costmanager", "chart", "bar", "-y", "2024"])
        .is_ok());
}
