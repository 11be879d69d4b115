// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use costmanager::chart::{spend_by_category, spend_by_month};
use costmanager::db::{CostStore, FixedClock};
use costmanager::models::{Category, Currency, NewCost};
use costmanager::rates::RateTable;
use costmanager::report::build_report;
use costmanager::CostError;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn add(store: &mut CostStore, m: u32, d: u32, sum: &str, ccy: Currency, cat: Category) {
    store.set_clock(FixedClock(Utc.with_ymd_and_hms(2024, m, d, 9, 0, 0).unwrap()));
    store
        .insert(NewCost {
            sum: dec(sum),
            currency: ccy,
            category: cat,
            description: String::new(),
        })
        .unwrap();
}

fn setup() -> (CostStore, RateTable) {
    let mut store = CostStore::open_in_memory().unwrap();
    add(&mut store, 3, 2, "20", Currency::Usd, Category::Transport);
    add(&mut store, 3, 5, "37", Currency::Ils, Category::Food);
    add(&mut store, 3, 9, "5", Currency::Usd, Category::Food);
    add(&mut store, 3, 20, "8", Currency::Gbp, Category::Entertainment);
    add(&mut store, 7, 1, "100", Currency::Usd, Category::Utilities);
    let mut rates = RateTable::new();
    rates.insert(Currency::Usd, dec("1")).unwrap();
    rates.insert(Currency::Ils, dec("3.7")).unwrap();
    rates.insert(Currency::Gbp, dec("0.8")).unwrap();
    (store, rates)
}

#[test]
fn category_totals_in_first_seen_order() {
    let (store, rates) = setup();
    let data = spend_by_category(&store, 2024, 3, Currency::Usd, &rates).unwrap();
    let got: Vec<(Category, Decimal)> = data.iter().map(|d| (d.category, d.amount)).collect();
    assert_eq!(
        got,
        vec![
            (Category::Transport, dec("20")),
            (Category::Food, dec("15")),
            (Category::Entertainment, dec("10")),
        ]
    );
}

#[test]
fn category_totals_match_report_total() {
    let (store, rates) = setup();
    let pie = spend_by_category(&store, 2024, 3, Currency::Ils, &rates).unwrap();
    let report = build_report(&store, 2024, 3, Currency::Ils, &rates).unwrap();
    let pie_sum: Decimal = pie.iter().map(|d| d.amount).sum();
    assert_eq!(pie_sum, report.total.total);
    assert_eq!(report.total.total, dec("166.5"));
}

#[test]
fn empty_month_has_no_slices() {
    let (store, rates) = setup();
    assert!(spend_by_category(&store, 2024, 4, Currency::Usd, &rates)
        .unwrap()
        .is_empty());
}

#[test]
fn month_totals_cover_whole_year() {
    let (store, rates) = setup();
    let data = spend_by_month(&store, 2024, Currency::Usd, &rates).unwrap();
    assert_eq!(data.len(), 12);
    assert_eq!(data[0].name, "Jan");
    assert_eq!(data[11].name, "Dec");
    assert_eq!(data[2].month, 3);
    assert_eq!(data[2].amount, dec("45"));
    assert_eq!(data[6].amount, dec("100"));
    let rest: Decimal = data
        .iter()
        .filter(|d| d.month != 3 && d.month != 7)
        .map(|d| d.amount)
        .sum();
    assert_eq!(rest, Decimal::ZERO);
}

#[test]
fn year_without_costs_is_all_zero() {
    let (store, rates) = setup();
    let data = spend_by_month(&store, 2023, Currency::Gbp, &rates).unwrap();
    assert_eq!(data.len(), 12);
    assert!(data.iter().all(|d| d.amount.is_zero()));
}

#[test]
fn overflowing_conversion_is_an_error() {
    let mut store = CostStore::open_in_memory().unwrap();
    add(&mut store, 3, 1, "10000000000", Currency::Usd, Category::Other);
    let table = RateTable::from_json_str(r#"{"USD": 1e-20, "ILS": 1}"#).unwrap();
    assert!(matches!(
        spend_by_category(&store, 2024, 3, Currency::Ils, &table),
        Err(CostError::ConversionOverflow { .. })
    ));
    assert!(matches!(
        spend_by_month(&store, 2024, Currency::Ils, &table),
        Err(CostError::ConversionOverflow { .. })
    ));
}

#[test]
fn overflowing_bucket_is_an_error() {
    let mut store = CostStore::open_in_memory().unwrap();
    add(&mut store, 3, 1, "50000000000000000000000000000", Currency::Usd, Category::Food);
    add(&mut store, 3, 2, "50000000000000000000000000000", Currency::Usd, Category::Food);
    let table = RateTable::new();
    assert!(matches!(
        spend_by_category(&store, 2024, 3, Currency::Usd, &table),
        Err(CostError::ConversionOverflow { .. })
    ));
    assert!(matches!(
        spend_by_month(&store, 2024, Currency::Usd, &table),
        Err(CostError::ConversionOverflow { .. })
    ));
}
