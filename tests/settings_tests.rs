// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use costmanager::db::CostStore;
use costmanager::settings::{default_rates_url, get_rates_url, reset_rates_url, set_rates_url};
use costmanager::CostError;

#[test]
fn first_read_stores_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.sqlite");
    {
        let store = CostStore::open(&path).unwrap();
        assert_eq!(get_rates_url(&store).unwrap(), default_rates_url());
    }
    let conn = rusqlite::Connection::open(&path).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency_rates_url'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(stored, default_rates_url());
}

#[test]
fn set_overrides_and_blank_resets() {
    let store = CostStore::open_in_memory().unwrap();
    set_rates_url(&store, "  https://rates.example.test/latest.json ").unwrap();
    assert_eq!(
        get_rates_url(&store).unwrap(),
        "https://rates.example.test/latest.json"
    );

    set_rates_url(&store, "   ").unwrap();
    assert_eq!(get_rates_url(&store).unwrap(), default_rates_url());

    set_rates_url(&store, "http://localhost:8080/r.json").unwrap();
    assert_eq!(reset_rates_url(&store).unwrap(), default_rates_url());
    assert_eq!(get_rates_url(&store).unwrap(), default_rates_url());
}

#[test]
fn url_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.sqlite");
    {
        let store = CostStore::open(&path).unwrap();
        set_rates_url(&store, "https://rates.example.test/v2.json").unwrap();
    }
    let store = CostStore::open(&path).unwrap();
    assert_eq!(
        get_rates_url(&store).unwrap(),
        "https://rates.example.test/v2.json"
    );
}

#[test]
fn closed_store_is_unavailable() {
    let mut store = CostStore::open_in_memory().unwrap();
    store.close();
    assert!(matches!(
        get_rates_url(&store),
        Err(CostError::StorageUnavailable { .. })
    ));
    assert!(matches!(
        set_rates_url(&store, "https://x.test"),
        Err(CostError::StorageUnavailable { .. })
    ));
}
