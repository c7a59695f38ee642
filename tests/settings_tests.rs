// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use betclip::cli;
use betclip::commands::settings;
use betclip::settings::{
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_LOG_FILTER, Settings, get_preferences, set_currency_symbol,
};
use betclip::store::MemoryStore;
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_without_environment() {
    let s = Settings::from_lookup(lookup(&[]));
    assert_eq!(s.db_path, None);
    assert_eq!(s.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn environment_overrides_and_blank_values_ignored() {
    let s = Settings::from_lookup(lookup(&[
        ("BETCLIP_DB", "/tmp/bets.sqlite"),
        ("BETCLIP_LOG", "betclip=debug"),
    ]));
    assert_eq!(s.db_path, Some(PathBuf::from("/tmp/bets.sqlite")));
    assert_eq!(s.log_filter, "betclip=debug");

    let s = Settings::from_lookup(lookup(&[("BETCLIP_DB", "  "), ("BETCLIP_LOG", "")]));
    assert_eq!(s.db_path, None);
    assert_eq!(s.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn currency_symbol_round_trip() {
    let mut store = MemoryStore::new();
    assert_eq!(get_preferences(&store).currency_symbol, DEFAULT_CURRENCY_SYMBOL);

    set_currency_symbol(&mut store, " € ").unwrap();
    assert_eq!(get_preferences(&store).currency_symbol, "€");
    assert!(set_currency_symbol(&mut store, "   ").is_err());
    assert_eq!(get_preferences(&store).currency_symbol, "€");
}

#[test]
fn currency_command_sets_symbol() {
    let mut store = MemoryStore::new();
    let matches = cli::build_cli().get_matches_from(["betclip", "settings", "currency", "--set", "US$"]);
    if let Some(("settings", m)) = matches.subcommand() {
        settings::handle(&mut store, m).unwrap();
    } else {
        panic!("no settings subcommand");
    }
    assert_eq!(get_preferences(&store).currency_symbol, "US$");
}
