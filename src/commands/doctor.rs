// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config_lists::ConfigList;
use crate::ledger::{Settlement, combined_odds, compute_balance};
use crate::models::{Bankroll, Bet, BetKind, ConfigItem, Outcome, Transaction};
use crate::settings::Preferences;
use crate::store::{
    BANKROLLS_KEY, BETS_KEY, KeyHealth, KvStore, PREFERENCES_KEY, TRANSACTIONS_KEY, inspect, read,
};
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::HashSet;

pub fn handle(store: &dyn KvStore) -> Result<()> {
    let rows: Vec<Vec<String>> = findings(store)
        .into_iter()
        .map(|(issue, detail)| vec![issue.to_string(), detail])
        .collect();
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn findings(store: &dyn KvStore) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();

    // 1) Documents that reads silently replace with an empty fallback
    let mut corrupt = Vec::new();
    if inspect::<Vec<Bankroll>, _>(store, BANKROLLS_KEY) == KeyHealth::Corrupt {
        corrupt.push(BANKROLLS_KEY);
    }
    if inspect::<Vec<Transaction>, _>(store, TRANSACTIONS_KEY) == KeyHealth::Corrupt {
        corrupt.push(TRANSACTIONS_KEY);
    }
    if inspect::<Vec<Bet>, _>(store, BETS_KEY) == KeyHealth::Corrupt {
        corrupt.push(BETS_KEY);
    }
    if inspect::<Preferences, _>(store, PREFERENCES_KEY) == KeyHealth::Corrupt {
        corrupt.push(PREFERENCES_KEY);
    }
    for list in ConfigList::ALL {
        if inspect::<Vec<ConfigItem>, _>(store, list.storage_key()) == KeyHealth::Corrupt {
            corrupt.push(list.storage_key());
        }
    }
    for key in corrupt {
        rows.push(("corrupt_document", key.to_string()));
    }

    let bankrolls: Vec<Bankroll> = read(store, BANKROLLS_KEY, Vec::new());
    let transactions: Vec<Transaction> = read(store, TRANSACTIONS_KEY, Vec::new());
    let bets: Vec<Bet> = read(store, BETS_KEY, Vec::new());

    // 2) Cached balances that no longer match their inputs
    for b in &bankrolls {
        match compute_balance(b, &transactions, &bets) {
            Ok(expected) if expected == b.current_balance() => {}
            Ok(expected) => rows.push((
                "balance_drift",
                format!("{} stored {} expected {}", b.id, b.current_balance(), expected),
            )),
            Err(err) => rows.push(("balance_overflow", err.to_string())),
        }
    }

    // 3) Records pointing at a bankroll that no longer exists
    let known: HashSet<&str> = bankrolls.iter().map(|b| b.id.as_str()).collect();
    for t in transactions.iter().filter(|t| !known.contains(t.bankroll_id.as_str())) {
        rows.push(("orphan_transaction", format!("{} -> {}", t.id, t.bankroll_id)));
    }
    for b in bets.iter().filter(|b| !known.contains(b.bankroll_id.as_str())) {
        rows.push(("orphan_bet", format!("{} -> {}", b.id, b.bankroll_id)));
    }

    // 4) Settled bets whose stored profit disagrees with their outcome
    for b in &bets {
        let expected = match b.outcome {
            Outcome::Won => Settlement::Won.profit(b.stake, b.odds),
            Outcome::Lost => Settlement::Lost.profit(b.stake, b.odds),
            _ => continue,
        };
        match expected {
            Ok(expected) if expected == b.profit => {}
            Ok(expected) => rows.push((
                "profit_mismatch",
                format!("{} stored {} expected {}", b.id, b.profit, expected),
            )),
            Err(err) => rows.push(("profit_mismatch", format!("{} {}", b.id, err))),
        }
    }

    // 5) Combined bets priced differently from their legs
    for b in bets.iter().filter(|b| b.kind == BetKind::Combined && !b.legs.is_empty()) {
        match combined_odds(&b.legs) {
            Ok(product) if product == b.odds => {}
            Ok(product) => rows.push((
                "combined_odds_mismatch",
                format!("{} stored {} legs {}", b.id, b.odds, product),
            )),
            Err(err) => rows.push(("combined_odds_mismatch", format!("{} {}", b.id, err))),
        }
    }

    rows
}
