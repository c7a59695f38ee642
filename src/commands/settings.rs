// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{get_preferences, set_currency_symbol};
use crate::store::KvStore;
use anyhow::Result;

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            if let Some(symbol) = sub.get_one::<String>("set") {
                set_currency_symbol(store, symbol)?;
            }
            println!("Currency symbol: {}", get_preferences(&*store).currency_symbol);
        }
        _ => {}
    }
    Ok(())
}
