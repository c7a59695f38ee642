// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::store::{KvStore, PREFERENCES_KEY, read, write};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DB_ENV: &str = "BETCLIP_DB";
pub const LOG_ENV: &str = "BETCLIP_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Process-level settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Overrides the platform data dir location of the database.
    pub db_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            db_path: non_empty(DB_ENV).map(PathBuf::from),
            log_filter: non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

/// User preferences persisted next to the ledger documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "simboloMoeda")]
    pub currency_symbol: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

pub fn get_preferences<S: KvStore + ?Sized>(store: &S) -> Preferences {
    read(store, PREFERENCES_KEY, Preferences::default())
}

pub fn set_currency_symbol<S: KvStore + ?Sized>(store: &mut S, symbol: &str) -> Result<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(LedgerError::validation("currency symbol cannot be empty"));
    }
    let mut prefs = get_preferences(store);
    prefs.currency_symbol = symbol.to_string();
    write(store, PREFERENCES_KEY, &prefs)
}
