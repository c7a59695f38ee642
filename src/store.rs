// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! String-keyed document store shared by the ledger and the configuration lists.
//!
//! Every value is a JSON document. Reads never fail: a missing or unreadable
//! document yields the caller's fallback. Writes report their failures.

use crate::error::{LedgerError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::warn;

pub const BANKROLLS_KEY: &str = "bancas";
pub const TRANSACTIONS_KEY: &str = "transacoes";
pub const BETS_KEY: &str = "apostas";
pub const PREFERENCES_KEY: &str = "preferencias";

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Applies every entry or none of them.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value.to_string())])
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        (**self).set_many(entries)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// In-process store used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent write fails with `StorageUnavailable`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        if self.read_only {
            return Err(LedgerError::StorageUnavailable(
                "store is read-only".to_string(),
            ));
        }
        for (k, v) in entries {
            self.entries.insert((*k).to_string(), v.clone());
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

pub fn read<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(err) => {
            warn!(key, error = %err, "could not read stored document, using fallback");
            return fallback;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(err) => {
            warn!(key, error = %err, "stored document is corrupt, using fallback");
            fallback
        }
    }
}

pub fn write<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHealth {
    Missing,
    Ok,
    Corrupt,
}

/// Tells apart the cases `read` folds into its fallback.
pub fn inspect<T, S>(store: &S, key: &str) -> KeyHealth
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key) {
        Ok(None) => KeyHealth::Missing,
        Ok(Some(raw)) if serde_json::from_str::<T>(&raw).is_ok() => KeyHealth::Ok,
        _ => KeyHealth::Corrupt,
    }
}
