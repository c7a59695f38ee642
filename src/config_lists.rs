// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::ConfigItem;
use crate::store::{KvStore, read, write};
use crate::utils::{new_id, require_name};
use chrono::Utc;
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigList {
    Bookmakers,
    Tipsters,
    Categories,
    Competitions,
    BetTypes,
}

impl ConfigList {
    pub const ALL: [ConfigList; 5] = [
        ConfigList::Bookmakers,
        ConfigList::Tipsters,
        ConfigList::Categories,
        ConfigList::Competitions,
        ConfigList::BetTypes,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            ConfigList::Bookmakers => "casas_apostas",
            ConfigList::Tipsters => "tipsters",
            ConfigList::Categories => "categorias",
            ConfigList::Competitions => "competicoes",
            ConfigList::BetTypes => "tipos_apostas",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigList::Bookmakers => "bookmakers",
            ConfigList::Tipsters => "tipsters",
            ConfigList::Categories => "categories",
            ConfigList::Competitions => "competitions",
            ConfigList::BetTypes => "bet-types",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            ConfigList::Bookmakers => "Bookmaker",
            ConfigList::Tipsters => "Tipster",
            ConfigList::Categories => "Category",
            ConfigList::Competitions => "Competition",
            ConfigList::BetTypes => "Bet type",
        }
    }
}

impl fmt::Display for ConfigList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigList {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ConfigList::ALL
            .into_iter()
            .find(|l| l.name() == s || l.storage_key() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown list '{}' (use bookmakers|tipsters|categories|competitions|bet-types)",
                    s
                )
            })
    }
}

/// CRUD over the five independent name lists.
pub struct ConfigStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> ConfigStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self, list: ConfigList) -> Vec<ConfigItem> {
        read(&self.store, list.storage_key(), Vec::new())
    }

    pub fn search(&self, list: ConfigList, query: &str) -> Vec<ConfigItem> {
        let q = query.trim().to_lowercase();
        self.list(list)
            .into_iter()
            .filter(|i| i.name.to_lowercase().contains(&q))
            .collect()
    }

    pub fn add(&mut self, list: ConfigList, name: &str) -> Result<ConfigItem> {
        let name = require_name(list.singular(), name)?;
        let mut items = self.list(list);
        let item = ConfigItem {
            id: new_id(),
            name,
            created_at: Utc::now(),
        };
        items.push(item.clone());
        write(&mut self.store, list.storage_key(), &items)?;
        info!(list = list.name(), id = %item.id, "added config item");
        Ok(item)
    }

    /// Returns `false` when no item has `id`.
    pub fn update(&mut self, list: ConfigList, id: &str, new_name: &str) -> Result<bool> {
        let name = require_name(list.singular(), new_name)?;
        let mut items = self.list(list);
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        item.name = name;
        write(&mut self.store, list.storage_key(), &items)?;
        Ok(true)
    }

    pub fn remove(&mut self, list: ConfigList, id: &str) -> Result<bool> {
        let mut items = self.list(list);
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        write(&mut self.store, list.storage_key(), &items)?;
        info!(list = list.name(), id, "removed config item");
        Ok(true)
    }
}
