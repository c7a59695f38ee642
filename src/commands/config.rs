// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config_lists::{ConfigList, ConfigStore};
use crate::store::KvStore;
use crate::utils::{maybe_print_json, non_blank, pretty_table};
use anyhow::{Result, anyhow};

fn list_arg(sub: &clap::ArgMatches) -> Result<ConfigList> {
    sub.get_one::<String>("list")
        .unwrap()
        .parse::<ConfigList>()
        .map_err(|e| anyhow!(e))
}

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let list = list_arg(sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let item = ConfigStore::new(store).add(list, name)?;
            println!("Added '{}' to {} ({})", item.name, list, item.id);
        }
        Some(("list", sub)) => {
            let list = list_arg(sub)?;
            let configs = ConfigStore::new(store);
            let items = match non_blank(sub.get_one::<String>("search")) {
                Some(q) => configs.search(list, &q),
                None => configs.list(list),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.clone(),
                            i.name.clone(),
                            i.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Created"], rows));
            }
        }
        Some(("rename", sub)) => {
            let list = list_arg(sub)?;
            let id = sub.get_one::<String>("id").unwrap().trim();
            let name = sub.get_one::<String>("name").unwrap();
            if ConfigStore::new(store).update(list, id, name)? {
                println!("Renamed {} in {}", id, list);
            } else {
                println!("No item {} in {}", id, list);
            }
        }
        Some(("rm", sub)) => {
            let list = list_arg(sub)?;
            let id = sub.get_one::<String>("id").unwrap().trim();
            if ConfigStore::new(store).remove(list, id)? {
                println!("Removed {} from {}", id, list);
            } else {
                println!("No item {} in {}", id, list);
            }
        }
        _ => {}
    }
    Ok(())
}
