// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{BankrollPatch, Ledger};
use crate::models::TransactionKind;
use crate::settings::get_preferences;
use crate::store::KvStore;
use crate::utils::{
    fmt_money, fmt_signed_money, maybe_print_json, non_blank, parse_amount, pretty_table,
};
use anyhow::{Result, anyhow};

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if Ledger::new(store).delete_bankroll(id)? {
                println!("Removed bankroll {} with its bets and transactions", id);
            } else {
                println!("No bankroll with id {}", id);
            }
        }
        Some(("deposit", sub)) => move_funds(store, sub, TransactionKind::Deposit)?,
        Some(("withdraw", sub)) => move_funds(store, sub, TransactionKind::Withdrawal)?,
        Some(("transactions", sub)) => transactions(store, sub)?,
        Some(("recalc", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let symbol = get_preferences(&*store).currency_symbol;
            match Ledger::new(store).recalculate_balance(id)? {
                Some(balance) => println!("Balance of {}: {}", id, fmt_money(&balance, &symbol)),
                None => println!("No bankroll with id {}", id),
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let initial = parse_amount("initial balance", sub.get_one::<String>("initial").unwrap())?;
    let symbol = get_preferences(&*store).currency_symbol;
    let b = Ledger::new(store).create_bankroll(name, initial)?;
    println!(
        "Added bankroll '{}' ({}) starting at {}",
        b.name,
        b.id,
        fmt_money(&b.initial_balance, &symbol)
    );
    Ok(())
}

fn list(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = get_preferences(&*store).currency_symbol;
    let bankrolls = Ledger::new(store).list_bankrolls();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bankrolls)? {
        let rows = bankrolls
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.name.clone(),
                    fmt_money(&b.initial_balance, &symbol),
                    fmt_money(&b.current_balance(), &symbol),
                    fmt_signed_money(&b.profit_since_start(), &symbol),
                    b.color.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Initial", "Current", "Since start", "Color"],
                rows
            )
        );
    }
    Ok(())
}

fn edit(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let patch = BankrollPatch {
        name: sub.get_one::<String>("name").cloned(),
        color: non_blank(sub.get_one::<String>("color")),
        initial_balance: sub
            .get_one::<String>("initial")
            .map(|s| parse_amount("initial balance", s))
            .transpose()?,
    };
    match Ledger::new(store).update_bankroll(id, patch)? {
        Some(b) => println!("Updated bankroll '{}' ({})", b.name, b.id),
        None => println!("No bankroll with id {}", id),
    }
    Ok(())
}

fn move_funds(store: &mut dyn KvStore, sub: &clap::ArgMatches, kind: TransactionKind) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let amount = parse_amount("amount", sub.get_one::<String>("amount").unwrap())?;
    let description = non_blank(sub.get_one::<String>("description"));
    let symbol = get_preferences(&*store).currency_symbol;
    let mut ledger = Ledger::new(store);
    ledger.record_transaction(id, kind, amount, description)?;
    let balance = ledger
        .bankroll(id)
        .map(|b| b.current_balance())
        .ok_or_else(|| anyhow!("Bankroll '{}' vanished after recording", id))?;
    let verb = match kind {
        TransactionKind::Deposit => "Deposited",
        TransactionKind::Withdrawal => "Withdrew",
    };
    println!(
        "{} {} (balance now {})",
        verb,
        fmt_money(&amount, &symbol),
        fmt_money(&balance, &symbol)
    );
    Ok(())
}

fn transactions(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = non_blank(sub.get_one::<String>("id"));
    let symbol = get_preferences(&*store).currency_symbol;
    let mut txs = Ledger::new(store).transactions(id.as_deref());
    txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        let rows = txs
            .iter()
            .map(|t| {
                vec![
                    t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    t.bankroll_id.clone(),
                    fmt_signed_money(&t.kind.signed(t.amount), &symbol),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Bankroll", "Amount", "Description"], rows)
        );
    }
    Ok(())
}
