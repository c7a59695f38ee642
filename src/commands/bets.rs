// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::history::{BetFilter, BetSort, distinct_sports, filter_bets};
use crate::ledger::{BetDraft, BetPatch, Ledger, Settlement};
use crate::models::{Bet, BetKind, Leg, Outcome};
use crate::settings::get_preferences;
use crate::store::{BETS_KEY, KvStore, read};
use crate::utils::{
    fmt_signed_money, maybe_print_json, non_blank, parse_amount, parse_date, parse_decimal,
    parse_odds, parse_timestamp, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use rust_decimal::Decimal;

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("settle", sub)) => settle(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("sports", sub)) => {
            let bets: Vec<Bet> = read(&*store, BETS_KEY, Vec::new());
            let sports = distinct_sports(&bets);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sports)? {
                for sport in sports {
                    println!("{}", sport);
                }
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if Ledger::new(store).delete_bet(id)? {
                println!("Removed bet {}", id);
            } else {
                println!("No bet with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

/// `sport|competition|event|market|odds[|outcome]`
pub fn parse_leg(raw: &str) -> Result<Leg> {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    if !(5..=6).contains(&parts.len()) {
        return Err(anyhow!(
            "Invalid leg '{}', expected sport|competition|event|market|odds[|outcome]",
            raw
        ));
    }
    let outcome = match parts.get(5) {
        Some(o) if !o.is_empty() => o.parse::<Outcome>().map_err(|e| anyhow!(e))?,
        _ => Outcome::Pending,
    };
    Ok(Leg {
        sport: parts[0].to_string(),
        competition: parts[1].to_string(),
        event: parts[2].to_string(),
        market: parts[3].to_string(),
        odds: parse_odds(parts[4])?,
        outcome,
    })
}

fn parse_outcome(raw: &str) -> Result<Outcome> {
    raw.parse::<Outcome>().map_err(|e| anyhow!(e))
}

fn cashout_arg(sub: &clap::ArgMatches) -> Result<Option<Decimal>> {
    Ok(sub
        .get_one::<String>("cashout")
        .map(|s| parse_amount("cash-out amount", s))
        .transpose()?)
}

fn add(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let outcome = parse_outcome(sub.get_one::<String>("outcome").unwrap())?;
    let settlement = Settlement::from_outcome(outcome, cashout_arg(sub)?)?;
    let placed_at = match sub.get_one::<String>("date") {
        Some(raw) => {
            parse_timestamp(raw).with_context(|| format!("Invalid date '{}'", raw))?
        }
        None => Local::now().naive_local(),
    };
    let first = Leg {
        sport: sub.get_one::<String>("sport").unwrap().trim().to_string(),
        competition: sub.get_one::<String>("competition").unwrap().trim().to_string(),
        event: sub.get_one::<String>("event").unwrap().trim().to_string(),
        market: sub.get_one::<String>("market").unwrap().trim().to_string(),
        odds: parse_odds(sub.get_one::<String>("odds").unwrap())?,
        outcome,
    };
    let stake = parse_decimal("stake", sub.get_one::<String>("stake").unwrap())?;

    let mut draft = BetDraft::new(
        sub.get_one::<String>("bankroll").unwrap().trim(),
        first,
        stake,
        placed_at,
    )
    .settled(settlement);
    if let Some(legs) = sub.get_many::<String>("leg") {
        for raw in legs {
            draft = draft.with_leg(parse_leg(raw)?);
        }
    }
    draft.bookmaker = non_blank(sub.get_one::<String>("bookmaker"));
    draft.tipster = non_blank(sub.get_one::<String>("tipster"));
    draft.category = non_blank(sub.get_one::<String>("category"));
    draft.notes = non_blank(sub.get_one::<String>("notes"));
    draft.live = sub.get_flag("live");
    draft.freebet = sub.get_flag("freebet");

    let symbol = get_preferences(&*store).currency_symbol;
    let bet = Ledger::new(store).record_bet(draft)?;
    println!(
        "Recorded {} bet {} @ {} on '{}' ({}, {})",
        bet.kind,
        bet.id,
        bet.odds,
        bet.event,
        bet.outcome,
        fmt_signed_money(&bet.profit, &symbol)
    );
    Ok(())
}

/// Filter and sort options shared by `bet list` and `export bets`.
pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<(BetFilter, BetSort)> {
    let filter = BetFilter {
        search: non_blank(sub.get_one::<String>("search")),
        sport: non_blank(sub.get_one::<String>("sport")),
        outcome: non_blank(sub.get_one::<String>("outcome"))
            .map(|s| parse_outcome(&s))
            .transpose()?,
        kind: non_blank(sub.get_one::<String>("kind"))
            .map(|s| s.parse::<BetKind>().map_err(|e| anyhow!(e)))
            .transpose()?,
        bookmaker: non_blank(sub.get_one::<String>("bookmaker")),
        tipster: non_blank(sub.get_one::<String>("tipster")),
        bankroll_id: non_blank(sub.get_one::<String>("bankroll")),
        from: non_blank(sub.get_one::<String>("from"))
            .map(|s| parse_date(&s))
            .transpose()?,
        to: non_blank(sub.get_one::<String>("to"))
            .map(|s| parse_date(&s))
            .transpose()?,
    };
    let sort = sub
        .get_one::<String>("sort")
        .map(|s| s.parse::<BetSort>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();
    Ok((filter, sort))
}

pub fn query_rows(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<Vec<Bet>> {
    let (filter, sort) = filter_from_args(sub)?;
    let all: Vec<Bet> = read(store, BETS_KEY, Vec::new());
    let mut rows = filter_bets(&all, &filter, sort);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = get_preferences(&*store).currency_symbol;
    let data = query_rows(&*store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.placed_at.format("%Y-%m-%d %H:%M").to_string(),
                    b.id.clone(),
                    b.sport.clone(),
                    b.event.clone(),
                    b.market.clone(),
                    b.odds.round_dp(2).to_string(),
                    b.stake.round_dp(2).to_string(),
                    b.outcome.to_string(),
                    fmt_signed_money(&b.profit, &symbol),
                    b.bookmaker.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Date", "ID", "Sport", "Event", "Market", "Odds", "Stake", "Outcome", "Profit",
                    "Bookmaker",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn settle(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let outcome = parse_outcome(sub.get_one::<String>("outcome").unwrap())?;
    let settlement = Settlement::from_outcome(outcome, cashout_arg(sub)?)?;
    let symbol = get_preferences(&*store).currency_symbol;
    match Ledger::new(store).settle_bet(id, settlement)? {
        Some(bet) => println!(
            "Bet {} settled as {} ({})",
            bet.id,
            bet.outcome,
            fmt_signed_money(&bet.profit, &symbol)
        ),
        None => println!("No bet with id {}", id),
    }
    Ok(())
}

fn edit(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let text = |k: &str| sub.get_one::<String>(k).map(|s| s.trim().to_string());
    let patch = BetPatch {
        sport: non_blank(sub.get_one::<String>("sport")),
        competition: text("competition"),
        event: text("event"),
        market: text("market"),
        odds: sub
            .get_one::<String>("odds")
            .map(|s| parse_odds(s))
            .transpose()?,
        stake: sub
            .get_one::<String>("stake")
            .map(|s| parse_decimal("stake", s))
            .transpose()?,
        bookmaker: non_blank(sub.get_one::<String>("bookmaker")),
        tipster: non_blank(sub.get_one::<String>("tipster")),
        category: non_blank(sub.get_one::<String>("category")),
        notes: non_blank(sub.get_one::<String>("notes")),
        ..BetPatch::default()
    };
    match Ledger::new(store).update_bet(id, patch)? {
        Some(bet) => println!("Updated bet {}", bet.id),
        None => println!("No bet with id {}", id),
    }
    Ok(())
}
