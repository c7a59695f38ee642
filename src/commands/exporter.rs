// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::bets::filter_from_args;
use crate::history::filter_bets;
use crate::models::Bet;
use crate::store::{BETS_KEY, KvStore, read};
use anyhow::{Result, bail};
use serde::Serialize;
use std::io::Write;

pub const CSV_HEADER: [&str; 11] = [
    "Date",
    "Sport",
    "Competition",
    "Event",
    "Market",
    "Odds",
    "Stake",
    "Outcome",
    "Profit",
    "Bookmaker",
    "Tipster",
];

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bets", sub)) => export_bets(store, sub),
        _ => Ok(()),
    }
}

#[derive(Serialize)]
pub struct ExportRow {
    pub date: String,
    pub sport: String,
    pub competition: String,
    pub event: String,
    pub market: String,
    pub odds: String,
    pub stake: String,
    pub outcome: String,
    pub profit: String,
    pub bookmaker: String,
    pub tipster: String,
}

impl From<&Bet> for ExportRow {
    fn from(b: &Bet) -> Self {
        ExportRow {
            date: b.placed_at.format("%Y-%m-%dT%H:%M").to_string(),
            sport: b.sport.clone(),
            competition: b.competition.clone(),
            event: b.event.clone(),
            market: b.market.clone(),
            odds: b.odds.normalize().to_string(),
            stake: b.stake.normalize().to_string(),
            outcome: b.outcome.to_string(),
            profit: b.profit.normalize().to_string(),
            bookmaker: b.bookmaker.clone().unwrap_or_default(),
            tipster: b.tipster.clone().unwrap_or_default(),
        }
    }
}

pub fn write_bets_csv<W: Write>(out: W, bets: &[Bet]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for bet in bets {
        let r = ExportRow::from(bet);
        wtr.write_record([
            r.date,
            r.sport,
            r.competition,
            r.event,
            r.market,
            r.odds,
            r.stake,
            r.outcome,
            r.profit,
            r.bookmaker,
            r.tipster,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_bets(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let (filter, sort) = filter_from_args(sub)?;
    let all: Vec<Bet> = read(store, BETS_KEY, Vec::new());
    let bets = filter_bets(&all, &filter, sort);

    match fmt.as_str() {
        "csv" => {
            let file = std::fs::File::create(out)?;
            write_bets_csv(file, &bets)?;
        }
        "json" => {
            let items: Vec<ExportRow> = bets.iter().map(ExportRow::from).collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} bets to {}", bets.len(), out);
    Ok(())
}
