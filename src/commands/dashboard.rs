// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::settings::get_preferences;
use crate::stats::Dashboard;
use crate::store::KvStore;
use crate::utils::{fmt_money, fmt_signed_money, maybe_print_json, non_blank, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let scope = non_blank(m.get_one::<String>("bankroll"));
    let symbol = get_preferences(&*store).currency_symbol;
    let ledger = Ledger::new(store);
    let mut bankrolls = ledger.list_bankrolls();
    if let Some(id) = &scope {
        bankrolls.retain(|b| &b.id == id);
    }
    let bets = ledger.bets(scope.as_deref());
    let dash = Dashboard::build(&bankrolls, &bets);

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dash)? {
        return Ok(());
    }

    let s = &dash.stats;
    let streak = if s.current_streak > 0 {
        format!("+{}", s.current_streak)
    } else {
        s.current_streak.to_string()
    };
    println!(
        "{}",
        pretty_table(
            &["Metric", "Value"],
            vec![
                vec!["Profit/Loss".into(), fmt_signed_money(&s.total_profit, &symbol)],
                vec!["ROI".into(), format!("{:.1}%", s.roi.round_dp(1))],
                vec!["Hit rate".into(), format!("{:.1}%", s.hit_rate.round_dp(1))],
                vec!["Total bets".into(), s.total_bets.to_string()],
                vec![
                    "Won / Lost / Pending".into(),
                    format!("{} / {} / {}", s.won_bets, s.lost_bets, s.pending_bets),
                ],
                vec!["Average odds".into(), format!("{:.2}", s.average_odds.round_dp(2))],
                vec!["Average stake".into(), fmt_money(&s.average_stake, &symbol)],
                vec!["Current streak".into(), streak],
                vec!["Longest win streak".into(), s.longest_win_streak.to_string()],
            ],
        )
    );

    if !dash.evolution.is_empty() {
        let rows = dash
            .evolution
            .iter()
            .map(|p| vec![p.label.clone(), fmt_signed_money(&p.cumulative_profit, &symbol)])
            .collect();
        println!("{}", pretty_table(&["Date", "Cumulative profit"], rows));
    }
    if !dash.sports.is_empty() {
        let rows = dash
            .sports
            .iter()
            .map(|s| vec![s.sport.clone(), s.bets.to_string()])
            .collect();
        println!("{}", pretty_table(&["Sport", "Bets"], rows));
    }
    if !dash.bankrolls.is_empty() {
        let rows = dash
            .bankrolls
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    fmt_money(&b.current_balance, &symbol),
                    fmt_signed_money(&b.profit_since_start, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Bankroll", "Balance", "Since start"], rows)
        );
    }
    Ok(())
}
