// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use betclip::models::{Bet, BetKind, Outcome};
use betclip::stats::{Dashboard, DashboardStats, profit_evolution, sport_distribution};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bet(sport: &str, outcome: Outcome, stake: Decimal, odds: Decimal, profit: Decimal, day: u32) -> Bet {
    Bet {
        id: format!("bet-{}-{}", sport, day),
        bankroll_id: "main".into(),
        kind: BetKind::Single,
        sport: sport.into(),
        competition: String::new(),
        event: format!("Event {}", day),
        market: String::new(),
        odds,
        stake,
        outcome,
        profit,
        placed_at: NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap(),
        bookmaker: None,
        tipster: None,
        category: None,
        live: false,
        freebet: false,
        notes: None,
        legs: Vec::new(),
    }
}

#[test]
fn empty_collection_has_zero_metrics() {
    let s = DashboardStats::compute(&[]);
    assert_eq!(s.total_bets, 0);
    assert_eq!(s.roi, Decimal::ZERO);
    assert_eq!(s.hit_rate, Decimal::ZERO);
    assert_eq!(s.average_odds, Decimal::ZERO);
    assert_eq!(s.current_streak, 0);
    assert_eq!(s.longest_win_streak, 0);
}

#[test]
fn only_pending_bets_keep_rates_at_zero() {
    let bets = vec![
        bet("Futebol", Outcome::Pending, dec!(10), dec!(2), dec!(0), 1),
        bet("Futebol", Outcome::Pending, dec!(15), dec!(3), dec!(0), 2),
    ];
    let s = DashboardStats::compute(&bets);
    assert_eq!(s.total_bets, 2);
    assert_eq!(s.pending_bets, 2);
    assert_eq!(s.settled_bets, 0);
    assert_eq!(s.roi, Decimal::ZERO);
    assert_eq!(s.hit_rate, Decimal::ZERO);
    assert_eq!(s.average_stake, Decimal::ZERO);
}

#[test]
fn settled_metrics_ignore_pending() {
    let bets = vec![
        bet("Futebol", Outcome::Won, dec!(10), dec!(2.5), dec!(15), 1),
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 2),
        bet("Tênis", Outcome::Refunded, dec!(10), dec!(2), dec!(0), 3),
        bet("Tênis", Outcome::Pending, dec!(50), dec!(4), dec!(0), 4),
    ];
    let s = DashboardStats::compute(&bets);
    assert_eq!(s.total_bets, 4);
    assert_eq!(s.won_bets, 1);
    assert_eq!(s.lost_bets, 1);
    assert_eq!(s.pending_bets, 1);
    assert_eq!(s.settled_bets, 3);
    assert_eq!(s.total_profit, dec!(5));
    assert_eq!(s.total_stake, dec!(30));
    assert_eq!(s.roi.round_dp(2), dec!(16.67));
    assert_eq!(s.hit_rate.round_dp(2), dec!(33.33));
    assert_eq!(s.average_odds.round_dp(2), dec!(2.17));
    assert_eq!(s.average_stake, dec!(10));
}

#[test]
fn cashout_counts_towards_longest_but_breaks_current_streak() {
    let bets = vec![
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 1),
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 2),
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 3),
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 4),
        bet("Futebol", Outcome::CashedOut, dec!(10), dec!(2), dec!(4), 5),
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 6),
        bet("Futebol", Outcome::Pending, dec!(10), dec!(2), dec!(0), 7),
    ];
    let s = DashboardStats::compute(&bets);
    assert_eq!(s.longest_win_streak, 3);
    assert_eq!(s.current_streak, 1);
    assert_eq!(s.won_bets, 5);
}

#[test]
fn losing_run_gives_negative_current_streak() {
    let bets = vec![
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 1),
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 3),
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 2),
    ];
    let s = DashboardStats::compute(&bets);
    assert_eq!(s.current_streak, -2);
    assert_eq!(s.longest_win_streak, 1);
}

#[test]
fn evolution_is_cumulative_and_restartable() {
    let bets = vec![
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 5),
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 2),
        bet("Futebol", Outcome::Pending, dec!(10), dec!(2), dec!(0), 3),
        bet("Futebol", Outcome::Won, dec!(20), dec!(1.5), dec!(10), 4),
    ];
    let series = profit_evolution(&bets);
    assert_eq!(series.len(), 3);

    let first: Vec<_> = series.clone().collect();
    let again: Vec<_> = series.collect();
    assert_eq!(first, again);

    let points: Vec<(String, Decimal)> = first
        .into_iter()
        .map(|p| (p.label, p.cumulative_profit))
        .collect();
    assert_eq!(
        points,
        vec![
            ("02/02/2025".to_string(), dec!(10)),
            ("04/02/2025".to_string(), dec!(20)),
            ("05/02/2025".to_string(), dec!(10)),
        ]
    );
}

#[test]
fn sports_listed_in_first_seen_order() {
    let bets = vec![
        bet("Basquete", Outcome::Pending, dec!(10), dec!(2), dec!(0), 1),
        bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 2),
        bet("Basquete", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 3),
        bet("Tênis", Outcome::Won, dec!(10), dec!(2), dec!(10), 4),
        bet("Futebol", Outcome::Lost, dec!(10), dec!(2), dec!(-10), 5),
        bet("Basquete", Outcome::Won, dec!(10), dec!(2), dec!(10), 6),
    ];
    let dist: Vec<(String, usize)> = sport_distribution(&bets)
        .into_iter()
        .map(|s| (s.sport, s.bets))
        .collect();
    assert_eq!(
        dist,
        vec![
            ("Basquete".to_string(), 3),
            ("Futebol".to_string(), 2),
            ("Tênis".to_string(), 1),
        ]
    );
}

#[test]
fn dashboard_serializes_every_section() {
    let bets = vec![bet("Futebol", Outcome::Won, dec!(10), dec!(2), dec!(10), 1)];
    let dash = Dashboard::build(&[], &bets);
    let json = serde_json::to_value(&dash).unwrap();
    assert_eq!(json["stats"]["total_bets"], 1);
    assert_eq!(json["evolution"].as_array().unwrap().len(), 1);
    assert_eq!(json["sports"][0]["sport"], "Futebol");
    assert!(json["bankrolls"].as_array().unwrap().is_empty());
}
