// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use betclip::history::{BetFilter, BetSort, distinct_sports, filter_bets};
use betclip::models::{Bet, BetKind, Outcome};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bet(id: &str, sport: &str, event: &str, bookmaker: Option<&str>, day: u32, profit: Decimal, odds: Decimal) -> Bet {
    Bet {
        id: id.into(),
        bankroll_id: if day % 2 == 0 { "even".into() } else { "odd".into() },
        kind: BetKind::Single,
        sport: sport.into(),
        competition: "Liga".into(),
        event: event.into(),
        market: "1X2".into(),
        odds,
        stake: dec!(10),
        outcome: if profit > Decimal::ZERO { Outcome::Won } else { Outcome::Lost },
        profit,
        placed_at: NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap(),
        bookmaker: bookmaker.map(String::from),
        tipster: None,
        category: None,
        live: false,
        freebet: false,
        notes: None,
        legs: Vec::new(),
    }
}

fn sample() -> Vec<Bet> {
    vec![
        bet("a", "Futebol", "Grêmio x Inter", Some("Bet365"), 1, dec!(12), dec!(2.2)),
        bet("b", "Basquete", "Lakers x Celtics", Some("Betano"), 2, dec!(-10), dec!(1.9)),
        bet("c", "Futebol", "Santos x Vasco", None, 3, dec!(5), dec!(1.5)),
        bet("d", "Tênis", "Alcaraz x Sinner", Some("bet365"), 4, dec!(-10), dec!(3.1)),
    ]
}

fn ids(bets: &[Bet]) -> Vec<&str> {
    bets.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn default_sort_is_newest_first() {
    let out = filter_bets(&sample(), &BetFilter::default(), BetSort::default());
    assert_eq!(ids(&out), ["d", "c", "b", "a"]);
}

#[test]
fn search_is_case_insensitive_and_covers_bookmaker() {
    let filter = BetFilter {
        search: Some("BET365".into()),
        ..BetFilter::default()
    };
    let out = filter_bets(&sample(), &filter, BetSort::DateAsc);
    assert_eq!(ids(&out), ["a", "d"]);

    let filter = BetFilter {
        search: Some("lakers".into()),
        ..BetFilter::default()
    };
    assert_eq!(ids(&filter_bets(&sample(), &filter, BetSort::DateAsc)), ["b"]);
}

#[test]
fn period_bounds_are_inclusive_by_day() {
    let filter = BetFilter {
        from: NaiveDate::from_ymd_opt(2025, 3, 2),
        to: NaiveDate::from_ymd_opt(2025, 3, 3),
        ..BetFilter::default()
    };
    let out = filter_bets(&sample(), &filter, BetSort::DateAsc);
    assert_eq!(ids(&out), ["b", "c"]);
}

#[test]
fn field_filters_combine() {
    let filter = BetFilter {
        sport: Some("Futebol".into()),
        outcome: Some(Outcome::Won),
        bankroll_id: Some("odd".into()),
        ..BetFilter::default()
    };
    let out = filter_bets(&sample(), &filter, BetSort::ProfitDesc);
    assert_eq!(ids(&out), ["a", "c"]);

    let filter = BetFilter {
        kind: Some(BetKind::Combined),
        ..BetFilter::default()
    };
    assert!(filter_bets(&sample(), &filter, BetSort::DateDesc).is_empty());
}

#[test]
fn sorts_by_profit_and_odds() {
    let out = filter_bets(&sample(), &BetFilter::default(), BetSort::ProfitAsc);
    assert_eq!(out[0].profit, dec!(-10));
    assert_eq!(out[3].id, "a");

    let out = filter_bets(&sample(), &BetFilter::default(), BetSort::OddsDesc);
    assert_eq!(ids(&out), ["d", "a", "b", "c"]);
}

#[test]
fn sort_names_parse() {
    assert_eq!("odds-desc".parse::<BetSort>().unwrap(), BetSort::OddsDesc);
    assert_eq!(" Date-Asc ".parse::<BetSort>().unwrap(), BetSort::DateAsc);
    assert!("newest".parse::<BetSort>().is_err());
}

#[test]
fn distinct_sports_keep_first_seen_order() {
    assert_eq!(distinct_sports(&sample()), ["Futebol", "Basquete", "Tênis"]);
}
