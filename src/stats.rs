// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard metrics derived from a bet collection. Nothing here is stored.

use crate::models::{Bankroll, Bet, Outcome};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_bets: usize,
    pub won_bets: usize,
    pub lost_bets: usize,
    pub pending_bets: usize,
    pub settled_bets: usize,
    pub total_profit: Decimal,
    pub total_stake: Decimal,
    pub roi: Decimal,
    pub hit_rate: Decimal,
    pub average_odds: Decimal,
    pub average_stake: Decimal,
    /// Positive for a run of wins (or any non-loss outcome), negative for losses.
    pub current_streak: i64,
    pub longest_win_streak: usize,
}

impl DashboardStats {
    pub fn compute(bets: &[Bet]) -> Self {
        let hundred = Decimal::ONE_HUNDRED;
        let settled: Vec<&Bet> = bets.iter().filter(|b| b.outcome.is_settled()).collect();
        let wins = settled.iter().filter(|b| b.outcome.is_win()).count();
        let losses = settled
            .iter()
            .filter(|b| b.outcome == Outcome::Lost)
            .count();

        let total_profit = saturating_sum(settled.iter().map(|b| b.profit));
        let total_stake = saturating_sum(settled.iter().map(|b| b.stake));
        let n = Decimal::from(settled.len());

        let roi = if total_stake > Decimal::ZERO {
            total_profit / total_stake * hundred
        } else {
            Decimal::ZERO
        };
        let (hit_rate, average_odds, average_stake) = if settled.is_empty() {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        } else {
            let odds_sum = saturating_sum(settled.iter().map(|b| b.odds));
            (
                Decimal::from(wins) / n * hundred,
                odds_sum / n,
                total_stake / n,
            )
        };

        let (current_streak, longest_win_streak) = streaks(&settled);

        DashboardStats {
            total_bets: bets.len(),
            won_bets: wins,
            lost_bets: losses,
            pending_bets: bets.len() - settled.len(),
            settled_bets: settled.len(),
            total_profit,
            total_stake,
            roi,
            hit_rate,
            average_odds,
            average_stake,
            current_streak,
            longest_win_streak,
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, d| acc.saturating_add(d))
}

/// Streaks over settled bets, newest first.
///
/// The longest streak groups won and cashed-out bets together. The current
/// streak compares literal outcomes against the newest bet, so a cash-out
/// interrupts a run of wins there.
fn streaks(settled: &[&Bet]) -> (i64, usize) {
    let mut newest_first = settled.to_vec();
    newest_first.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

    let mut run = 0usize;
    let mut longest = 0usize;
    for bet in &newest_first {
        if bet.outcome.is_win() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let current = match newest_first.first() {
        None => 0,
        Some(latest) => {
            let len = newest_first
                .iter()
                .take_while(|b| b.outcome == latest.outcome)
                .count() as i64;
            if latest.outcome == Outcome::Lost { -len } else { len }
        }
    };
    (current, longest)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    /// `dd/mm/yyyy`
    pub label: String,
    pub cumulative_profit: Decimal,
}

/// Running profit over settled bets in chronological order. Clone it to
/// walk the series again.
#[derive(Debug, Clone)]
pub struct ProfitEvolution<'a> {
    bets: Vec<&'a Bet>,
    pos: usize,
    running: Decimal,
}

pub fn profit_evolution(bets: &[Bet]) -> ProfitEvolution<'_> {
    let mut settled: Vec<&Bet> = bets.iter().filter(|b| b.outcome.is_settled()).collect();
    settled.sort_by(|a, b| a.placed_at.cmp(&b.placed_at));
    ProfitEvolution {
        bets: settled,
        pos: 0,
        running: Decimal::ZERO,
    }
}

impl Iterator for ProfitEvolution<'_> {
    type Item = EvolutionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let bet = self.bets.get(self.pos)?;
        self.pos += 1;
        self.running += bet.profit;
        let date = bet.placed_at.date();
        Some(EvolutionPoint {
            date,
            label: date.format("%d/%m/%Y").to_string(),
            cumulative_profit: self.running,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bets.len() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ProfitEvolution<'_> {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportShare {
    pub sport: String,
    pub bets: usize,
}

/// Bets per sport, pending included, in order of first appearance.
pub fn sport_distribution(bets: &[Bet]) -> Vec<SportShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<SportShare> = Vec::new();
    for bet in bets {
        match index.get(bet.sport.as_str()) {
            Some(&i) => out[i].bets += 1,
            None => {
                index.insert(&bet.sport, out.len());
                out.push(SportShare {
                    sport: bet.sport.clone(),
                    bets: 1,
                });
            }
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankrollSummary {
    pub id: String,
    pub name: String,
    pub color: String,
    pub current_balance: Decimal,
    pub profit_since_start: Decimal,
}

pub fn bankroll_summaries(bankrolls: &[Bankroll]) -> Vec<BankrollSummary> {
    bankrolls
        .iter()
        .map(|b| BankrollSummary {
            id: b.id.clone(),
            name: b.name.clone(),
            color: b.color.clone(),
            current_balance: b.current_balance(),
            profit_since_start: b.profit_since_start(),
        })
        .collect()
}

/// Everything the dashboard shows, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub evolution: Vec<EvolutionPoint>,
    pub sports: Vec<SportShare>,
    pub bankrolls: Vec<BankrollSummary>,
}

impl Dashboard {
    pub fn build(bankrolls: &[Bankroll], bets: &[Bet]) -> Self {
        Dashboard {
            stats: DashboardStats::compute(bets),
            evolution: profit_evolution(bets).collect(),
            sports: sport_distribution(bets),
            bankrolls: bankroll_summaries(bankrolls),
        }
    }
}
