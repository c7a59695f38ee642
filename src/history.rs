// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bet, BetKind, Outcome};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct BetFilter {
    /// Case-insensitive match on event, competition, market and bookmaker.
    pub search: Option<String>,
    pub sport: Option<String>,
    pub outcome: Option<Outcome>,
    pub kind: Option<BetKind>,
    pub bookmaker: Option<String>,
    pub tipster: Option<String>,
    pub bankroll_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl BetFilter {
    pub fn matches(&self, bet: &Bet) -> bool {
        if let Some(q) = self.search.as_deref().map(str::to_lowercase) {
            let hit = [
                bet.event.as_str(),
                bet.competition.as_str(),
                bet.market.as_str(),
                bet.bookmaker.as_deref().unwrap_or(""),
            ]
            .iter()
            .any(|f| f.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        if self.sport.as_ref().is_some_and(|s| *s != bet.sport) {
            return false;
        }
        if self.outcome.is_some_and(|o| o != bet.outcome) {
            return false;
        }
        if self.kind.is_some_and(|k| k != bet.kind) {
            return false;
        }
        if self.bookmaker.is_some() && self.bookmaker != bet.bookmaker {
            return false;
        }
        if self.tipster.is_some() && self.tipster != bet.tipster {
            return false;
        }
        if self
            .bankroll_id
            .as_ref()
            .is_some_and(|id| *id != bet.bankroll_id)
        {
            return false;
        }
        let day = bet.placed_at.date();
        if self.from.is_some_and(|from| day < from) || self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BetSort {
    #[default]
    DateDesc,
    DateAsc,
    ProfitDesc,
    ProfitAsc,
    OddsDesc,
}

impl FromStr for BetSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" => Ok(BetSort::DateDesc),
            "date-asc" => Ok(BetSort::DateAsc),
            "profit-desc" => Ok(BetSort::ProfitDesc),
            "profit-asc" => Ok(BetSort::ProfitAsc),
            "odds-desc" => Ok(BetSort::OddsDesc),
            other => Err(format!(
                "Unknown sort '{}' (use date-desc|date-asc|profit-desc|profit-asc|odds-desc)",
                other
            )),
        }
    }
}

pub fn filter_bets(bets: &[Bet], filter: &BetFilter, sort: BetSort) -> Vec<Bet> {
    let mut out: Vec<Bet> = bets.iter().filter(|b| filter.matches(b)).cloned().collect();
    match sort {
        BetSort::DateDesc => out.sort_by(|a, b| b.placed_at.cmp(&a.placed_at)),
        BetSort::DateAsc => out.sort_by(|a, b| a.placed_at.cmp(&b.placed_at)),
        BetSort::ProfitDesc => out.sort_by(|a, b| b.profit.cmp(&a.profit)),
        BetSort::ProfitAsc => out.sort_by(|a, b| a.profit.cmp(&b.profit)),
        BetSort::OddsDesc => out.sort_by(|a, b| b.odds.cmp(&a.odds)),
    }
    out
}

pub fn distinct_sports(bets: &[Bet]) -> Vec<String> {
    let mut seen = HashSet::new();
    bets.iter()
        .filter(|b| seen.insert(b.sport.as_str()))
        .map(|b| b.sport.clone())
        .collect()
}
