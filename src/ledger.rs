// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bankrolls, their transactions and bets.
//!
//! `currentBalance` on a bankroll is a cache of
//! `initial + deposits - withdrawals + profit of settled bets`. Every mutation
//! goes through [`Books`]: load the three documents, change them in memory,
//! recalculate the affected bankroll and commit the touched documents in one
//! atomic `set_many`. Nothing else writes the balance.

use crate::error::{LedgerError, Result};
use crate::models::{Bankroll, Bet, BetKind, Leg, Outcome, Transaction, TransactionKind};
use crate::store::{BANKROLLS_KEY, BETS_KEY, KvStore, TRANSACTIONS_KEY, read};
use crate::utils::{new_id, require_name, validate_odds};
use chrono::{Local, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Colors handed out by position: the Nth bankroll created gets
/// `PALETTE[N % PALETTE.len()]`.
pub const PALETTE: [&str; 7] = [
    "#22c55e", "#3b82f6", "#f59e0b", "#ef4444", "#a855f7", "#06b6d4", "#ec4899",
];

/// How a bet ended. Cash-outs carry the amount actually paid back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Pending,
    Won,
    Lost,
    Refunded,
    CashedOut { returned: Decimal },
}

impl Settlement {
    pub fn from_outcome(outcome: Outcome, cashout_return: Option<Decimal>) -> Result<Self> {
        Ok(match outcome {
            Outcome::Pending => Settlement::Pending,
            Outcome::Won => Settlement::Won,
            Outcome::Lost => Settlement::Lost,
            Outcome::Refunded => Settlement::Refunded,
            Outcome::CashedOut => {
                let returned = cashout_return.ok_or_else(|| {
                    LedgerError::validation("a cash-out needs the returned amount")
                })?;
                if returned.is_sign_negative() && !returned.is_zero() {
                    return Err(LedgerError::validation(
                        "cash-out amount cannot be negative",
                    ));
                }
                Settlement::CashedOut { returned }
            }
        })
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Settlement::Pending => Outcome::Pending,
            Settlement::Won => Outcome::Won,
            Settlement::Lost => Outcome::Lost,
            Settlement::Refunded => Outcome::Refunded,
            Settlement::CashedOut { .. } => Outcome::CashedOut,
        }
    }

    /// Fails instead of overflowing on absurd stakes or odds.
    pub fn profit(&self, stake: Decimal, odds: Decimal) -> Result<Decimal> {
        let profit = match self {
            Settlement::Won => odds
                .checked_sub(Decimal::ONE)
                .and_then(|net| stake.checked_mul(net)),
            Settlement::Lost => Some(-stake),
            Settlement::Pending | Settlement::Refunded => Some(Decimal::ZERO),
            Settlement::CashedOut { returned } => returned.checked_sub(stake),
        };
        profit.ok_or_else(|| {
            LedgerError::validation(format!(
                "profit of stake {} at odds {} is out of range",
                stake, odds
            ))
        })
    }
}

/// Price of a combined bet: the product of its legs' odds.
pub fn combined_odds(legs: &[Leg]) -> Result<Decimal> {
    let odds = legs
        .iter()
        .try_fold(Decimal::ONE, |acc, leg| acc.checked_mul(leg.odds))
        .ok_or_else(|| LedgerError::validation("combined odds are out of range"))?;
    validate_odds(odds)?;
    Ok(odds)
}

/// Input for [`Ledger::record_bet`]. One selection makes a single bet,
/// several make a combined bet priced at the product of their odds.
#[derive(Debug, Clone)]
pub struct BetDraft {
    pub bankroll_id: String,
    pub selections: Vec<Leg>,
    pub stake: Decimal,
    pub settlement: Settlement,
    pub placed_at: NaiveDateTime,
    pub bookmaker: Option<String>,
    pub tipster: Option<String>,
    pub category: Option<String>,
    pub live: bool,
    pub freebet: bool,
    pub notes: Option<String>,
}

impl BetDraft {
    pub fn new(
        bankroll_id: impl Into<String>,
        selection: Leg,
        stake: Decimal,
        placed_at: NaiveDateTime,
    ) -> Self {
        Self {
            bankroll_id: bankroll_id.into(),
            selections: vec![selection],
            stake,
            settlement: Settlement::Pending,
            placed_at,
            bookmaker: None,
            tipster: None,
            category: None,
            live: false,
            freebet: false,
            notes: None,
        }
    }

    pub fn with_leg(mut self, leg: Leg) -> Self {
        self.selections.push(leg);
        self
    }

    pub fn settled(mut self, settlement: Settlement) -> Self {
        self.settlement = settlement;
        self
    }

    fn build(self) -> Result<Bet> {
        let Some(first) = self.selections.first() else {
            return Err(LedgerError::validation("a bet needs at least one selection"));
        };
        for leg in &self.selections {
            if leg.sport.trim().is_empty() {
                return Err(LedgerError::validation("every selection needs a sport"));
            }
            validate_odds(leg.odds)?;
        }
        if self.stake <= Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "stake must be positive, got {}",
                self.stake
            )));
        }

        let combined = self.selections.len() > 1;
        let odds = if combined {
            combined_odds(&self.selections)?
        } else {
            first.odds
        };
        let profit = self.settlement.profit(self.stake, odds)?;

        Ok(Bet {
            id: new_id(),
            bankroll_id: self.bankroll_id,
            kind: if combined { BetKind::Combined } else { BetKind::Single },
            sport: first.sport.trim().to_string(),
            competition: first.competition.clone(),
            event: first.event.clone(),
            market: first.market.clone(),
            odds,
            stake: self.stake,
            outcome: self.settlement.outcome(),
            profit,
            placed_at: self.placed_at,
            bookmaker: self.bookmaker,
            tipster: self.tipster,
            category: self.category,
            live: self.live,
            freebet: self.freebet,
            notes: self.notes,
            legs: if combined { self.selections } else { Vec::new() },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BankrollPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub initial_balance: Option<Decimal>,
}

/// Field-wise merge into a stored bet. An explicit `profit` is taken as
/// given; otherwise changing stake, odds or outcome re-derives it.
#[derive(Debug, Clone, Default)]
pub struct BetPatch {
    pub sport: Option<String>,
    pub competition: Option<String>,
    pub event: Option<String>,
    pub market: Option<String>,
    pub odds: Option<Decimal>,
    pub stake: Option<Decimal>,
    pub outcome: Option<Outcome>,
    pub profit: Option<Decimal>,
    pub placed_at: Option<NaiveDateTime>,
    pub bookmaker: Option<String>,
    pub tipster: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub live: Option<bool>,
    pub freebet: Option<bool>,
}

impl BetPatch {
    fn validate(&self) -> Result<()> {
        if let Some(odds) = self.odds {
            validate_odds(odds)?;
        }
        if let Some(stake) = self.stake {
            if stake <= Decimal::ZERO {
                return Err(LedgerError::validation(format!(
                    "stake must be positive, got {}",
                    stake
                )));
            }
        }
        Ok(())
    }

    fn apply(self, bet: &mut Bet) -> Result<()> {
        if self.odds.is_some() && bet.kind == BetKind::Combined {
            return Err(LedgerError::validation(
                "the odds of a combined bet follow its selections",
            ));
        }
        let reprice = self.profit.is_none()
            && (self.stake.is_some() || self.odds.is_some() || self.outcome.is_some());
        let previous = (bet.outcome, bet.stake, bet.profit);
        if let Some(v) = self.sport {
            bet.sport = v;
        }
        if let Some(v) = self.competition {
            bet.competition = v;
        }
        if let Some(v) = self.event {
            bet.event = v;
        }
        if let Some(v) = self.market {
            bet.market = v;
        }
        if let Some(v) = self.odds {
            bet.odds = v;
        }
        if let Some(v) = self.stake {
            bet.stake = v;
        }
        if let Some(v) = self.outcome {
            bet.outcome = v;
        }
        if let Some(v) = self.profit {
            bet.profit = v;
        }
        if let Some(v) = self.placed_at {
            bet.placed_at = v;
        }
        if self.bookmaker.is_some() {
            bet.bookmaker = self.bookmaker;
        }
        if self.tipster.is_some() {
            bet.tipster = self.tipster;
        }
        if self.category.is_some() {
            bet.category = self.category;
        }
        if self.notes.is_some() {
            bet.notes = self.notes;
        }
        if let Some(v) = self.live {
            bet.live = v;
        }
        if let Some(v) = self.freebet {
            bet.freebet = v;
        }
        if reprice {
            bet.profit = derived_profit(bet, previous)?;
        }
        Ok(())
    }
}

/// Profit implied by the bet's current outcome. A cash-out keeps the amount
/// it returned when it was already cashed out, and needs an explicit profit
/// otherwise.
fn derived_profit(bet: &Bet, (outcome, stake, profit): (Outcome, Decimal, Decimal)) -> Result<Decimal> {
    let settlement = match bet.outcome {
        Outcome::CashedOut if outcome == Outcome::CashedOut => {
            let returned = profit
                .checked_add(stake)
                .ok_or_else(|| LedgerError::validation("cash-out amount is out of range"))?;
            Settlement::CashedOut { returned }
        }
        Outcome::CashedOut => {
            return Err(LedgerError::validation(
                "a cash-out needs the returned amount, settle it instead",
            ));
        }
        other => Settlement::from_outcome(other, None)?,
    };
    settlement.profit(bet.stake, bet.odds)
}

/// `initial + Σ(±transactions) + Σ(profit of settled bets)` for one bankroll.
pub fn compute_balance(
    bankroll: &Bankroll,
    transactions: &[Transaction],
    bets: &[Bet],
) -> Result<Decimal> {
    let moves = transactions
        .iter()
        .filter(|t| t.bankroll_id == bankroll.id)
        .map(|t| t.kind.signed(t.amount));
    let results = bets
        .iter()
        .filter(|b| b.bankroll_id == bankroll.id && b.outcome.is_settled())
        .map(|b| b.profit);
    moves
        .chain(results)
        .try_fold(bankroll.initial_balance, |acc, d| acc.checked_add(d))
        .ok_or_else(|| {
            LedgerError::validation(format!("balance of bankroll {} is out of range", bankroll.id))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Doc {
    Bankrolls,
    Transactions,
    Bets,
}

impl Doc {
    fn key(self) -> &'static str {
        match self {
            Doc::Bankrolls => BANKROLLS_KEY,
            Doc::Transactions => TRANSACTIONS_KEY,
            Doc::Bets => BETS_KEY,
        }
    }
}

/// The three ledger documents, loaded together for one mutation.
struct Books {
    bankrolls: Vec<Bankroll>,
    transactions: Vec<Transaction>,
    bets: Vec<Bet>,
}

impl Books {
    fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        Self {
            bankrolls: read(store, BANKROLLS_KEY, Vec::new()),
            transactions: read(store, TRANSACTIONS_KEY, Vec::new()),
            bets: read(store, BETS_KEY, Vec::new()),
        }
    }

    fn has_bankroll(&self, id: &str) -> bool {
        self.bankrolls.iter().any(|b| b.id == id)
    }

    fn recalculate(&mut self, bankroll_id: &str) -> Result<Option<Decimal>> {
        let Some(idx) = self.bankrolls.iter().position(|b| b.id == bankroll_id) else {
            return Ok(None);
        };
        let balance = compute_balance(&self.bankrolls[idx], &self.transactions, &self.bets)?;
        self.bankrolls[idx].current_balance = balance;
        debug!(bankroll = bankroll_id, %balance, "recalculated balance");
        Ok(Some(balance))
    }

    fn save<S: KvStore + ?Sized>(&self, store: &mut S, docs: &[Doc]) -> Result<()> {
        let mut entries = Vec::with_capacity(docs.len());
        for doc in docs {
            let json = match doc {
                Doc::Bankrolls => serde_json::to_string(&self.bankrolls)?,
                Doc::Transactions => serde_json::to_string(&self.transactions)?,
                Doc::Bets => serde_json::to_string(&self.bets)?,
            };
            entries.push((doc.key(), json));
        }
        store.set_many(&entries)
    }
}

pub struct Ledger<S: KvStore> {
    store: S,
}

impl<S: KvStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn list_bankrolls(&self) -> Vec<Bankroll> {
        read(&self.store, BANKROLLS_KEY, Vec::new())
    }

    pub fn bankroll(&self, id: &str) -> Option<Bankroll> {
        self.list_bankrolls().into_iter().find(|b| b.id == id)
    }

    /// All transactions, or those of one bankroll.
    pub fn transactions(&self, bankroll_id: Option<&str>) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = read(&self.store, TRANSACTIONS_KEY, Vec::new());
        if let Some(id) = bankroll_id {
            all.retain(|t| t.bankroll_id == id);
        }
        all
    }

    pub fn bets(&self, bankroll_id: Option<&str>) -> Vec<Bet> {
        let mut all: Vec<Bet> = read(&self.store, BETS_KEY, Vec::new());
        if let Some(id) = bankroll_id {
            all.retain(|b| b.bankroll_id == id);
        }
        all
    }

    pub fn bet(&self, id: &str) -> Option<Bet> {
        self.bets(None).into_iter().find(|b| b.id == id)
    }

    pub fn create_bankroll(&mut self, name: &str, initial_balance: Decimal) -> Result<Bankroll> {
        let name = require_name("Bankroll", name)?;
        if initial_balance.is_sign_negative() && !initial_balance.is_zero() {
            return Err(LedgerError::validation("initial balance cannot be negative"));
        }
        let mut books = Books::load(&self.store);
        let bankroll = Bankroll {
            id: new_id(),
            name,
            initial_balance,
            current_balance: initial_balance,
            created_at: Utc::now(),
            color: PALETTE[books.bankrolls.len() % PALETTE.len()].to_string(),
        };
        books.bankrolls.push(bankroll.clone());
        books.save(&mut self.store, &[Doc::Bankrolls])?;
        info!(id = %bankroll.id, name = %bankroll.name, "created bankroll");
        Ok(bankroll)
    }

    pub fn update_bankroll(&mut self, id: &str, patch: BankrollPatch) -> Result<Option<Bankroll>> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_name("Bankroll", n))
            .transpose()?;
        if let Some(initial) = patch.initial_balance {
            if initial.is_sign_negative() && !initial.is_zero() {
                return Err(LedgerError::validation("initial balance cannot be negative"));
            }
        }
        let mut books = Books::load(&self.store);
        let Some(bankroll) = books.bankrolls.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            bankroll.name = name;
        }
        if let Some(color) = patch.color {
            bankroll.color = color;
        }
        if let Some(initial) = patch.initial_balance {
            bankroll.initial_balance = initial;
        }
        books.recalculate(id)?;
        books.save(&mut self.store, &[Doc::Bankrolls])?;
        Ok(books.bankrolls.into_iter().find(|b| b.id == id))
    }

    /// Removes the bankroll together with its transactions and bets.
    pub fn delete_bankroll(&mut self, id: &str) -> Result<bool> {
        let mut books = Books::load(&self.store);
        if !books.has_bankroll(id) {
            return Ok(false);
        }
        books.bankrolls.retain(|b| b.id != id);
        let tx_before = books.transactions.len();
        let bets_before = books.bets.len();
        books.transactions.retain(|t| t.bankroll_id != id);
        books.bets.retain(|b| b.bankroll_id != id);
        books.save(
            &mut self.store,
            &[Doc::Bankrolls, Doc::Bets, Doc::Transactions],
        )?;
        info!(
            id,
            transactions = tx_before - books.transactions.len(),
            bets = bets_before - books.bets.len(),
            "deleted bankroll"
        );
        Ok(true)
    }

    pub fn record_transaction(
        &mut self,
        bankroll_id: &str,
        kind: TransactionKind,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Transaction> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(LedgerError::validation(
                "transaction amount cannot be negative",
            ));
        }
        let mut books = Books::load(&self.store);
        if !books.has_bankroll(bankroll_id) {
            return Err(LedgerError::UnknownBankroll(bankroll_id.to_string()));
        }
        let tx = Transaction {
            id: new_id(),
            bankroll_id: bankroll_id.to_string(),
            kind,
            amount,
            timestamp: Local::now().naive_local(),
            description,
        };
        books.transactions.push(tx.clone());
        books.recalculate(bankroll_id)?;
        books.save(&mut self.store, &[Doc::Transactions, Doc::Bankrolls])?;
        info!(bankroll = bankroll_id, kind = ?kind, %amount, "recorded transaction");
        Ok(tx)
    }

    pub fn record_bet(&mut self, draft: BetDraft) -> Result<Bet> {
        let mut books = Books::load(&self.store);
        if !books.has_bankroll(&draft.bankroll_id) {
            return Err(LedgerError::UnknownBankroll(draft.bankroll_id));
        }
        let bet = draft.build()?;
        books.bets.push(bet.clone());
        books.recalculate(&bet.bankroll_id)?;
        books.save(&mut self.store, &[Doc::Bets, Doc::Bankrolls])?;
        info!(id = %bet.id, bankroll = %bet.bankroll_id, outcome = %bet.outcome, "recorded bet");
        Ok(bet)
    }

    /// Merges `patch` into the bet and recalculates its bankroll, whatever
    /// the patch touched. Unknown ids are a no-op.
    pub fn update_bet(&mut self, id: &str, patch: BetPatch) -> Result<Option<Bet>> {
        patch.validate()?;
        self.mutate_bet(id, |bet| patch.apply(bet))
    }

    /// Sets the outcome and the profit it implies for the stored stake and odds.
    pub fn settle_bet(&mut self, id: &str, settlement: Settlement) -> Result<Option<Bet>> {
        self.mutate_bet(id, |bet| {
            bet.profit = settlement.profit(bet.stake, bet.odds)?;
            bet.outcome = settlement.outcome();
            Ok(())
        })
    }

    fn mutate_bet(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Bet) -> Result<()>,
    ) -> Result<Option<Bet>> {
        let mut books = Books::load(&self.store);
        let Some(bet) = books.bets.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        f(bet)?;
        let updated = bet.clone();
        books.recalculate(&updated.bankroll_id)?;
        books.save(&mut self.store, &[Doc::Bets, Doc::Bankrolls])?;
        Ok(Some(updated))
    }

    pub fn delete_bet(&mut self, id: &str) -> Result<bool> {
        let mut books = Books::load(&self.store);
        let Some(pos) = books.bets.iter().position(|b| b.id == id) else {
            return Ok(false);
        };
        let bet = books.bets.remove(pos);
        books.recalculate(&bet.bankroll_id)?;
        books.save(&mut self.store, &[Doc::Bets, Doc::Bankrolls])?;
        info!(id, bankroll = %bet.bankroll_id, "deleted bet");
        Ok(true)
    }

    /// Rebuilds `currentBalance` from scratch. `None` for an unknown bankroll.
    pub fn recalculate_balance(&mut self, bankroll_id: &str) -> Result<Option<Decimal>> {
        let mut books = Books::load(&self.store);
        let Some(balance) = books.recalculate(bankroll_id)? else {
            return Ok(None);
        };
        books.save(&mut self.store, &[Doc::Bankrolls])?;
        Ok(Some(balance))
    }
}
