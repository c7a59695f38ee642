// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stored documents. Field names follow the persisted JSON layout.

use crate::utils::timestamp_format;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bankroll {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "saldoInicial")]
    pub initial_balance: Decimal,
    #[serde(rename = "saldoAtual")]
    pub(crate) current_balance: Decimal,
    #[serde(rename = "criadaEm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "cor")]
    pub color: String,
}

impl Bankroll {
    /// Cached projection, maintained by the ledger's recalculation.
    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    pub fn profit_since_start(&self) -> Decimal {
        self.current_balance - self.initial_balance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "deposito")]
    Deposit,
    #[serde(rename = "saque")]
    Withdrawal,
}

impl TransactionKind {
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "bancaId")]
    pub bankroll_id: String,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "data", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "ganhou")]
    Won,
    #[serde(rename = "perdeu")]
    Lost,
    #[serde(rename = "cashout")]
    CashedOut,
    #[serde(rename = "reembolso")]
    Refunded,
}

impl Outcome {
    pub fn is_settled(self) -> bool {
        self != Outcome::Pending
    }

    /// Won and cashed-out bets both count as hits.
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Won | Outcome::CashedOut)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::CashedOut => "cashout",
            Outcome::Refunded => "refunded",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Ok(Outcome::Pending),
            "won" | "win" | "ganhou" => Ok(Outcome::Won),
            "lost" | "loss" | "perdeu" => Ok(Outcome::Lost),
            "cashout" | "cashed_out" | "cashed-out" => Ok(Outcome::CashedOut),
            "refunded" | "refund" | "void" | "reembolso" => Ok(Outcome::Refunded),
            other => Err(format!(
                "Unknown outcome '{}' (use pending|won|lost|cashout|refunded)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetKind {
    #[serde(rename = "simples")]
    Single,
    #[serde(rename = "combinada")]
    Combined,
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BetKind::Single => "single",
            BetKind::Combined => "combined",
        })
    }
}

impl FromStr for BetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "simples" => Ok(BetKind::Single),
            "combined" | "combinada" | "multiple" => Ok(BetKind::Combined),
            other => Err(format!("Unknown bet kind '{}' (use single|combined)", other)),
        }
    }
}

/// One selection of a combined bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    #[serde(rename = "esporte")]
    pub sport: String,
    #[serde(rename = "competicao")]
    pub competition: String,
    #[serde(rename = "evento")]
    pub event: String,
    #[serde(rename = "mercado")]
    pub market: String,
    #[serde(rename = "odd")]
    pub odds: Decimal,
    #[serde(rename = "resultado")]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: String,
    #[serde(rename = "bancaId")]
    pub bankroll_id: String,
    #[serde(rename = "tipo")]
    pub kind: BetKind,
    #[serde(rename = "esporte")]
    pub sport: String,
    #[serde(rename = "competicao")]
    pub competition: String,
    #[serde(rename = "evento")]
    pub event: String,
    #[serde(rename = "mercado")]
    pub market: String,
    #[serde(rename = "odd")]
    pub odds: Decimal,
    pub stake: Decimal,
    #[serde(rename = "resultado")]
    pub outcome: Outcome,
    #[serde(rename = "lucro")]
    pub profit: Decimal,
    #[serde(rename = "data", with = "timestamp_format")]
    pub placed_at: NaiveDateTime,
    #[serde(rename = "casaDeApostas", default, skip_serializing_if = "Option::is_none")]
    pub bookmaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipster: Option<String>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "aoVivo", default)]
    pub live: bool,
    #[serde(default)]
    pub freebet: bool,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "selecoes", default, skip_serializing_if = "Vec::is_empty")]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}
