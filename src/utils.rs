// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use anyhow::Result as AnyResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub fn parse_decimal(field: &'static str, s: &str) -> Result<Decimal> {
    s.trim()
        .replace(',', ".")
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidNumber {
            field,
            input: s.to_string(),
        })
}

pub fn parse_amount(field: &'static str, s: &str) -> Result<Decimal> {
    let d = parse_decimal(field, s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(LedgerError::validation(format!("{} cannot be negative", field)));
    }
    Ok(d)
}

/// Highest price accepted for a selection or a whole combined bet.
pub const MAX_ODDS: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Decimal odds; anything below 1.00 cannot pay back the stake.
pub fn parse_odds(s: &str) -> Result<Decimal> {
    let d = parse_decimal("odds", s)?;
    validate_odds(d)?;
    Ok(d)
}

pub fn validate_odds(odds: Decimal) -> Result<()> {
    if odds < Decimal::ONE {
        return Err(LedgerError::validation(format!(
            "odds must be at least 1.00, got {}",
            odds
        )));
    }
    if odds > MAX_ODDS {
        return Err(LedgerError::validation(format!(
            "odds must be at most {}, got {}",
            MAX_ODDS, odds
        )));
    }
    Ok(())
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Accepts full RFC 3339 stamps as well as the shorter `YYYY-MM-DDTHH:MM`
/// and bare dates found in older documents.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}

pub fn require_name(what: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{} name cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Trims, and treats a blank string as absent.
pub fn non_blank(s: Option<&String>) -> Option<String> {
    s.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{} {:.2}", symbol, d.round_dp(2))
}

pub fn fmt_signed_money(d: &Decimal, symbol: &str) -> String {
    let sign = if d.is_sign_negative() && !d.is_zero() { "-" } else { "+" };
    format!("{}{} {:.2}", sign, symbol, d.abs().round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> AnyResult<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
