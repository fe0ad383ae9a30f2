// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::Category;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses `YYYY-MM` into `(year, month)`.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

pub fn current_month() -> (i32, u32) {
    let today = chrono::Local::now().date_naive();
    (today.year(), today.month())
}

/// Lenient money input: accepts `,` as the decimal separator. `None` when the
/// text is not a number.
pub fn parse_amount_lenient(s: &str) -> Option<Decimal> {
    s.trim().replace(',', ".").parse::<Decimal>().ok()
}

/// Parses `CUR/TOTAL`, e.g. `2/10`.
pub fn parse_installment(s: &str) -> Result<(u32, u32)> {
    let (cur, total) = s
        .split_once('/')
        .ok_or_else(|| anyhow!("Invalid installment '{}', expected CUR/TOTAL", s))?;
    let cur = cur
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid installment '{}'", s))?;
    let total = total
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid installment '{}'", s))?;
    Ok((cur, total))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
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

/// Finds a category by exact id, then by case-insensitive name.
pub fn find_category<'a>(categories: &'a [Category], key: &str) -> Result<&'a Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.to_lowercase() == key.to_lowercase())
        })
        .with_context(|| format!("Category '{}' not found", key))
}

/// Value of a required argument. clap enforces presence; this turns a
/// mismatch between the command tree and a handler into an error.
pub fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    m.get_one::<String>(name)
        .with_context(|| format!("Missing required argument '{}'", name))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
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
