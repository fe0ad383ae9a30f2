// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{below_savings_goal, budget_progress, in_month, remaining, spent_by_bucket};
use crate::db::KeyValueStore;
use crate::models::{AppState, Bucket, MAX_AMOUNT};
use crate::state::Tracker;
use crate::utils::{
    current_month, fmt_money, fmt_percent, maybe_print_json, parse_amount_lenient, parse_month,
    pretty_table, required,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(tracker, sub)?,
        Some(("set-income", sub)) => set_income(tracker, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BucketLine {
    pub bucket: Bucket,
    pub share: u8,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub progress: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub remaining: Decimal,
    pub below_goal: bool,
}

#[derive(Debug, Serialize)]
pub struct BudgetReport {
    pub month: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub income: Decimal,
    pub lines: Vec<BucketLine>,
}

fn share(bucket: Bucket) -> u8 {
    match bucket {
        Bucket::Needs => 50,
        Bucket::Wants => 30,
        Bucket::Savings => 20,
    }
}

/// Spend against each split for one calendar month.
pub fn budget_report(state: &AppState, year: i32, month: u32) -> BudgetReport {
    let txs = in_month(&state.transactions, year, month);
    let lines = Bucket::ALL
        .iter()
        .map(|&bucket| {
            let target = state.budget.splits.target(bucket);
            let spent = spent_by_bucket(&txs, &state.categories, bucket);
            BucketLine {
                bucket,
                share: share(bucket),
                target,
                spent,
                progress: budget_progress(spent, target),
                remaining: remaining(target, spent),
                below_goal: bucket == Bucket::Savings && below_savings_goal(spent, target),
            }
        })
        .collect();
    BudgetReport {
        month: format!("{:04}-{:02}", year, month),
        income: state.budget.income,
        lines,
    }
}

pub fn report_rows(report: &BudgetReport) -> Vec<Vec<String>> {
    report
        .lines
        .iter()
        .map(|l| {
            let status = if l.below_goal {
                "below goal".to_string()
            } else {
                format!("{} left", fmt_money(&l.remaining))
            };
            vec![
                format!("{} ({}%)", l.bucket, l.share),
                fmt_money(&l.target),
                fmt_money(&l.spent),
                fmt_percent(&l.progress),
                status,
            ]
        })
        .collect()
}

fn show<S: KeyValueStore>(tracker: &Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    let report = budget_report(tracker.state(), year, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!("Monthly income: {}  ({})", fmt_money(&report.income), report.month);
    println!(
        "{}",
        pretty_table(
            &["Split", "Target", "Spent", "Progress", "Status"],
            report_rows(&report)
        )
    );
    Ok(())
}

/// Invalid input leaves the budget untouched; it is reported, not an error.
fn set_income<S: KeyValueStore>(tracker: &mut Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let raw = required(sub, "income")?;
    let Some(income) = parse_amount_lenient(raw) else {
        tracing::warn!(input = %raw, "ignoring non-numeric income");
        println!("Income unchanged: '{}' is not a number", raw);
        return Ok(());
    };
    if !tracker.set_income(income)? {
        println!("Income unchanged: it must be between 0 and {}", fmt_money(&MAX_AMOUNT));
        return Ok(());
    }
    let s = tracker.budget().splits;
    println!(
        "Income set to {}: needs {}, wants {}, savings {}",
        fmt_money(&income),
        fmt_money(&s.needs),
        fmt_money(&s.wants),
        fmt_money(&s.savings)
    );
    Ok(())
}
