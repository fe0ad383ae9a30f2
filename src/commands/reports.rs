// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{current_balance, in_month, net_for_period, total_by_type};
use crate::commands::budgets::{BudgetReport, budget_report, report_rows};
use crate::commands::transactions::TransactionRow;
use crate::db::KeyValueStore;
use crate::models::{AppState, TransactionType};
use crate::state::Tracker;
use crate::utils::{current_month, fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

const RECENT: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub month_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub month_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub month_net: Decimal,
    pub budget: BudgetReport,
    pub recent: Vec<TransactionRow>,
}

pub fn dashboard(state: &AppState, year: i32, month: u32) -> Dashboard {
    let txs = &state.transactions;
    let monthly = in_month(txs, year, month);
    Dashboard {
        name: state.settings.name.clone(),
        balance: current_balance(state.settings.initial_balance, txs),
        total_income: total_by_type(txs, TransactionType::Income),
        total_expense: total_by_type(txs, TransactionType::Expense),
        month_income: total_by_type(&monthly, TransactionType::Income),
        month_expense: total_by_type(&monthly, TransactionType::Expense),
        month_net: net_for_period(&monthly),
        budget: budget_report(state, year, month),
        recent: txs
            .iter()
            .take(RECENT)
            .map(|t| TransactionRow::from_transaction(t, &state.categories))
            .collect(),
    }
}

pub fn handle<S: KeyValueStore>(tracker: &Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };
    let d = dashboard(tracker.state(), year, month);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &d)? {
        return Ok(());
    }

    println!("Hello, {}", d.name);
    let summary = vec![
        vec!["Current balance".to_string(), fmt_money(&d.balance)],
        vec!["Total income".to_string(), fmt_money(&d.total_income)],
        vec!["Total expense".to_string(), fmt_money(&d.total_expense)],
        vec![format!("Income {}", d.budget.month), fmt_money(&d.month_income)],
        vec![format!("Expense {}", d.budget.month), fmt_money(&d.month_expense)],
        vec![format!("Net {}", d.budget.month), fmt_money(&d.month_net)],
    ];
    println!("{}", pretty_table(&["Summary", "Amount"], summary));
    println!(
        "{}",
        pretty_table(
            &["Split", "Target", "Spent", "Progress", "Status"],
            report_rows(&d.budget)
        )
    );

    if d.recent.is_empty() {
        println!("No transactions yet");
    } else {
        let rows = d
            .recent
            .into_iter()
            .map(|r| vec![r.date, r.description, r.category, r.amount])
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}
