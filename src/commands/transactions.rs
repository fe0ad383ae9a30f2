// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{filter_transactions, net_for_period, resolve_category, total_by_type};
use crate::db::KeyValueStore;
use crate::models::{
    AppState, Category, NewTransaction, Transaction, TransactionType, UNCATEGORIZED_LABEL,
};
use crate::state::Tracker;
use crate::utils::{
    find_category, fmt_money, maybe_print_json, parse_amount_lenient, parse_date, parse_installment,
    pretty_table, required,
};
use anyhow::{Result, anyhow, bail};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(tracker, sub)?,
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("rm", sub)) => rm(tracker, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds a draft from user input, refusing it when the category is unknown
/// or of the other type.
pub fn draft_from_input(
    categories: &[Category],
    r#type: &str,
    amount: &str,
    category: &str,
    description: &str,
    date: Option<&str>,
) -> Result<NewTransaction> {
    let r#type: TransactionType = r#type.parse().map_err(|e: String| anyhow!(e))?;
    let amount = parse_amount_lenient(amount)
        .ok_or_else(|| anyhow!("Invalid amount '{}'", amount.trim()))?;
    let cat = find_category(categories, category)?;
    if cat.r#type != r#type {
        bail!(
            "Category '{}' is an {} category, not {}",
            cat.name,
            cat.r#type,
            r#type
        );
    }
    let date = match date {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(NewTransaction::new(
        r#type,
        amount,
        date,
        cat.id.clone(),
        description,
    )?)
}

fn add<S: KeyValueStore>(tracker: &mut Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let mut draft = draft_from_input(
        tracker.categories(),
        required(sub, "type")?,
        required(sub, "amount")?,
        required(sub, "category")?,
        required(sub, "description")?,
        sub.get_one::<String>("date").map(|s| s.as_str()),
    )?;
    if let Some(inst) = sub.get_one::<String>("installment") {
        let (cur, total) = parse_installment(inst)?;
        draft = draft.with_installments(cur, total)?;
    }
    let t = tracker.add_transaction(draft)?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        t.r#type,
        fmt_money(&t.amount),
        t.date,
        t.description,
        t.id
    );
    Ok(())
}

fn rm<S: KeyValueStore>(tracker: &mut Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim();
    if tracker.delete_transaction(id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub installments: String,
}

impl TransactionRow {
    pub fn from_transaction(t: &Transaction, categories: &[Category]) -> Self {
        let category = resolve_category(categories, &t.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
        let sign = match t.r#type {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            description: t.description.clone(),
            category,
            amount: format!("{}{}", sign, fmt_money(&t.amount)),
            installments: t
                .installments
                .map(|i| format!("{}/{}", i.current, i.total))
                .unwrap_or_default(),
        }
    }
}

/// History rows, newest first, optionally filtered and truncated.
pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let query = sub
        .get_one::<String>("search")
        .map(|s| s.trim())
        .unwrap_or("");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    filter_transactions(&state.transactions, &state.categories, query)
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow::from_transaction(t, &state.categories))
        .collect()
}

fn list<S: KeyValueStore>(tracker: &Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(tracker.state(), sub);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let all = tracker.transactions();
    let stats = vec![
        vec![
            "Income".to_string(),
            fmt_money(&total_by_type(all, TransactionType::Income)),
        ],
        vec![
            "Expense".to_string(),
            fmt_money(&total_by_type(all, TransactionType::Expense)),
        ],
        vec!["Net".to_string(), fmt_money(&net_for_period(all))],
    ];
    println!("{}", pretty_table(&["Totals", "Amount"], stats));

    if data.is_empty() {
        println!("No transactions found");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .into_iter()
        .map(|r| {
            vec![
                r.date,
                r.description,
                r.category,
                r.amount,
                r.installments,
                r.id,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Description", "Category", "Amount", "Inst.", "Id"],
            rows
        )
    );
    Ok(())
}
