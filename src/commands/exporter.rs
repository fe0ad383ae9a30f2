// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::resolve_category;
use crate::db::KeyValueStore;
use crate::state::Tracker;
use crate::utils::{fmt_money, required};
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle<S: KeyValueStore>(tracker: &Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(tracker, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValueStore>(
    tracker: &Tracker<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?;

    let state = tracker.state();
    let rows = state.transactions.iter().map(|t| {
        let category = resolve_category(&state.categories, &t.category_id).map(|c| c.name.clone());
        (t, category)
    });

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "amount",
                "category",
                "description",
                "installments",
            ])?;
            for (t, category) in rows {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.r#type.to_string(),
                    fmt_money(&t.amount),
                    category.unwrap_or_default(),
                    t.description.clone(),
                    t.installments
                        .map(|i| format!("{}/{}", i.current, i.total))
                        .unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .map(|(t, category)| {
                    json!({
                        "id": t.id,
                        "date": t.date.to_string(),
                        "type": t.r#type.to_string(),
                        "amount": fmt_money(&t.amount),
                        "category": category,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
