// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::draft_from_input;
use crate::db::KeyValueStore;
use crate::state::Tracker;
use crate::utils::required;
use anyhow::{Context, Result};
use csv::ReaderBuilder;

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(tracker, sub),
        _ => Ok(()),
    }
}

/// Every row is validated before anything is stored, so a bad row leaves
/// the data untouched.
fn import_transactions<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut drafts = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let date = rec.get(0).context("date missing")?;
        let r#type = rec.get(1).context("type missing")?;
        let amount = rec.get(2).context("amount missing")?;
        let category = rec.get(3).context("category missing")?;
        let description = rec.get(4).context("description missing")?;
        let draft = draft_from_input(
            tracker.categories(),
            r#type,
            amount,
            category,
            description,
            Some(date),
        )
        .with_context(|| format!("Line {} of {}", line, path))?;
        drafts.push(draft);
    }

    let count = tracker.add_transactions(drafts)?;
    tracing::info!(count, path, "import finished");
    println!("Imported {} transaction(s) from {}", count, path);
    Ok(())
}
