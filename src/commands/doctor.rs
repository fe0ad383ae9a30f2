// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::aggregate::{derive_splits, resolve_category};
use crate::db::KeyValueStore;
use crate::models::AppState;
use crate::state::Tracker;
use crate::utils::pretty_table;
use anyhow::Result;

/// `(issue, detail)` pairs; empty when the data is consistent.
pub fn diagnose(state: &AppState) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at deleted categories, or at one of the other type
    for t in &state.transactions {
        match resolve_category(&state.categories, &t.category_id) {
            None => rows.push((
                "dangling_category".into(),
                format!("{} '{}' -> {}", t.id, t.description, t.category_id),
            )),
            Some(c) if c.r#type != t.r#type => rows.push((
                "type_mismatch".into(),
                format!("{} is {} but '{}' is {}", t.id, t.r#type, c.name, c.r#type),
            )),
            Some(_) => {}
        }
    }

    // 2) Category ids must be unique for lookups to be meaningful
    let mut seen = HashSet::new();
    for c in &state.categories {
        if !seen.insert(c.id.as_str()) {
            rows.push(("duplicate_category_id".into(), c.id.clone()));
        }
    }

    // 3) Splits that were not derived from the stored income
    if derive_splits(state.budget.income) != state.budget.splits {
        rows.push((
            "splits_out_of_sync".into(),
            format!("income {}", state.budget.income),
        ));
    }

    rows
}

pub fn handle<S: KeyValueStore>(tracker: &Tracker<S>) -> Result<()> {
    let rows: Vec<Vec<String>> = diagnose(tracker.state())
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
