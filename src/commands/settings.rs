// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::{Theme, within_amount_bounds};
use crate::state::Tracker;
use crate::utils::{fmt_money, maybe_print_json, parse_amount_lenient, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = tracker.settings();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
                let data = vec![
                    vec!["Name".to_string(), s.name.clone()],
                    vec!["Initial balance".to_string(), fmt_money(&s.initial_balance)],
                    vec!["Theme".to_string(), s.theme.to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], data));
            }
        }
        Some(("set", sub)) => set(tracker, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<S: KeyValueStore>(tracker: &mut Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let mut settings = tracker.settings().clone();
    let mut changed = false;

    if let Some(name) = sub.get_one::<String>("name") {
        settings.name = name.trim().to_string();
        changed = true;
    }
    if let Some(raw) = sub.get_one::<String>("initial-balance") {
        match parse_amount_lenient(raw) {
            Some(v) if within_amount_bounds(v) => {
                settings.initial_balance = v;
                changed = true;
            }
            Some(v) => {
                tracing::warn!(%v, "ignoring initial balance beyond the supported range");
                println!("Initial balance unchanged: {} is out of range", raw);
            }
            None => {
                tracing::warn!(input = %raw, "ignoring non-numeric initial balance");
                println!("Initial balance unchanged: '{}' is not a number", raw);
            }
        }
    }
    if let Some(theme) = sub.get_one::<String>("theme") {
        settings.theme = theme.parse::<Theme>().map_err(|e| anyhow!(e))?;
        changed = true;
    }

    if changed {
        tracker.update_settings(settings)?;
        println!("Settings updated");
    } else {
        println!("Nothing to update");
    }
    Ok(())
}
