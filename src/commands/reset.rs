// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::state::Tracker;
use anyhow::Result;

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        println!(
            "This deletes {} transaction(s) and restores default categories and settings. \
             Re-run with --yes to confirm.",
            tracker.transactions().len()
        );
        return Ok(());
    }
    tracker.reset()?;
    println!("Data reset; budget kept at {}", tracker.budget().income.round_dp(2));
    Ok(())
}
