// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use fintrack::db::{FileStore, STORAGE_KEY};
use fintrack::state::Tracker;
use fintrack::{cli, commands};

fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    init_logging(matches.get_count("verbose"));

    let store = match matches.get_one::<String>("data-dir") {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default()?,
    };
    let mut tracker = Tracker::open(store)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            tracker.save()?;
            println!(
                "Data file at {}",
                tracker.store().path_for(STORAGE_KEY).display()
            );
        }
        Some(("dashboard", sub)) => commands::reports::handle(&tracker, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut tracker, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut tracker, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut tracker, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut tracker, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut tracker, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&tracker, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut tracker, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&tracker)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
