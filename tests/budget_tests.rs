// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::budgets::{self, budget_report};
use fintrack::db::MemoryStore;
use fintrack::models::{Bucket, NewTransaction, TransactionType};
use fintrack::state::Tracker;
use fintrack::{cli, commands::settings};
use rust_decimal::Decimal;

fn expense(amount: i64, cat: &str, y: i32, m: u32, d: u32) -> NewTransaction {
    NewTransaction::new(
        TransactionType::Expense,
        Decimal::new(amount, 0),
        NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        cat,
        "spend",
    )
    .unwrap()
}

fn budget_cmd(tracker: &mut Tracker<MemoryStore>, args: &[&str]) {
    let mut argv = vec!["fintrack", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("budget", m)) = matches.subcommand() {
        budgets::handle(tracker, m).unwrap();
    } else {
        panic!("no budget subcommand");
    }
}

#[test]
fn report_tracks_spend_per_split_for_the_month() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    // Moradia (needs) 1500 + Saúde (needs) 350 in August, Lazer (wants) 2500 in August
    tracker.add_transaction(expense(1500, "4", 2025, 8, 5)).unwrap();
    tracker.add_transaction(expense(350, "5", 2025, 8, 9)).unwrap();
    tracker.add_transaction(expense(2500, "3", 2025, 8, 20)).unwrap();
    // July spend must not count
    tracker.add_transaction(expense(999, "4", 2025, 7, 31)).unwrap();

    let report = budget_report(tracker.state(), 2025, 8);
    assert_eq!(report.month, "2025-08");

    let needs = &report.lines[0];
    assert_eq!(needs.bucket, Bucket::Needs);
    assert_eq!(needs.target, Decimal::new(2100, 0));
    assert_eq!(needs.spent, Decimal::new(1850, 0));
    assert_eq!(needs.progress.round_dp(1), Decimal::new(881, 1));
    assert_eq!(needs.remaining, Decimal::new(250, 0));

    let wants = &report.lines[1];
    assert_eq!(wants.progress, Decimal::ONE_HUNDRED);
    assert_eq!(wants.remaining, Decimal::new(-1240, 0));

    let savings = &report.lines[2];
    assert_eq!(savings.spent, Decimal::ZERO);
    assert!(savings.below_goal);
}

#[test]
fn set_income_command_rederives_splits() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    budget_cmd(&mut tracker, &["set-income", "5000,00"]);
    let b = tracker.budget();
    assert_eq!(b.income, Decimal::new(5000, 0));
    assert_eq!(b.splits.needs, Decimal::new(2500, 0));
    assert_eq!(b.splits.wants, Decimal::new(1500, 0));
    assert_eq!(b.splits.savings, Decimal::new(1000, 0));
}

#[test]
fn invalid_income_is_silently_ignored() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    let before = *tracker.budget();
    budget_cmd(&mut tracker, &["set-income", "abc"]);
    budget_cmd(&mut tracker, &["set-income", "-300"]);
    budget_cmd(&mut tracker, &["set-income", "79228162514264337593543950335"]);
    assert_eq!(tracker.budget(), &before);
}

#[test]
fn invalid_initial_balance_is_ignored_but_other_fields_apply() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "settings",
        "set",
        "--initial-balance",
        "NaN?",
        "--theme",
        "light",
    ]);
    if let Some(("settings", m)) = matches.subcommand() {
        settings::handle(&mut tracker, m).unwrap();
    } else {
        panic!("no settings subcommand");
    }
    assert_eq!(tracker.settings().initial_balance, Decimal::new(12500, 0));
    assert_eq!(tracker.settings().theme.to_string(), "light");
}

#[test]
fn initial_balance_beyond_ceiling_is_ignored() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "settings",
        "set",
        "--initial-balance",
        "-79228162514264337593543950335",
        "--name",
        "Bia",
    ]);
    if let Some(("settings", m)) = matches.subcommand() {
        settings::handle(&mut tracker, m).unwrap();
    } else {
        panic!("no settings subcommand");
    }
    assert_eq!(tracker.settings().initial_balance, Decimal::new(12500, 0));
    assert_eq!(tracker.settings().name, "Bia");
}
