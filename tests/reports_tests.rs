// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::{doctor::diagnose, reports::dashboard};
use fintrack::db::MemoryStore;
use fintrack::models::{BudgetConfig, BudgetSplits, NewTransaction, TransactionType};
use fintrack::state::Tracker;
use rust_decimal::Decimal;

fn add(tracker: &mut Tracker<MemoryStore>, r#type: TransactionType, amount: i64, cat: &str, m: u32) {
    let draft = NewTransaction::new(
        r#type,
        Decimal::new(amount, 0),
        NaiveDate::from_ymd_opt(2025, m, 15).unwrap(),
        cat,
        format!("item {}", amount),
    )
    .unwrap();
    tracker.add_transaction(draft).unwrap();
}

#[test]
fn dashboard_totals_and_recent_list() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    add(&mut tracker, TransactionType::Income, 1000, "7", 7);
    add(&mut tracker, TransactionType::Income, 4200, "6", 8);
    add(&mut tracker, TransactionType::Expense, 640, "1", 8);
    for n in 1..=4 {
        add(&mut tracker, TransactionType::Expense, n, "3", 8);
    }

    let d = dashboard(tracker.state(), 2025, 8);
    // 12500 + 5200 - (640 + 10)
    assert_eq!(d.balance, Decimal::new(17050, 0));
    assert_eq!(d.total_income, Decimal::new(5200, 0));
    assert_eq!(d.month_income, Decimal::new(4200, 0));
    assert_eq!(d.month_expense, Decimal::new(650, 0));
    assert_eq!(d.month_net, Decimal::new(3550, 0));
    assert_eq!(d.recent.len(), 5);
    assert_eq!(d.recent[0].description, "item 4");
    assert_eq!(d.budget.lines.len(), 3);
}

#[test]
fn dashboard_renders_dangling_category_as_uncategorized() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    add(&mut tracker, TransactionType::Expense, 30, "gone", 8);
    let d = dashboard(tracker.state(), 2025, 8);
    assert_eq!(d.recent[0].category, "(uncategorized)");
}

#[test]
fn doctor_is_quiet_on_default_data() {
    let tracker = Tracker::open(MemoryStore::new()).unwrap();
    assert!(diagnose(tracker.state()).is_empty());
}

#[test]
fn doctor_reports_dangling_mismatched_and_out_of_sync() {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    add(&mut tracker, TransactionType::Expense, 30, "gone", 8);
    add(&mut tracker, TransactionType::Expense, 30, "6", 8);
    let mut cats = tracker.categories().to_vec();
    cats.push(cats[0].clone());
    tracker.update_categories(cats).unwrap();
    tracker
        .update_budget(BudgetConfig {
            income: Decimal::new(4200, 0),
            splits: BudgetSplits {
                needs: Decimal::new(4200, 0),
                wants: Decimal::ZERO,
                savings: Decimal::ZERO,
            },
        })
        .unwrap();

    let issues: Vec<String> = diagnose(tracker.state())
        .into_iter()
        .map(|(issue, _)| issue)
        .collect();
    assert_eq!(
        issues,
        vec![
            "type_mismatch",
            "dangling_category",
            "duplicate_category_id",
            "splits_out_of_sync",
        ]
    );
}
