// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::db::MemoryStore;
use fintrack::models::{NewTransaction, TransactionType};
use fintrack::state::Tracker;
use fintrack::{cli, commands::exporter};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn seeded() -> Tracker<MemoryStore> {
    let mut tracker = Tracker::open(MemoryStore::new()).unwrap();
    let draft = NewTransaction::new(
        TransactionType::Expense,
        Decimal::new(1234, 2),
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        "1",
        "Corner Shop",
    )
    .unwrap();
    tracker.add_transaction(draft).unwrap();
    tracker
}

fn export(tracker: &Tracker<MemoryStore>, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(tracker, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let tracker = seeded();
    let id = tracker.transactions()[0].id.clone();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&tracker, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": id,
                "date": "2025-01-02",
                "type": "expense",
                "amount": "12.34",
                "category": "Alimentação",
                "description": "Corner Shop"
            }
        ])
    );
}

#[test]
fn export_csv_marks_dangling_category_blank() {
    let mut tracker = seeded();
    tracker.update_categories(Vec::new()).unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&tracker, "CSV", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][1], "2025-01-02");
    assert_eq!(&records[0][3], "12.34");
    assert_eq!(&records[0][4], "");
    assert_eq!(&records[0][5], "Corner Shop");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let tracker = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&tracker, "xml", &out_str).is_err());
    assert!(!out_path.exists());
}
