// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::{Bucket, Category, TransactionType};
use crate::state::Tracker;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::{Context, Result, anyhow, bail};
use uuid::Uuid;

pub fn handle<S: KeyValueStore>(tracker: &mut Tracker<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim();
            if name.is_empty() {
                bail!("Category name must not be empty");
            }
            let r#type: TransactionType = required(sub, "type")?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            let bucket = parse_bucket(sub)?;
            if bucket.is_some() && r#type == TransactionType::Income {
                bail!("Only expense categories can count against a budget split");
            }
            let category = Category {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                icon: required(sub, "icon")?.trim().to_string(),
                r#type,
                color: sub.get_one::<String>("color").map(|s| s.trim().to_string()),
                bucket,
            };
            let mut categories = tracker.categories().to_vec();
            let id = category.id.clone();
            categories.push(category);
            tracker.update_categories(categories)?;
            println!("Added category '{}' ({}, id: {})", name, r#type, id);
        }
        Some(("list", sub)) => {
            let cats = tracker.categories();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            c.r#type.to_string(),
                            c.icon.clone(),
                            c.color.clone().unwrap_or_default(),
                            c.bucket.map(|b| b.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Type", "Icon", "Color", "Split"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = required(sub, "id")?.trim();
            let mut categories = tracker.categories().to_vec();
            let cat = categories
                .iter_mut()
                .find(|c| c.id == id)
                .with_context(|| format!("Category '{}' not found", id))?;
            if let Some(name) = sub.get_one::<String>("name") {
                cat.name = name.trim().to_string();
            }
            if let Some(icon) = sub.get_one::<String>("icon") {
                cat.icon = icon.trim().to_string();
            }
            if let Some(color) = sub.get_one::<String>("color") {
                cat.color = Some(color.trim().to_string());
            }
            if let Some(bucket) = parse_bucket(sub)? {
                if cat.r#type == TransactionType::Income {
                    bail!("Only expense categories can count against a budget split");
                }
                cat.bucket = Some(bucket);
            }
            let name = cat.name.clone();
            tracker.update_categories(categories)?;
            println!("Updated category '{}'", name);
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?.trim();
            let mut categories = tracker.categories().to_vec();
            let before = categories.len();
            categories.retain(|c| c.id != id);
            if categories.len() == before {
                println!("No category with id {}", id);
                return Ok(());
            }
            let orphaned = tracker
                .transactions()
                .iter()
                .filter(|t| t.category_id == id)
                .count();
            tracker.update_categories(categories)?;
            println!("Removed category {}", id);
            if orphaned > 0 {
                println!("{} transaction(s) now show as uncategorized", orphaned);
            }
        }
        _ => {}
    }
    Ok(())
}

fn parse_bucket(sub: &clap::ArgMatches) -> Result<Option<Bucket>> {
    sub.get_one::<String>("bucket")
        .map(|b| b.parse::<Bucket>().map_err(|e| anyhow!(e)))
        .transpose()
}
