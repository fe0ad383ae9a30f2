// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over the transaction list. Everything here is a pure
//! function of its inputs and is recomputed on every call.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{Bucket, BudgetSplits, Category, Transaction, TransactionType};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn total_by_type(transactions: &[Transaction], r#type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == r#type)
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Starting balance plus all income minus all expenses. Not bounded below.
pub fn current_balance(initial_balance: Decimal, transactions: &[Transaction]) -> Decimal {
    initial_balance.saturating_add(net_for_period(transactions))
}

pub fn net_for_period(transactions: &[Transaction]) -> Decimal {
    total_by_type(transactions, TransactionType::Income)
        .saturating_sub(total_by_type(transactions, TransactionType::Expense))
}

/// Percentage of `target` consumed by `spent`, clamped to `[0, 100]`.
/// A zero target yields 0.
pub fn budget_progress(spent: Decimal, target: Decimal) -> Decimal {
    if target.is_zero() {
        return Decimal::ZERO;
    }
    match spent.checked_div(target).and_then(|r| r.checked_mul(HUNDRED)) {
        Some(pct) => pct.clamp(Decimal::ZERO, HUNDRED),
        // Overflow means the ratio is far outside [0, 100]; only its sign matters.
        None if spent.is_sign_negative() == target.is_sign_negative() => HUNDRED,
        None => Decimal::ZERO,
    }
}

/// What is left of `target`; negative when over budget.
pub fn remaining(target: Decimal, spent: Decimal) -> Decimal {
    target.saturating_sub(spent)
}

pub fn derive_splits(income: Decimal) -> BudgetSplits {
    BudgetSplits {
        needs: income * Decimal::new(5, 1),
        wants: income * Decimal::new(3, 1),
        savings: income * Decimal::new(2, 1),
    }
}

/// Savings is flagged as behind while less than a fifth of its target is set aside.
pub fn below_savings_goal(spent: Decimal, target: Decimal) -> bool {
    spent < target * Decimal::new(2, 1)
}

pub fn resolve_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

/// Case-insensitive substring search over the description and the resolved
/// category name. The raw `category_id` is never matched.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
    query: &str,
) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            if t.description.to_lowercase().contains(&needle) {
                return true;
            }
            resolve_category(categories, &t.category_id)
                .map(|c| c.name.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

pub fn in_month(transactions: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .cloned()
        .collect()
}

/// Expenses whose category counts against `bucket`. Dangling references and
/// categories without a bucket contribute nothing.
pub fn spent_by_bucket(
    transactions: &[Transaction],
    categories: &[Category],
    bucket: Bucket,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
        .filter(|t| {
            resolve_category(categories, &t.category_id).and_then(|c| c.bucket) == Some(bucket)
        })
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
