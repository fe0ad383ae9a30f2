// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::{KeyValueStore, load_state, save_state};
use crate::error::Result;
use crate::models::{
    AppState, BudgetConfig, Category, NewTransaction, Transaction, UserSettings,
    within_amount_bounds,
};

/// Owns the application state and writes it through to `store` after every
/// mutation. Readers borrow snapshots via [`Tracker::state`]; mutations need
/// `&mut self`, so no snapshot is observed half-written.
#[derive(Debug)]
pub struct Tracker<S: KeyValueStore> {
    state: AppState,
    store: S,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn open(store: S) -> Result<Self> {
        let state = load_state(&store)?;
        Ok(Self { state, store })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn budget(&self) -> &BudgetConfig {
        &self.state.budget
    }

    pub fn settings(&self) -> &UserSettings {
        &self.state.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<&Transaction> {
        let id = self.fresh_id();
        let transaction = draft.into_transaction(id);
        tracing::info!(
            id = %transaction.id,
            kind = %transaction.r#type,
            amount = %transaction.amount,
            "transaction added"
        );
        self.state.transactions.insert(0, transaction);
        self.persist()?;
        Ok(&self.state.transactions[0])
    }

    /// Adds every draft and writes once. When that write fails the batch is
    /// taken back out, so neither memory nor the store keeps part of it.
    pub fn add_transactions(&mut self, drafts: Vec<NewTransaction>) -> Result<usize> {
        let count = drafts.len();
        for draft in drafts {
            let id = self.fresh_id();
            self.state.transactions.insert(0, draft.into_transaction(id));
        }
        if let Err(err) = self.persist() {
            self.state.transactions.drain(..count);
            tracing::warn!(count, "batch not saved, rolled back: {err}");
            return Err(err);
        }
        tracing::info!(count, "transactions added");
        Ok(count)
    }

    /// Returns whether anything was removed. Unknown ids leave the state as is.
    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.state.transactions.len();
        self.state.transactions.retain(|t| t.id != id);
        if self.state.transactions.len() == before {
            tracing::debug!(id, "delete ignored, no such transaction");
            return Ok(false);
        }
        tracing::info!(id, "transaction deleted");
        self.persist()?;
        Ok(true)
    }

    /// Replaces the budget as given; use [`Tracker::set_income`] to keep the
    /// splits derived from income.
    pub fn update_budget(&mut self, budget: BudgetConfig) -> Result<()> {
        self.state.budget = budget;
        tracing::info!(income = %budget.income, "budget updated");
        self.persist()
    }

    /// Negative or out-of-range income is ignored; returns whether the budget
    /// changed.
    pub fn set_income(&mut self, income: Decimal) -> Result<bool> {
        if income.is_sign_negative() && !income.is_zero() {
            tracing::warn!(%income, "ignoring negative income");
            return Ok(false);
        }
        if !within_amount_bounds(income) {
            tracing::warn!(%income, "ignoring income beyond the supported range");
            return Ok(false);
        }
        self.update_budget(BudgetConfig::from_income(income))?;
        Ok(true)
    }

    pub fn update_settings(&mut self, settings: UserSettings) -> Result<()> {
        self.state.settings = settings;
        tracing::info!("settings updated");
        self.persist()
    }

    pub fn update_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        self.state.categories = categories;
        tracing::info!(count = self.state.categories.len(), "categories updated");
        self.persist()
    }

    /// Clears transactions and restores default categories and settings.
    /// The budget is kept.
    pub fn reset(&mut self) -> Result<()> {
        let defaults = AppState::default();
        self.state.transactions = defaults.transactions;
        self.state.categories = defaults.categories;
        self.state.settings = defaults.settings;
        tracing::info!("state reset to defaults");
        self.persist()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.state.transactions.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    /// Writes the current state even when nothing changed.
    pub fn save(&mut self) -> Result<()> {
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        save_state(&mut self.store, &self.state)
    }
}
