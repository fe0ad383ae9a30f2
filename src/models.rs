// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::derive_splits;
use crate::error::ValidationError;

pub const UNCATEGORIZED_LABEL: &str = "(uncategorized)";

/// Largest magnitude a transaction, income or balance may carry: 10^15.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Whether `value` fits the magnitude every stored amount must respect.
pub fn within_amount_bounds(value: Decimal) -> bool {
    value.abs() <= MAX_AMOUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type '{}' (use income|expense)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installments {
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub r#type: TransactionType,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Installments>,
}

/// A transaction as submitted for creation. It has no id; the tracker assigns one.
///
/// The only way to obtain a draft is [`NewTransaction::new`], so every draft
/// that reaches the tracker already carries a non-negative amount, a category
/// reference and a description.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    r#type: TransactionType,
    amount: Decimal,
    date: NaiveDate,
    category_id: String,
    description: String,
    installments: Option<Installments>,
}

impl NewTransaction {
    pub fn new(
        r#type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
        category_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeAmount(amount.to_string()));
        }
        if !within_amount_bounds(amount) {
            return Err(ValidationError::AmountTooLarge(amount.to_string()));
        }
        let category_id = category_id.into().trim().to_string();
        if category_id.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(Self {
            r#type,
            amount,
            date,
            category_id,
            description,
            installments: None,
        })
    }

    pub fn with_installments(mut self, current: u32, total: u32) -> Result<Self, ValidationError> {
        if current == 0 || total == 0 || current > total {
            return Err(ValidationError::InvalidInstallments { current, total });
        }
        self.installments = Some(Installments { current, total });
        Ok(self)
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub(crate) fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            r#type: self.r#type,
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
            description: self.description,
            installments: self.installments,
        }
    }
}

/// Which 50/30/20 split an expense category counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Needs, Bucket::Wants, Bucket::Savings];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Needs => write!(f, "needs"),
            Bucket::Wants => write!(f, "wants"),
            Bucket::Savings => write!(f, "savings"),
        }
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "needs" => Ok(Bucket::Needs),
            "wants" => Ok(Bucket::Wants),
            "savings" => Ok(Bucket::Savings),
            other => Err(format!("Unknown bucket '{}' (use needs|wants|savings)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub r#type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
}

fn seed(
    id: &str,
    name: &str,
    icon: &str,
    r#type: TransactionType,
    color: &str,
    bucket: Option<Bucket>,
) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        r#type,
        color: Some(color.to_string()),
        bucket,
    }
}

pub static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    use Bucket::*;
    use TransactionType::*;
    vec![
        seed("1", "Alimentação", "restaurant", Expense, "rose", Some(Needs)),
        seed("2", "Transporte", "local_taxi", Expense, "amber", Some(Needs)),
        seed("3", "Lazer", "movie", Expense, "purple", Some(Wants)),
        seed("4", "Moradia", "home", Expense, "blue", Some(Needs)),
        seed("5", "Saúde", "medical_services", Expense, "emerald", Some(Needs)),
        seed("6", "Salário", "payments", Income, "emerald", None),
        seed("7", "Freelance", "work", Income, "primary", None),
        seed("8", "Educação", "school", Expense, "indigo", Some(Wants)),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSplits {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub needs: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub wants: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub savings: Decimal,
}

impl BudgetSplits {
    pub fn target(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Needs => self.needs,
            Bucket::Wants => self.wants,
            Bucket::Savings => self.savings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub income: Decimal,
    pub splits: BudgetSplits,
}

impl BudgetConfig {
    pub fn from_income(income: Decimal) -> Self {
        Self {
            income,
            splits: derive_splits(income),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self::from_income(Decimal::new(4200, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}' (use light|dark)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub initial_balance: Decimal,
    pub theme: Theme,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: "Alex Morgan".to_string(),
            initial_balance: Decimal::new(12500, 0),
            theme: Theme::Dark,
        }
    }
}

/// Everything the tracker persists. `AppState::default()` is the one
/// definition of a fresh install, shared by first run, load fallback and reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub settings: UserSettings,
    pub budget: BudgetConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: DEFAULT_CATEGORIES.clone(),
            settings: UserSettings::default(),
            budget: BudgetConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn draft_rejects_missing_fields() {
        let amt = Decimal::new(10, 0);
        assert_eq!(
            NewTransaction::new(TransactionType::Expense, amt, day(), "  ", "Taxi"),
            Err(ValidationError::MissingCategory)
        );
        assert_eq!(
            NewTransaction::new(TransactionType::Expense, amt, day(), "2", ""),
            Err(ValidationError::MissingDescription)
        );
        assert!(matches!(
            NewTransaction::new(TransactionType::Expense, Decimal::new(-5, 0), day(), "2", "Taxi"),
            Err(ValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn draft_rejects_amounts_beyond_the_ceiling() {
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000_000, 0));
        assert!(NewTransaction::new(TransactionType::Income, MAX_AMOUNT, day(), "6", "Max").is_ok());
        assert_eq!(
            NewTransaction::new(TransactionType::Income, Decimal::MAX, day(), "6", "Too much"),
            Err(ValidationError::AmountTooLarge(Decimal::MAX.to_string()))
        );
        let just_over = MAX_AMOUNT + Decimal::new(1, 2);
        assert!(matches!(
            NewTransaction::new(TransactionType::Expense, just_over, day(), "1", "Too much"),
            Err(ValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn amounts_serialize_as_exact_numbers() {
        let amount: Decimal = "1234567890.123456789".parse().unwrap();
        let t = NewTransaction::new(TransactionType::Expense, amount, day(), "4", "Obra")
            .unwrap()
            .into_transaction("t1".into());
        let raw = serde_json::to_string(&t).unwrap();
        assert!(raw.contains(r#""amount":1234567890.123456789"#), "{}", raw);
        let back: Transaction = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.amount, amount);
        assert_eq!(back.amount.scale(), 9);
    }

    #[test]
    fn draft_installments_must_be_in_range() {
        let draft =
            NewTransaction::new(TransactionType::Expense, Decimal::new(300, 0), day(), "3", "TV")
                .unwrap();
        assert!(draft.clone().with_installments(4, 3).is_err());
        assert!(draft.clone().with_installments(0, 3).is_err());
        let ok = draft.with_installments(1, 3).unwrap();
        let t = ok.into_transaction("abc".into());
        assert_eq!(t.installments, Some(Installments { current: 1, total: 3 }));
    }

    #[test]
    fn transaction_uses_camel_case_and_type_keys() {
        let t = NewTransaction::new(
            TransactionType::Income,
            Decimal::new(4200, 0),
            day(),
            "6",
            "Salary",
        )
        .unwrap()
        .into_transaction("t1".into());
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], json!("income"));
        assert_eq!(v["categoryId"], json!("6"));
        assert_eq!(v["date"], json!("2025-03-14"));
        assert!(v["amount"].is_number());
        assert!(v.get("installments").is_none());
    }

    #[test]
    fn defaults_match_fresh_install() {
        let s = AppState::default();
        assert!(s.transactions.is_empty());
        assert_eq!(s.categories.len(), 8);
        assert_eq!(s.settings.initial_balance, Decimal::new(12500, 0));
        assert_eq!(s.settings.theme, Theme::Dark);
        assert_eq!(s.budget.income, Decimal::new(4200, 0));
        assert_eq!(s.budget.splits.needs, Decimal::new(2100, 0));
    }

    #[test]
    fn enum_parsing_is_case_insensitive() {
        assert_eq!("Expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert_eq!(" LIGHT ".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("wants".parse::<Bucket>(), Ok(Bucket::Wants));
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
