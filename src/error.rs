// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Reasons a transaction draft is refused before it reaches the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(String),
    #[error("amount {0} exceeds the largest supported amount")]
    AmountTooLarge(String),
    #[error("a category is required")]
    MissingCategory,
    #[error("a description is required")]
    MissingDescription,
    #[error("installment {current}/{total} is out of range")]
    InvalidInstallments { current: u32, total: u32 },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available: {0}")]
    DataDir(String),
}
