// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, TrackerError};
use crate::models::AppState;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const STORAGE_KEY: &str = "fintrack_data";

/// A string-keyed, string-valued local store holding whole documents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        TrackerError::DataDir("could not determine platform-specific data dir".into())
    })?;
    Ok(proj.data_dir().to_path_buf())
}

/// Reads the saved document. A missing key yields the default state; an
/// unreadable document does too. Each top-level field that is present but
/// malformed falls back to its own default without affecting the others.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> Result<AppState> {
    let Some(raw) = store.get(STORAGE_KEY)? else {
        tracing::debug!("no saved state under '{}', using defaults", STORAGE_KEY);
        return Ok(AppState::default());
    };
    Ok(parse_state(&raw))
}

pub fn parse_state(raw: &str) -> AppState {
    let doc = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!("saved state is not a JSON object, using defaults");
            return AppState::default();
        }
        Err(err) => {
            tracing::warn!("failed to parse saved state, using defaults: {err}");
            return AppState::default();
        }
    };
    let defaults = AppState::default();
    AppState {
        transactions: field_or(&doc, "transactions", defaults.transactions),
        categories: field_or(&doc, "categories", defaults.categories),
        settings: field_or(&doc, "settings", defaults.settings),
        budget: field_or(&doc, "budget", defaults.budget),
    }
}

fn field_or<T: DeserializeOwned>(doc: &Map<String, Value>, key: &str, fallback: T) -> T {
    match doc.get(key) {
        None | Some(Value::Null) => fallback,
        Some(v) => match serde_json::from_value(v.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("invalid '{key}' in saved state, using default: {err}");
                fallback
            }
        },
    }
}

/// Overwrites the whole document.
pub fn save_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &AppState) -> Result<()> {
    let payload = serde_json::to_string_pretty(state)?;
    store.set(STORAGE_KEY, &payload)?;
    tracing::debug!(
        transactions = state.transactions.len(),
        categories = state.categories.len(),
        "state saved"
    );
    Ok(())
}
