//! Short ID system for easier record selection
//!
//! Every listing numbers its rows `@1`, `@2`, ... and remembers which key
//! each number stood for, so a later command can say `emp show @3` instead
//! of typing the matrícula. The mapping is persisted in the data directory
//! and replaced by the next listing of the same record type.
//!
//! Only the `@N` form is treated as a short ID. Bare numbers pass through
//! untouched because matrículas are themselves numeric.

use std::collections::HashMap;
use std::fs;

use crate::core::entity::Record;
use crate::core::store::{DataDir, StoreError};

/// Index file location within the data directory
const INDEX_FILE: &str = ".shortids.json";

/// Last listing per record type: row number (from 1) to natural key
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    lists: HashMap<String, Vec<String>>,
}

impl ShortIdIndex {
    /// Load the index, or start empty if missing or unreadable
    pub fn load(dir: &DataDir) -> Self {
        let path = dir.root().join(INDEX_FILE);
        fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, dir: &DataDir) -> Result<(), StoreError> {
        let path = dir.root().join(INDEX_FILE);
        let content = serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialize {
            name: "short id",
            message: e.to_string(),
        })?;
        fs::write(&path, content).map_err(|e| StoreError::Io { path, source: e })
    }

    /// Replace the listing for `R` with the given keys, in display order
    pub fn rebuild<R: Record>(&mut self, keys: impl IntoIterator<Item = String>) {
        self.lists.insert(R::NAME.to_string(), keys.into_iter().collect());
    }

    /// Resolve `@N` against the last listing of `R`; anything else passes through
    pub fn resolve<R: Record>(&self, reference: &str) -> Option<String> {
        let Some(num) = reference.strip_prefix('@') else {
            return Some(reference.to_string());
        };
        let n: usize = num.parse().ok()?;
        self.lists
            .get(R::NAME)
            .and_then(|keys| keys.get(n.checked_sub(1)?))
            .cloned()
    }

    /// Row number of a key in the last listing of `R`
    pub fn get_short_id<R: Record>(&self, key: &str) -> Option<usize> {
        self.lists
            .get(R::NAME)
            .and_then(|keys| keys.iter().position(|k| k == key))
            .map(|i| i + 1)
    }
}
