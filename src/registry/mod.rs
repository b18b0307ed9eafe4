//! Bouquet registry: write-once id to record storage for server-hosted links.
//!
//! DESIGN
//! ======
//! Ids are write-once: `put` on an existing id fails with `Conflict` and
//! leaves the stored record untouched, so two creators racing for the same
//! custom id cannot overwrite each other. There is no update or delete.
//! `get` treats absence as an ordinary outcome (`NotFound`).
//!
//! Two backends share the [`Registry`] trait: [`MemoryRegistry`] for
//! development and tests, and [`FileRegistry`] which keeps every record in
//! one JSON object on disk.

pub mod file;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, PoisonError};

use crate::bouquet::BouquetRecord;

pub use file::FileRegistry;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("bouquet id already taken: {0}")]
    Conflict(String),
    #[error("bouquet not found: {0}")]
    NotFound(String),
    #[error("registry io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("registry file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyed store of bouquet records.
pub trait Registry: Send + Sync {
    /// Store a record under a new id.
    ///
    /// # Errors
    ///
    /// `Conflict` if the id already exists; backend failures otherwise.
    fn put(&self, id: &str, record: BouquetRecord) -> Result<(), RegistryError>;

    /// Fetch a record.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored under the id; backend failures otherwise.
    fn get(&self, id: &str) -> Result<BouquetRecord, RegistryError>;

    /// Whether a record exists under the id.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn contains(&self, id: &str) -> Result<bool, RegistryError> {
        match self.get(id) {
            Ok(_) => Ok(true),
            Err(RegistryError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

/// In-process registry. Records live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    records: Mutex<HashMap<String, BouquetRecord>>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Registry for MemoryRegistry {
    fn put(&self, id: &str, record: BouquetRecord) -> Result<(), RegistryError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        match records.entry(id.to_owned()) {
            Entry::Occupied(_) => Err(RegistryError::Conflict(id.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Result<BouquetRecord, RegistryError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.get(id).cloned().ok_or_else(|| RegistryError::NotFound(id.to_owned()))
    }
}
