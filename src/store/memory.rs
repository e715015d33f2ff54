//! In-memory document store.

use std::collections::HashMap;

use super::DocumentStore;
use crate::errors::{Result, VaultError};
use crate::vault::VaultDocument;

/// Keeps documents in a `HashMap`.
///
/// `set_fail_puts(true)` makes every `put` fail with a persistence
/// error, and `put_count` reports how many writes succeeded.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<String, VaultDocument>,
    fail_puts: bool,
    puts: usize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `document`.
    pub fn with_document(document: VaultDocument) -> Self {
        let mut store = Self::default();
        store.documents.insert(document.id.clone(), document);
        store
    }

    pub fn set_fail_puts(&mut self, fail: bool) {
        self.fail_puts = fail;
    }

    /// Number of successful `put` calls.
    pub fn put_count(&self) -> usize {
        self.puts
    }

    pub fn document(&self, id: &str) -> Option<&VaultDocument> {
        self.documents.get(id)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, id: &str) -> Result<Option<VaultDocument>> {
        Ok(self.documents.get(id).cloned())
    }

    fn put(&mut self, document: &VaultDocument) -> Result<()> {
        if self.fail_puts {
            return Err(VaultError::Persistence("store unavailable".into()));
        }
        self.documents.insert(document.id.clone(), document.clone());
        self.puts += 1;
        Ok(())
    }
}
