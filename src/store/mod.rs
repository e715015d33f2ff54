//! Document store: where the vault's single ciphertext document lives.
//!
//! The vault treats the store as an opaque get/put-by-id service.
//! This module provides:
//! - The `DocumentStore` trait
//! - A directory-backed store with atomic writes (`file`)
//! - An in-memory store for tests and embedding (`memory`)

pub mod file;
pub mod memory;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

use crate::errors::Result;
use crate::vault::VaultDocument;

/// Opaque get/put-by-id document persistence.
///
/// Implementations report failures as `VaultError::Persistence`.
pub trait DocumentStore {
    /// Fetch a document, or `None` if it has never been written.
    fn get(&self, id: &str) -> Result<Option<VaultDocument>>;

    /// Create or fully replace the document with `document.id`.
    fn put(&mut self, document: &VaultDocument) -> Result<()>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &mut T {
    fn get(&self, id: &str) -> Result<Option<VaultDocument>> {
        (**self).get(id)
    }

    fn put(&mut self, document: &VaultDocument) -> Result<()> {
        (**self).put(document)
    }
}
