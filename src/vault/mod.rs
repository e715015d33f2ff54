//! Vault module: the encrypted password vault.
//!
//! This module provides:
//! - The persisted `VaultDocument` (`document`)
//! - `PasswordEntry` and `PlaintextEntry` types (`entry`)
//! - Document encoding and the batch re-key transform (`codec`)
//! - The `VaultSession` state machine and public API (`session`)

pub mod codec;
pub mod document;
pub mod entry;
pub mod session;

// Re-export the most commonly used items.
pub use codec::Sealed;
pub use document::{VaultDocument, VAULT_DOCUMENT_ID, VAULT_DOCUMENT_TITLE};
pub use entry::{PasswordEntry, PlaintextEntry};
pub use session::{VaultOptions, VaultSession, VaultState};
