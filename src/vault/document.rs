//! The single persisted vault record.
//!
//! The document store only ever sees this shape.  `content` is the
//! Base64 blob produced by encrypting the whole entry list under the
//! raw master password; it is always replaced wholesale, never patched.

use serde::{Deserialize, Serialize};

/// Well-known id of the vault document.
pub const VAULT_DOCUMENT_ID: &str = "password-vault";

/// Well-known title of the vault document.
pub const VAULT_DOCUMENT_TITLE: &str = "Password Vault";

/// Opaque persisted vault record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    pub id: String,
    pub title: String,
    /// `Base64(salt || nonce || ciphertext || tag)` of the entry list JSON.
    pub content: String,
}

impl VaultDocument {
    /// Wrap freshly sealed ciphertext in the well-known id/title pair.
    pub fn new(content: String) -> Self {
        Self {
            id: VAULT_DOCUMENT_ID.to_string(),
            title: VAULT_DOCUMENT_TITLE.to_string(),
            content,
        }
    }
}
