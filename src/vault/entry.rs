//! Password entries, encrypted and plaintext.
//!
//! `PasswordEntry` is what lives inside the vault document: the
//! `password` field is an encrypted blob keyed by the session
//! fingerprint.  `PlaintextEntry` is the import/export shape with the
//! password in the clear; it is wiped when dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single service/username/password record as stored in the vault.
///
/// Missing keys deserialize as empty strings; any other shape mismatch
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    #[serde(default)]
    pub(crate) service: String,

    #[serde(default)]
    pub(crate) username: String,

    /// Encrypted under the session fingerprint; `""` when unset.
    #[serde(default)]
    pub(crate) password: String,
}

impl PasswordEntry {
    pub(crate) fn new(service: &str, username: &str) -> Self {
        Self {
            service: service.to_string(),
            username: username.to_string(),
            password: String::new(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The encrypted password blob.
    pub fn encrypted_password(&self) -> &str {
        &self.password
    }

    /// `true` if no password has been set on this entry.
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// An entry with its password in plaintext (import file / export payload).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PlaintextEntry {
    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl PlaintextEntry {
    pub fn new(service: &str, username: &str, password: &str) -> Self {
        Self {
            service: service.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for PlaintextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaintextEntry")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
