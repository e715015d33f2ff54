//! One-way master password fingerprints.
//!
//! A fingerprint is `hex(SHA-512(salt || password))`.  While a vault is
//! unlocked it is the only credential kept in memory: every per-entry
//! password is encrypted under it, and the export gate compares it
//! against a freshly computed fingerprint of a re-typed password.

use std::fmt;

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Domain-separation salt mixed into every session fingerprint.
pub const FINGERPRINT_SALT: &[u8] = b"pwvault/session-fingerprint/v1";

/// Hex-encoded SHA-512 digest of a master password.
///
/// Wiped on drop; `Debug` never prints the digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hex digest, for use as the per-entry encryption password.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `password` hashes to this fingerprint.
    ///
    /// The comparison is constant-time.
    pub fn verify(&self, password: &str) -> bool {
        self == &fingerprint(password)
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for Fingerprint {}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fingerprint(<redacted>)")
    }
}

/// Fingerprint a master password with the built-in salt.
pub fn fingerprint(password: &str) -> Fingerprint {
    fingerprint_with_salt(password, FINGERPRINT_SALT)
}

/// Fingerprint a password with an explicit salt.
pub fn fingerprint_with_salt(password: &str, salt: &[u8]) -> Fingerprint {
    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}
