//! Cryptographic primitives for pwvault.
//!
//! This module provides:
//! - AES-256-GCM password-keyed encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 key derivation (`kdf`)
//! - SHA-512 master password fingerprints (`fingerprint`)
//! - CSPRNG-backed password generation (`generator`)

pub mod encryption;
pub mod fingerprint;
pub mod generator;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, fingerprint, ...};
pub use encryption::{decrypt, encrypt};
pub use fingerprint::{fingerprint, fingerprint_with_salt, Fingerprint};
pub use generator::generate_password;
pub use kdf::{derive_key_with_params, generate_salt, KdfParams};
