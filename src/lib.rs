//! pwvault: a client-side encrypted password vault.
//!
//! The vault is one document whose content is the JSON entry list,
//! encrypted (AES-256-GCM, PBKDF2-derived key) under the master password.
//! Each entry's password is additionally encrypted under a fingerprint of
//! the master password, so revealing one entry never needs the password
//! itself.  The document store only ever sees ciphertext.

pub mod audit;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod store;
pub mod vault;
