//! AES-256-GCM authenticated encryption keyed by a password.
//!
//! Each call to `encrypt` generates a fresh random salt and nonce,
//! derives a key from the password with PBKDF2, and returns a single
//! Base64 string.  `decrypt` splits the framing back apart.
//!
//! Layout of the decoded blob:
//!   [ 16-byte salt | 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! The empty string is reserved for empty plaintext and never reaches
//! the cipher.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use super::kdf::{derive_key_with_params, generate_salt, KdfParams, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Shortest decoded blob that can possibly authenticate.
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` under `password`.
///
/// Returns `Base64(salt || nonce || ciphertext || tag)`, or an empty
/// string when `plaintext` is empty.
pub fn encrypt(plaintext: &str, password: &str, params: &KdfParams) -> Result<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let salt = generate_salt();
    let key = derive_key_with_params(password.as_bytes(), &salt, params)?;

    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut framed = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    framed.extend_from_slice(&salt);
    framed.extend_from_slice(&nonce);
    framed.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(framed))
}

/// Decrypt a blob produced by `encrypt`.
///
/// Every failure (bad Base64, truncated framing, tag mismatch, invalid
/// UTF-8) collapses into `VaultError::Authentication`.
pub fn decrypt(blob: &str, password: &str, params: &KdfParams) -> Result<Zeroizing<String>> {
    if blob.is_empty() {
        return Ok(Zeroizing::new(String::new()));
    }

    let framed = BASE64
        .decode(blob)
        .map_err(|_| VaultError::Authentication)?;
    if framed.len() < MIN_BLOB_LEN {
        return Err(VaultError::Authentication);
    }

    let (salt, rest) = framed.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let key = derive_key_with_params(password.as_bytes(), salt, params)?;
    let cipher =
        Aes256Gcm::new_from_slice(&key[..]).map_err(|_| VaultError::Authentication)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::Authentication)?;

    // from_utf8 takes ownership; wipe the bytes if they are rejected.
    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::Authentication
    })
}
