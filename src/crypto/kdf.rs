//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every encryption call derives a fresh 256-bit AES key from the
//! password and a random per-blob salt.  The iteration count is
//! configurable via `KdfParams` (loaded from `.pwvault.toml` or
//! sensible defaults).

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 310_000;

/// Lowest iteration count we accept.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Configurable PBKDF2 parameters.
///
/// The iteration count is not recorded in the ciphertext, so the same
/// value must be used to encrypt and to decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2-HMAC-SHA256 rounds (default: 310 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key with explicit PBKDF2 parameters.
///
/// The same password + salt + params always produce the same key.
/// The returned buffer is wiped when dropped.
pub fn derive_key_with_params(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if params.iterations < MIN_ITERATIONS {
        return Err(VaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key[..]);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
