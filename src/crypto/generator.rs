//! Random password generation.
//!
//! Characters are drawn from the thread-local CSPRNG over an
//! alphanumeric alphabet with look-alike glyphs (`0 O 1 I l`) removed.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Alphanumeric characters minus `0`, `O`, `1`, `I` and `l`.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 16;

/// Longest password we are willing to generate.
pub const MAX_LENGTH: usize = 256;

/// Generate a random password of exactly `length` characters.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_LENGTH {
        return Err(VaultError::validation(format!(
            "password length must be between 1 and {MAX_LENGTH} (got {length})"
        )));
    }

    let mut rng = rand::rng();
    let mut password = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        let idx = rng.random_range(0..ALPHABET.len());
        password.push(char::from(ALPHABET[idx]));
    }
    Ok(password)
}
