//! `pwvault generate`: print a random password.  Needs no vault.

use crate::cli::load_settings;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => load_settings()?.password_length,
    };

    let password = generate_password(length)?;
    println!("{}", password.as_str());
    Ok(())
}
