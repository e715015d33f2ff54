//! `pwvault add`: create a new entry with a password.
//!
//! The password is generated (`--generate`), read from piped stdin, or
//! prompted for with hidden input.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, read_entry_password, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `add` command.
pub fn execute(cli: &Cli, service: &str, username: &str, generate: bool) -> Result<()> {
    let mut open = open_vault(cli)?;

    if open.session.find(service, Some(username))?.is_some() {
        output::tip("Use `pwvault set` to change its password.");
        return Err(VaultError::CommandFailed(format!(
            "an entry for '{service}' ({username}) already exists"
        )));
    }

    let password = read_entry_password(&open, generate, service)?;

    let index = open.session.add(service, username)?;
    open.session.set_password(index, &password)?;
    open.save()?;

    output::success(&format!("Added '{service}' ({username})"));
    if generate {
        output::tip("Run `pwvault get <SERVICE> --copy` to copy the generated password.");
    }
    log_audit(
        &open.vault_dir,
        "add",
        Some(service),
        generate.then_some("generated"),
    );

    Ok(())
}
