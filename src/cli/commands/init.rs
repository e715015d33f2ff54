//! `pwvault init`: create a new, empty vault.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{load_session, prompt_new_password, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::VaultState;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, vault_dir) = load_session(cli)?;

    // 1. Refuse to overwrite an existing vault.
    if session.state() != VaultState::NotProvisioned {
        output::tip("Use `pwvault add` to add entries to the existing vault.");
        return Err(VaultError::CommandFailed(format!(
            "a vault already exists in {}",
            vault_dir.display()
        )));
    }

    // 2. Choose the master password.
    let (password, confirm) = prompt_new_password()?;

    // 3. Unlocking an unprovisioned vault starts it empty; saving writes it.
    session.unlock(&password)?;
    session.save(&password, &confirm)?;

    output::success(&format!("Vault created at {}", vault_dir.display()));
    log_audit(&vault_dir, "init", None, Some("vault created"));

    output::tip("Run `pwvault add <SERVICE> <USERNAME>` to add an entry.");
    output::tip("Run `pwvault generate` to get a random password.");

    Ok(())
}
