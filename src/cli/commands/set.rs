//! `pwvault set`: change an existing entry's password.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, read_entry_password, select_entry, Cli};
use crate::errors::Result;

/// Execute the `set` command.
pub fn execute(cli: &Cli, service: &str, username: Option<&str>, generate: bool) -> Result<()> {
    let mut open = open_vault(cli)?;
    let index = select_entry(&open, service, username)?;

    let password = read_entry_password(&open, generate, service)?;
    open.session.set_password(index, &password)?;
    open.save()?;

    output::success(&format!("Updated password for '{service}'"));
    log_audit(
        &open.vault_dir,
        "set",
        Some(service),
        generate.then_some("generated"),
    );

    Ok(())
}
