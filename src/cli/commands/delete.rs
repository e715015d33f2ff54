//! `pwvault delete`: remove an entry from the vault.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{confirm, open_vault, select_entry, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, username: Option<&str>, force: bool) -> Result<()> {
    let mut open = open_vault(cli)?;
    let index = select_entry(&open, service, username)?;

    if !force {
        let entry = &open.session.entries()?[index];
        let prompt = format!("Delete '{}' ({})?", entry.service(), entry.username());
        if !confirm(&prompt)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = open.session.delete(index)?;
    open.save()?;

    output::success(&format!(
        "Deleted '{}' ({})",
        removed.service(),
        removed.username()
    ));
    log_audit(&open.vault_dir, "delete", Some(service), None);

    Ok(())
}
