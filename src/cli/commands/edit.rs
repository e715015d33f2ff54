//! `pwvault edit`: rename an entry's service or username.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, select_entry, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `edit` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: Option<&str>,
    new_service: Option<&str>,
    new_username: Option<&str>,
) -> Result<()> {
    if new_service.is_none() && new_username.is_none() {
        return Err(VaultError::CommandFailed(
            "nothing to change: pass --new-service and/or --new-username".into(),
        ));
    }

    let mut open = open_vault(cli)?;
    let index = select_entry(&open, service, username)?;

    let current = &open.session.entries()?[index];
    let service_after = new_service.unwrap_or(current.service()).to_string();
    let username_after = new_username.unwrap_or(current.username()).to_string();

    open.session.edit(index, &service_after, &username_after)?;
    open.save()?;

    output::success(&format!(
        "Updated '{service}' -> '{service_after}' ({username_after})"
    ));
    log_audit(&open.vault_dir, "edit", Some(&service_after), None);

    Ok(())
}
