//! `pwvault rotate-key`: change the vault's master password.
//!
//! Every entry is re-encrypted under the new password's fingerprint and
//! the vault is written once.  If anything fails, the stored vault is
//! left exactly as it was.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, Cli};
use crate::errors::Result;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut open = open_vault(cli)?;

    output::info("Choose the new master password.");
    let (new_password, confirm) = prompt_new_password()?;

    open.session.save(&new_password, &confirm)?;

    let count = open.session.entry_count();
    output::success(&format!("Master password changed ({count} entries re-encrypted)"));
    log_audit(
        &open.vault_dir,
        "rotate-key",
        None,
        Some(&format!("{count} entries")),
    );

    Ok(())
}
