//! `pwvault get`: reveal one entry's password.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, select_entry, Cli};
use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str, username: Option<&str>, copy: bool) -> Result<()> {
    let open = open_vault(cli)?;
    let index = select_entry(&open, service, username)?;
    let password = open.session.reveal_at(index)?;

    if copy {
        SystemClipboard::new()?.copy(&password)?;
        output::success(&format!("Copied password for '{service}' to the clipboard"));
        log_audit(&open.vault_dir, "copy", Some(service), None);
    } else {
        println!("{}", password.as_str());
    }

    Ok(())
}
