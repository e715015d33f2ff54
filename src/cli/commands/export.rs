//! `pwvault export`: decrypt every entry into a plaintext JSON array.
//!
//! The master password is asked for again before anything is decrypted.
//! The payload goes to the clipboard unless `--stdout` is given.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_vault, prompt_password, Cli};
use crate::clipboard::SystemClipboard;
use crate::errors::Result;

/// Execute the `export` command.
pub fn execute(cli: &Cli, stdout: bool) -> Result<()> {
    let open = open_vault(cli)?;
    let password = prompt_password("Re-enter master password to export")?;

    let count = if stdout {
        let payload = open.session.export_plaintext(&password)?;
        println!("{}", payload.as_str());
        open.session.entry_count()
    } else {
        let mut clipboard = SystemClipboard::new()?;
        let count = open.session.export_to(&password, &mut clipboard)?;
        output::success(&format!("Copied {count} entries to the clipboard"));
        output::warning("The clipboard now holds plaintext passwords.");
        count
    };

    log_audit(
        &open.vault_dir,
        "export",
        None,
        Some(&format!("{count} entries")),
    );

    Ok(())
}
