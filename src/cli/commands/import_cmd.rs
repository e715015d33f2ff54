//! `pwvault import`: replace all entries with a plaintext JSON file.
//!
//! The file is a JSON array of `{"service", "username", "password"}`
//! objects, the same shape `pwvault export` produces.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{confirm, open_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::codec;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str, force: bool) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(VaultError::CommandFailed(format!(
            "import file not found: {}",
            path.display()
        )));
    }

    // Parse before touching the vault so a bad file never prompts.
    let content = Zeroizing::new(fs::read_to_string(path)?);
    let entries = codec::parse_plaintext(&content)?;

    let mut open = open_vault(cli)?;

    let existing = open.session.entry_count();
    if existing > 0 && !force {
        let prompt = format!(
            "Replace all {existing} existing entries with {} from {}?",
            entries.len(),
            path.display()
        );
        if !confirm(&prompt)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let count = open.session.import_replacing(&entries)?;
    open.save()?;

    output::success(&format!("Imported {count} entries from {}", path.display()));
    output::tip("Delete the plaintext import file once you no longer need it.");
    log_audit(
        &open.vault_dir,
        "import",
        None,
        Some(&format!("{count} entries")),
    );

    Ok(())
}
