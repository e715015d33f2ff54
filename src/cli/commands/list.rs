//! `pwvault list`: show entries (never passwords).

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: Option<&str>) -> Result<()> {
    let open = open_vault(cli)?;
    let matches = open.session.search(query.unwrap_or(""))?;

    output::print_entries_table(&matches);
    Ok(())
}
