//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::PasswordEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (Service, Username, Password set?).
///
/// Passwords are never shown here; use `pwvault get`.
pub fn print_entries_table(entries: &[&PasswordEntry]) {
    if entries.is_empty() {
        info("No matching entries.");
        tip("Run `pwvault add <SERVICE> <USERNAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Username", "Password"]);

    for entry in entries {
        let service = if entry.service().is_empty() {
            "-"
        } else {
            entry.service()
        };
        let password = if entry.has_password() { "set" } else { "-" };
        table.add_row(vec![service, entry.username(), password]);
    }

    println!("{table}");
}
