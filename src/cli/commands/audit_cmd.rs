//! `pwvault audit`: show the history of vault operations.
//!
//! Usage:
//!   pwvault audit               # last 50 operations
//!   pwvault audit --last 20
//!   pwvault audit --since 7d

use chrono::{DateTime, TimeDelta, Utc};

#[cfg(feature = "audit-log")]
use crate::audit::{AuditEntry, AuditLog};
use crate::cli::Cli;
use crate::errors::{Result, VaultError};

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    use crate::cli::{load_settings, output, vault_dir};

    let settings = load_settings()?;
    let dir = vault_dir(cli, &settings)?;
    if !dir.exists() {
        return Err(VaultError::VaultNotProvisioned);
    }

    let audit = AuditLog::open(&dir)
        .ok_or_else(|| VaultError::AuditError("failed to open audit database".into()))?;

    let since = since.map(parse_duration).transpose()?;
    let entries = audit.query(last, since)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);
    Ok(())
}

/// Without the `audit-log` feature there is nothing to show.
#[cfg(not(feature = "audit-log"))]
pub fn execute(_cli: &Cli, _last: usize, since: Option<&str>) -> Result<()> {
    if let Some(s) = since {
        parse_duration(s)?;
    }
    Err(VaultError::AuditError(
        "this build of pwvault has no audit log (enable the `audit-log` feature)".into(),
    ))
}

/// Parse "7d", "24h" or "30m" into the instant that long ago.
fn parse_duration(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        VaultError::CommandFailed(format!(
            "invalid duration '{input}' (use a form like 7d, 24h or 30m)"
        ))
    };

    let (num_str, unit) = match input.char_indices().last() {
        Some((i, c @ ('d' | 'h' | 'm'))) => (&input[..i], c),
        _ => return Err(invalid()),
    };
    let num: i64 = num_str.parse().map_err(|_| invalid())?;

    let duration = match unit {
        'd' => TimeDelta::try_days(num),
        'h' => TimeDelta::try_hours(num),
        _ => TimeDelta::try_minutes(num),
    }
    .ok_or_else(invalid)?;

    Utc::now().checked_sub_signed(duration).ok_or_else(invalid)
}

#[cfg(feature = "audit-log")]
fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Document", "Service", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.document.clone(),
            entry.service.clone().unwrap_or_else(|| "-".into()),
            entry.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

#[cfg(feature = "audit-log")]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "init" | "add" => style(op).green().to_string(),
        "set" | "edit" => style(op).blue().to_string(),
        "delete" => style(op).red().to_string(),
        "rotate-key" => style(op).yellow().to_string(),
        "export" | "import" | "copy" => style(op).cyan().to_string(),
        _ => op.to_string(),
    }
}
