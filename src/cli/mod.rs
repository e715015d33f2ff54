//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::store::FileDocumentStore;
use crate::vault::{VaultSession, VaultState};

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// pwvault CLI: client-side encrypted password vault.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Client-side encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: from .pwvault.toml, else .pwvault)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// List entries, optionally filtered by service
    List {
        /// Substring to match against service names
        query: Option<String>,
    },

    /// Reveal an entry's password
    Get {
        /// Service name
        service: String,
        /// Username, when a service has several entries
        #[arg(short, long)]
        username: Option<String>,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Add a new entry
    Add {
        /// Service name (e.g. github)
        service: String,
        /// Username for the service
        username: String,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },

    /// Change an entry's password
    Set {
        /// Service name
        service: String,
        /// Username, when a service has several entries
        #[arg(short, long)]
        username: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },

    /// Rename an entry's service or username
    Edit {
        /// Service name
        service: String,
        /// Username, when a service has several entries
        #[arg(short, long)]
        username: Option<String>,
        /// New service name
        #[arg(long)]
        new_service: Option<String>,
        /// New username
        #[arg(long)]
        new_username: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Service name
        service: String,
        /// Username, when a service has several entries
        #[arg(short, long)]
        username: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a random password
    Generate {
        /// Password length (default: from settings)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Change the vault's master password
    RotateKey,

    /// Export all entries as plaintext JSON (clipboard by default)
    Export {
        /// Print to stdout instead of copying to the clipboard
        #[arg(long)]
        stdout: bool,
    },

    /// Replace all entries with those in a plaintext JSON file
    Import {
        /// Path to a JSON array of {service, username, password}
        file: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// An unlocked vault plus the master password that unlocked it.
///
/// The password is kept only for the duration of one command so the
/// command can `save` without prompting twice.
pub struct OpenVault {
    pub session: VaultSession<FileDocumentStore>,
    pub password: Zeroizing<String>,
    pub vault_dir: PathBuf,
}

impl OpenVault {
    /// Re-key and persist under the same master password.
    pub fn save(&mut self) -> Result<()> {
        self.session.save(&self.password, &self.password)
    }
}

/// Load settings from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault directory: `--vault-dir` wins over settings.
pub fn vault_dir(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault_dir {
        Some(dir) => cwd.join(dir),
        None => settings.vault_dir_path(&cwd),
    })
}

/// Load the vault session for the configured directory, still locked.
pub fn load_session(cli: &Cli) -> Result<(VaultSession<FileDocumentStore>, PathBuf)> {
    let settings = load_settings()?;
    let dir = vault_dir(cli, &settings)?;
    let session = VaultSession::load(FileDocumentStore::new(&dir), settings.vault_options())?;
    Ok((session, dir))
}

/// Load and unlock an existing vault.
pub fn open_vault(cli: &Cli) -> Result<OpenVault> {
    let (mut session, vault_dir) = load_session(cli)?;
    if session.state() == VaultState::NotProvisioned {
        return Err(VaultError::VaultNotProvisioned);
    }

    let password = prompt_password("Enter master password")?;
    session.unlock(&password)?;

    Ok(OpenVault {
        session,
        password,
        vault_dir,
    })
}

/// Find the entry for `service` (and `username`) or fail.
pub fn select_entry(open: &OpenVault, service: &str, username: Option<&str>) -> Result<usize> {
    open.session.find(service, username)?.ok_or_else(|| {
        VaultError::EntryNotFound(match username {
            Some(u) => format!("{service} ({u})"),
            None => service.to_string(),
        })
    })
}

/// Get the master password, trying in order:
/// 1. `PWVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation.
///
/// Also respects `PWVAULT_PASSWORD` for scripted/CI usage, in which
/// case both values are the same.  Matching is left to
/// `VaultSession::save`.  Enforces a minimum password length.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            check_password_strength(&pw)?;
            return Ok((Zeroizing::new(pw.clone()), Zeroizing::new(pw)));
        }
    }

    loop {
        let password = prompt_hidden("Choose master password")?;
        if let Err(e) = check_password_strength(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }
        let confirm = prompt_hidden("Confirm master password")?;
        return Ok((password, confirm));
    }
}

/// Read an entry password: generated, piped on stdin, or prompted.
pub fn read_entry_password(
    open: &OpenVault,
    generate: bool,
    label: &str,
) -> Result<Zeroizing<String>> {
    if generate {
        return open.session.generate_random_password();
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(strip_line_ending(&buf).to_string()));
    }

    prompt_hidden(&format!("Password for {label}"))
}

/// Drop one trailing `\n` or `\r\n`.  Other whitespace is part of the
/// password.
fn strip_line_ending(input: &str) -> &str {
    match input.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => input,
    }
}

fn prompt_hidden(prompt: &str) -> Result<Zeroizing<String>> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))
}

fn check_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(VaultError::validation(format!(
            "master password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password_strength("short").is_err());
        assert!(check_password_strength("long enough").is_ok());
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes.
        assert!(check_password_strength("ééééééé").is_err());
    }

    #[test]
    fn only_the_final_line_ending_is_stripped() {
        assert_eq!(strip_line_ending("pass  \n"), "pass  ");
        assert_eq!(strip_line_ending("pass\t\r\n"), "pass\t");
        assert_eq!(strip_line_ending("pass\n\n"), "pass\n");
        assert_eq!(strip_line_ending(" pass "), " pass ");
    }

    #[test]
    fn parses_edit_renames() {
        let cli = Cli::try_parse_from([
            "pwvault",
            "edit",
            "github",
            "-u",
            "alice",
            "--new-service",
            "gitlab",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit {
                service,
                username,
                new_service,
                new_username,
            } => {
                assert_eq!(service, "github");
                assert_eq!(username.as_deref(), Some("alice"));
                assert_eq!(new_service.as_deref(), Some("gitlab"));
                assert!(new_username.is_none());
            }
            _ => panic!("expected edit"),
        }
    }
}
