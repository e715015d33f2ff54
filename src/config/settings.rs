use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::generator::DEFAULT_LENGTH;
use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS};
use crate::errors::{Result, VaultError};
use crate::vault::VaultOptions;

/// Project-level configuration, loaded from `.pwvault.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the vault document.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// PBKDF2 iteration count (default: 310 000).
    ///
    /// Not recorded in the vault document: changing it makes an
    /// existing vault unreadable until it is changed back.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Length of generated passwords (default: 16).
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".pwvault".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_password_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<project_dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault document directory.
    ///
    /// Example: `project_dir/.pwvault`
    pub fn vault_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Convert into session options.
    pub fn vault_options(&self) -> VaultOptions {
        VaultOptions {
            kdf: KdfParams {
                iterations: self.pbkdf2_iterations,
            },
            password_length: self.password_length,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".pwvault");
        assert_eq!(s.pbkdf2_iterations, 310_000);
        assert_eq!(s.password_length, 16);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, ".pwvault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
pbkdf2_iterations = 600000
password_length = 32
"#;
        fs::write(tmp.path().join(".pwvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.pbkdf2_iterations, 600_000);
        assert_eq!(settings.password_length, 32);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwvault.toml"), "password_length = 24\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.password_length, 24);
        // Rest should be defaults
        assert_eq!(settings.vault_dir, ".pwvault");
        assert_eq!(settings.pbkdf2_iterations, 310_000);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(VaultError::ConfigError(_))));
    }

    #[test]
    fn vault_dir_path_respects_custom_dir() {
        let s = Settings {
            vault_dir: "secrets".to_string(),
            ..Settings::default()
        };
        let project = Path::new("/home/user/myproject");
        assert_eq!(
            s.vault_dir_path(project),
            PathBuf::from("/home/user/myproject/secrets")
        );
    }

    #[test]
    fn vault_options_carry_kdf_and_length() {
        let s = Settings {
            pbkdf2_iterations: 400_000,
            password_length: 12,
            ..Settings::default()
        };
        let options = s.vault_options();
        assert_eq!(options.kdf.iterations, 400_000);
        assert_eq!(options.password_length, 12);
    }
}
