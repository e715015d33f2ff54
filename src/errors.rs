use thiserror::Error;

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    /// Wrong password or tampered ciphertext. The two causes are
    /// deliberately indistinguishable.
    #[error("Authentication failed: wrong password or corrupted data")]
    Authentication,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Malformed vault: {0}")]
    MalformedVault(String),

    #[error("{0}")]
    Validation(String),

    #[error("Document store error: {0}")]
    Persistence(String),

    #[error("Vault is locked. Unlock it first")]
    VaultLocked,

    #[error("Vault is already unlocked")]
    AlreadyUnlocked,

    #[error("No vault found. Run `pwvault init` to create one")]
    VaultNotProvisioned,

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    // --- Clipboard errors ---
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl VaultError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
