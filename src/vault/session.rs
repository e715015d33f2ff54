//! The vault session: lock state, in-memory entries, and every
//! operation a caller can perform on them.
//!
//! `VaultSession` owns its document store.  Create one with
//! `VaultSession::load`, `unlock` it with the master password, work with
//! entries, then `save` with the master password (same or new) to
//! re-key and persist.
//!
//! ```text
//! NotProvisioned --unlock--> Unlocked (empty)
//! Locked --unlock--> Unlocked --save--> Unlocked
//! Unlocked --lock--> Locked | NotProvisioned
//! ```
//!
//! Mutating operations take `&mut self`, so a second mutation can never
//! start while one is in flight, and reads cannot overlap a save.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::codec::{self, Sealed};
use super::document::{VaultDocument, VAULT_DOCUMENT_ID};
use super::entry::{PasswordEntry, PlaintextEntry};
use crate::clipboard::ClipboardSink;
use crate::crypto::generator::{self, DEFAULT_LENGTH};
use crate::crypto::{decrypt, encrypt, fingerprint, Fingerprint, KdfParams};
use crate::errors::{Result, VaultError};
use crate::store::DocumentStore;

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultOptions {
    /// Key derivation parameters for both encryption layers.
    pub kdf: KdfParams,
    /// Length of generated passwords.
    pub password_length: usize,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            password_length: DEFAULT_LENGTH,
        }
    }
}

/// Observable lock state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No vault document exists yet; unlocking starts an empty vault.
    NotProvisioned,
    /// A vault document exists and has not been decrypted.
    Locked,
    /// Entries and fingerprint are held in memory.
    Unlocked,
}

/// What an unlocked session holds.  Dropped on lock.
struct Unlocked {
    fingerprint: Fingerprint,
    entries: Vec<PasswordEntry>,
}

/// A password vault bound to a document store.
pub struct VaultSession<S: DocumentStore> {
    store: S,
    options: VaultOptions,

    /// Last document seen in or written to the store.
    document: Option<VaultDocument>,

    unlocked: Option<Unlocked>,
}

impl<S: DocumentStore> VaultSession<S> {
    // ------------------------------------------------------------------
    // Construction and lock state
    // ------------------------------------------------------------------

    /// Fetch the vault document from `store` and start locked.
    ///
    /// A missing document is not an error: the session starts in
    /// `NotProvisioned` and the first `unlock` creates an empty vault.
    pub fn load(store: S, options: VaultOptions) -> Result<Self> {
        let document = store.get(VAULT_DOCUMENT_ID)?;
        match document {
            Some(_) => debug!("vault document loaded"),
            None => info!("no vault document yet, vault is not provisioned"),
        }

        Ok(Self {
            store,
            options,
            document,
            unlocked: None,
        })
    }

    pub fn state(&self) -> VaultState {
        match (&self.unlocked, &self.document) {
            (Some(_), _) => VaultState::Unlocked,
            (None, Some(_)) => VaultState::Locked,
            (None, None) => VaultState::NotProvisioned,
        }
    }

    /// Decrypt the vault with `master_password`.
    ///
    /// On failure the session stays locked and the caller may retry.
    pub fn unlock(&mut self, master_password: &str) -> Result<()> {
        if self.unlocked.is_some() {
            return Err(VaultError::AlreadyUnlocked);
        }
        if master_password.is_empty() {
            return Err(VaultError::validation("master password cannot be empty"));
        }

        let (entries, fingerprint) = match &self.document {
            Some(document) => codec::open(document, master_password, &self.options.kdf)
                .inspect_err(|e| warn!(error = %e, "unlock failed"))?,
            None => (Vec::new(), fingerprint(master_password)),
        };

        info!(entries = entries.len(), "vault unlocked");
        self.unlocked = Some(Unlocked {
            fingerprint,
            entries,
        });
        Ok(())
    }

    /// Forget the fingerprint and all in-memory entries.
    ///
    /// Unsaved changes are discarded.
    pub fn lock(&mut self) {
        if self.unlocked.take().is_some() {
            info!("vault locked");
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All entries, in unlock order followed by any added since.
    pub fn entries(&self) -> Result<&[PasswordEntry]> {
        Ok(&self.unlocked()?.entries)
    }

    /// Entries whose service contains `query`.  An empty query matches all.
    pub fn search(&self, query: &str) -> Result<Vec<&PasswordEntry>> {
        Ok(self
            .unlocked()?
            .entries
            .iter()
            .filter(|entry| entry.service.contains(query))
            .collect())
    }

    /// Index of the first entry for `service` (and `username`, if given).
    pub fn find(&self, service: &str, username: Option<&str>) -> Result<Option<usize>> {
        Ok(self.unlocked()?.entries.iter().position(|entry| {
            entry.service == service && username.map_or(true, |u| entry.username == u)
        }))
    }

    /// Decrypt an entry's password.  Nothing is cached or persisted.
    pub fn reveal(&self, entry: &PasswordEntry) -> Result<Zeroizing<String>> {
        let session = self.unlocked()?;
        decrypt(
            &entry.password,
            session.fingerprint.as_str(),
            &self.options.kdf,
        )
    }

    /// `reveal` by index into `entries()`.
    pub fn reveal_at(&self, index: usize) -> Result<Zeroizing<String>> {
        let entry = self.entry(index)?;
        self.reveal(entry)
    }

    /// A fresh random password of the configured length.
    pub fn generate_random_password(&self) -> Result<Zeroizing<String>> {
        generator::generate_password(self.options.password_length)
    }

    // ------------------------------------------------------------------
    // In-memory mutations (persisted only by `save`)
    // ------------------------------------------------------------------

    /// Append an entry with no password and return its index.
    pub fn add(&mut self, service: &str, username: &str) -> Result<usize> {
        let session = self.unlocked_mut()?;
        session.entries.push(PasswordEntry::new(service, username));
        debug!("entry added");
        Ok(session.entries.len() - 1)
    }

    /// Change an entry's service and username.
    pub fn edit(&mut self, index: usize, service: &str, username: &str) -> Result<()> {
        let entry = self.entry_mut(index)?;
        entry.service = service.to_string();
        entry.username = username.to_string();
        Ok(())
    }

    /// Encrypt `plaintext` under the session fingerprint and store it on
    /// the entry.
    pub fn set_password(&mut self, index: usize, plaintext: &str) -> Result<()> {
        let kdf = self.options.kdf;
        let session = self.unlocked_mut()?;
        let entry = session
            .entries
            .get_mut(index)
            .ok_or_else(|| VaultError::EntryNotFound(format!("no entry at index {index}")))?;

        entry.password = encrypt(plaintext, session.fingerprint.as_str(), &kdf)?;
        Ok(())
    }

    /// Remove and return the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Result<PasswordEntry> {
        let session = self.unlocked_mut()?;
        if index >= session.entries.len() {
            return Err(VaultError::EntryNotFound(format!(
                "no entry at index {index}"
            )));
        }
        debug!("entry deleted");
        Ok(session.entries.remove(index))
    }

    /// Replace every entry with `entries`, encrypted under the session
    /// fingerprint.  Returns the number imported.
    pub fn import_replacing(&mut self, entries: &[PlaintextEntry]) -> Result<usize> {
        let kdf = self.options.kdf;
        let session = self.unlocked_mut()?;

        let mut encrypted = codec::encrypt_entries(entries, &session.fingerprint, &kdf)?;
        codec::sort_entries(&mut encrypted);
        session.entries = encrypted;

        info!(entries = entries.len(), "entries replaced by import");
        Ok(entries.len())
    }

    // ------------------------------------------------------------------
    // Master-password operations
    // ------------------------------------------------------------------

    /// Re-key all entries to `master_password`, encrypt the vault under
    /// it and write the document.
    ///
    /// If sealing or the store write fails, the session is unchanged:
    /// entries stay keyed to the old fingerprint and nothing is retried.
    pub fn save(&mut self, master_password: &str, confirm: &str) -> Result<()> {
        let kdf = self.options.kdf;
        let session = self.unlocked()?;

        if master_password.is_empty() || confirm.is_empty() {
            return Err(VaultError::validation("password fields cannot be empty"));
        }
        if master_password != confirm {
            return Err(VaultError::validation("passwords do not match"));
        }

        let Sealed {
            document,
            entries,
            fingerprint,
        } = codec::seal(&session.entries, master_password, &session.fingerprint, &kdf)
            .inspect_err(|e| warn!(error = %e, "re-key failed, nothing written"))?;

        self.store.put(&document).map_err(|e| {
            warn!(error = %e, "vault document write failed");
            match e {
                VaultError::Persistence(_) => e,
                other => VaultError::Persistence(other.to_string()),
            }
        })?;

        info!(entries = entries.len(), "vault saved");
        self.document = Some(document);
        self.unlocked = Some(Unlocked {
            fingerprint,
            entries,
        });
        Ok(())
    }

    /// Decrypt every entry and render the plaintext export payload.
    ///
    /// `master_password` is checked against the session fingerprint
    /// first; a mismatch decrypts nothing.
    pub fn export_plaintext(&self, master_password: &str) -> Result<Zeroizing<String>> {
        let session = self.unlocked()?;
        if !session.fingerprint.verify(master_password) {
            warn!("export refused: password does not match session");
            return Err(VaultError::validation("invalid password"));
        }

        let plaintext =
            codec::decrypt_entries(&session.entries, &session.fingerprint, &self.options.kdf)?;
        info!(entries = plaintext.len(), "vault exported");
        codec::render_plaintext(&plaintext)
    }

    /// `export_plaintext` straight into a clipboard sink.
    pub fn export_to(&self, master_password: &str, sink: &mut dyn ClipboardSink) -> Result<usize> {
        let payload = self.export_plaintext(master_password)?;
        sink.copy(&payload)?;
        Ok(self.unlocked()?.entries.len())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn options(&self) -> &VaultOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of entries, or zero while locked.
    pub fn entry_count(&self) -> usize {
        self.unlocked.as_ref().map_or(0, |s| s.entries.len())
    }

    /// The last document loaded from or written to the store.
    pub fn document(&self) -> Option<&VaultDocument> {
        self.document.as_ref()
    }

    fn unlocked(&self) -> Result<&Unlocked> {
        self.unlocked.as_ref().ok_or(VaultError::VaultLocked)
    }

    fn unlocked_mut(&mut self) -> Result<&mut Unlocked> {
        self.unlocked.as_mut().ok_or(VaultError::VaultLocked)
    }

    fn entry(&self, index: usize) -> Result<&PasswordEntry> {
        self.unlocked()?
            .entries
            .get(index)
            .ok_or_else(|| VaultError::EntryNotFound(format!("no entry at index {index}")))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut PasswordEntry> {
        self.unlocked_mut()?
            .entries
            .get_mut(index)
            .ok_or_else(|| VaultError::EntryNotFound(format!("no entry at index {index}")))
    }
}
