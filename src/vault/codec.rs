//! Vault document encoding and the batch re-key transform.
//!
//! Two encryption layers are involved:
//!
//! ```text
//! document.content = encrypt(json([entry, ...]), master_password)
//! entry.password   = encrypt(plaintext, fingerprint(master_password))
//! ```
//!
//! Opening a document needs the raw master password once; after that
//! every entry-level operation only needs the fingerprint.  Sealing
//! re-keys every entry from the old fingerprint to the new one and then
//! encrypts the list under the new master password.
//!
//! Batch passes run one task per entry on the rayon pool and collect
//! into a single `Result`, so the first failure fails the whole pass.

use rayon::prelude::*;
use tracing::debug;
use zeroize::Zeroizing;

use super::document::VaultDocument;
use super::entry::{PasswordEntry, PlaintextEntry};
use crate::crypto::{decrypt, encrypt, fingerprint, Fingerprint, KdfParams};
use crate::errors::{Result, VaultError};

/// Output of `seal`: everything needed to commit a save.
///
/// Nothing in here has been persisted yet.
pub struct Sealed {
    /// The new document, ready for the document store.
    pub document: VaultDocument,
    /// Entries re-encrypted under `fingerprint`.
    pub entries: Vec<PasswordEntry>,
    /// Fingerprint of the new master password.
    pub fingerprint: Fingerprint,
}

/// Decrypt a vault document and return its entries and the session
/// fingerprint for `master_password`.
///
/// Entries come back sorted by service (see `sort_entries`).
pub fn open(
    document: &VaultDocument,
    master_password: &str,
    params: &KdfParams,
) -> Result<(Vec<PasswordEntry>, Fingerprint)> {
    let json = decrypt(&document.content, master_password, params)?;
    let mut entries = parse_entries(&json)?;
    sort_entries(&mut entries);

    debug!(entries = entries.len(), "vault document decrypted");
    Ok((entries, fingerprint(master_password)))
}

/// Re-key `entries` to `new_master_password` and encrypt the result.
///
/// All-or-nothing: if any entry fails to decrypt under
/// `old_fingerprint`, no document is produced.
pub fn seal(
    entries: &[PasswordEntry],
    new_master_password: &str,
    old_fingerprint: &Fingerprint,
    params: &KdfParams,
) -> Result<Sealed> {
    let new_fingerprint = fingerprint(new_master_password);
    let rekeyed = rekey_entries(entries, old_fingerprint, &new_fingerprint, params)?;

    let json = Zeroizing::new(
        serde_json::to_string(&rekeyed)
            .map_err(|e| VaultError::EncryptionFailed(format!("entry list: {e}")))?,
    );
    let content = encrypt(&json, new_master_password, params)?;

    debug!(entries = rekeyed.len(), "vault document sealed");
    Ok(Sealed {
        document: VaultDocument::new(content),
        entries: rekeyed,
        fingerprint: new_fingerprint,
    })
}

/// Move every entry password from `old` to `new`.
///
/// Entries without a password pass through untouched.
pub fn rekey_entries(
    entries: &[PasswordEntry],
    old: &Fingerprint,
    new: &Fingerprint,
    params: &KdfParams,
) -> Result<Vec<PasswordEntry>> {
    entries
        .par_iter()
        .map(|entry| {
            if !entry.has_password() {
                return Ok(entry.clone());
            }
            let plaintext = decrypt(&entry.password, old.as_str(), params)?;
            Ok(PasswordEntry {
                password: encrypt(plaintext.as_str(), new.as_str(), params)?,
                ..entry.clone()
            })
        })
        .collect()
}

/// Encrypt plaintext entries under `fingerprint`.
pub fn encrypt_entries(
    entries: &[PlaintextEntry],
    fingerprint: &Fingerprint,
    params: &KdfParams,
) -> Result<Vec<PasswordEntry>> {
    entries
        .par_iter()
        .map(|entry| {
            Ok(PasswordEntry {
                service: entry.service.clone(),
                username: entry.username.clone(),
                password: encrypt(&entry.password, fingerprint.as_str(), params)?,
            })
        })
        .collect()
}

/// Decrypt every entry password under `fingerprint`.
pub fn decrypt_entries(
    entries: &[PasswordEntry],
    fingerprint: &Fingerprint,
    params: &KdfParams,
) -> Result<Vec<PlaintextEntry>> {
    entries
        .par_iter()
        .map(|entry| {
            let password = decrypt(&entry.password, fingerprint.as_str(), params)?;
            Ok(PlaintextEntry::new(&entry.service, &entry.username, &password))
        })
        .collect()
}

/// Stable ascending sort by service, byte-wise.
///
/// Entries with an empty service sort first; equal services keep their
/// relative order.
pub fn sort_entries(entries: &mut [PasswordEntry]) {
    entries.sort_by(|a, b| a.service.cmp(&b.service));
}

/// Parse decrypted document content into entries.
pub fn parse_entries(json: &str) -> Result<Vec<PasswordEntry>> {
    serde_json::from_str(json).map_err(|e| VaultError::MalformedVault(format!("entry list: {e}")))
}

/// Parse an import file: a JSON array of `{service, username, password}`.
pub fn parse_plaintext(json: &str) -> Result<Vec<PlaintextEntry>> {
    serde_json::from_str(json)
        .map_err(|e| VaultError::validation(format!("invalid import file: {e}")))
}

/// Render the pretty-printed export payload.
pub fn render_plaintext(entries: &[PlaintextEntry]) -> Result<Zeroizing<String>> {
    serde_json::to_string_pretty(entries)
        .map(Zeroizing::new)
        .map_err(|e| VaultError::CommandFailed(format!("JSON export: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::MIN_ITERATIONS;

    const FAST: KdfParams = KdfParams {
        iterations: MIN_ITERATIONS,
    };

    fn entry(service: &str) -> PasswordEntry {
        PasswordEntry::new(service, "user")
    }

    #[test]
    fn sort_puts_empty_service_first() {
        let mut entries = vec![entry("b"), entry(""), entry("a")];
        sort_entries(&mut entries);
        let order: Vec<&str> = entries.iter().map(PasswordEntry::service).collect();
        assert_eq!(order, ["", "a", "b"]);
    }

    #[test]
    fn sort_is_case_sensitive_and_stable() {
        let mut first = entry("a");
        first.username = "first".into();
        let mut second = entry("a");
        second.username = "second".into();
        let mut entries = vec![entry("b"), first, entry("B"), second];
        sort_entries(&mut entries);

        let order: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.service(), e.username()))
            .collect();
        assert_eq!(
            order,
            [("B", "user"), ("a", "first"), ("a", "second"), ("b", "user")]
        );
    }

    #[test]
    fn parse_entries_defaults_missing_fields() {
        let entries = parse_entries(r#"[{"username":"alice"}]"#).unwrap();
        assert_eq!(entries[0].service(), "");
        assert_eq!(entries[0].username(), "alice");
        assert!(!entries[0].has_password());
    }

    #[test]
    fn parse_entries_rejects_wrong_shapes() {
        for bad in [
            r#"{"service":"x"}"#,
            r#"[1, 2, 3]"#,
            r#"[{"service": 5}]"#,
            "not json",
        ] {
            assert!(
                matches!(parse_entries(bad), Err(VaultError::MalformedVault(_))),
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn rekey_passes_empty_passwords_through() {
        let old = fingerprint("old");
        let new = fingerprint("new");
        let entries = vec![entry("empty")];
        let rekeyed = rekey_entries(&entries, &old, &new, &FAST).unwrap();
        assert_eq!(rekeyed, entries);
    }

    #[test]
    fn parse_plaintext_is_a_validation_error() {
        assert!(matches!(
            parse_plaintext(r#"{"not":"an array"}"#),
            Err(VaultError::Validation(_))
        ));
    }

    #[test]
    fn render_plaintext_is_pretty_json() {
        let out = render_plaintext(&[PlaintextEntry::new("x", "y", "z")]).unwrap();
        assert!(out.contains('\n'));
        let back = parse_plaintext(&out).unwrap();
        assert_eq!(back, vec![PlaintextEntry::new("x", "y", "z")]);
    }
}
