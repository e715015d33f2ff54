//! Directory-backed document store.
//!
//! Each document is a JSON file `<dir>/<id>.json`.  Writes go to a
//! temp file in the same directory which is then renamed over the
//! target, so readers never see a half-written document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::DocumentStore;
use crate::errors::{Result, VaultError};
use crate::vault::VaultDocument;

/// Stores documents as individual JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    /// Use `dir` as the document directory.  It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The document directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding document `id`.
    pub fn document_path(&self, id: &str) -> Result<PathBuf> {
        validate_document_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl DocumentStore for FileDocumentStore {
    fn get(&self, id: &str) -> Result<Option<VaultDocument>> {
        let path = self.document_path(id)?;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(VaultError::Persistence(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        let document: VaultDocument = serde_json::from_str(&contents).map_err(|e| {
            VaultError::Persistence(format!("corrupt document {}: {e}", path.display()))
        })?;
        if document.id != id {
            return Err(VaultError::Persistence(format!(
                "document {} has id '{}', expected '{id}'",
                path.display(),
                document.id
            )));
        }

        debug!(path = %path.display(), "document read");
        Ok(Some(document))
    }

    fn put(&mut self, document: &VaultDocument) -> Result<()> {
        let path = self.document_path(&document.id)?;
        let persistence = |e: std::io::Error| {
            VaultError::Persistence(format!("failed to write {}: {e}", path.display()))
        };

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| VaultError::Persistence(format!("serialize document: {e}")))?;

        fs::create_dir_all(&self.dir).map_err(persistence)?;

        // Atomic write: temp file in the same directory, then rename.
        let tmp_path = self.dir.join(format!(".{}.json.tmp", document.id));
        if let Err(e) = write_then_rename(&tmp_path, &path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(persistence(e));
        }

        debug!(path = %path.display(), "document written");
        Ok(())
    }
}

/// Write `bytes` to `tmp_path` (owner-only on Unix) and move it to `path`.
fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(tmp_path, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(tmp_path, path)
}

/// Document ids become file names, so keep them to a safe character set.
fn validate_document_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 128 {
        return Err(VaultError::Persistence(
            "document id must be 1 to 128 characters".into(),
        ));
    }
    if !id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
        || id.starts_with('.')
    {
        return Err(VaultError::Persistence(format!(
            "document id '{id}' contains invalid characters"
        )));
    }
    Ok(())
}
