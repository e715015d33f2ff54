//! Audit log: SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, set, delete,
//! rotate-key, export, ...) in a local SQLite database at
//! `<vault_dir>/audit.db`.  Only service names and counts are recorded,
//! never passwords.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.  Builds
//! without the `audit-log` feature skip it entirely.

use std::path::Path;
#[cfg(feature = "audit-log")]
use std::path::PathBuf;

use chrono::{DateTime, Utc};

#[cfg(feature = "audit-log")]
use rusqlite::Connection;

#[cfg(feature = "audit-log")]
use crate::errors::{Result, VaultError};

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub document: String,
    pub service: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
#[cfg(feature = "audit-log")]
pub struct AuditLog {
    conn: Connection,
}

#[cfg(feature = "audit-log")]
impl AuditLog {
    /// Open (or create) the audit database at `<vault_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened; callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(vault_dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(vault_dir);
        let conn = Connection::open(&db_path).ok()?;

        // Set restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                document    TEXT NOT NULL,
                service     TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget: errors are silently ignored.
    pub fn log(
        &self,
        operation: &str,
        document: &str,
        service: Option<&str>,
        details: Option<&str>,
    ) {
        let now = Utc::now().to_rfc3339();
        if let Err(e) = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, document, service, details)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![now, operation, document, service, details],
        ) {
            tracing::debug!(error = %e, "audit insert failed");
        }
    }

    /// Query recent audit entries, most recent first.
    ///
    /// - `limit`: maximum number of entries to return.
    /// - `since`: if provided, only return entries newer than this timestamp.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let since_str = since.map(|ts| ts.to_rfc3339());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, document, service, details
                 FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(|e| VaultError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params![since_str, limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    document: row.get(3)?,
                    service: row.get(4)?,
                    details: row.get(5)?,
                })
            })
            .map_err(|e| VaultError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| VaultError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Return the path to the audit database (for testing/display).
    pub fn db_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join("audit.db")
    }
}

/// Log an audit event for the vault document in `vault_dir`.
///
/// Opens the audit database, logs the event, and silently ignores any
/// errors.  Safe to call from any command; it never fails the caller.
pub fn log_audit(vault_dir: &Path, op: &str, service: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    if let Some(audit) = AuditLog::open(vault_dir) {
        audit.log(op, crate::vault::VAULT_DOCUMENT_ID, service, details);
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault_dir, op, service, details);
}

#[cfg(all(test, feature = "audit-log"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_database() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path());
        assert!(audit.is_some(), "should open successfully");
        assert!(dir.path().join("audit.db").exists());
    }

    #[test]
    fn log_and_query_roundtrip() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        audit.log("add", "password-vault", Some("github"), None);
        audit.log("set", "password-vault", Some("github"), Some("generated"));
        audit.log("delete", "password-vault", Some("gitlab"), None);

        let entries = audit.query(10, None).unwrap();
        assert_eq!(entries.len(), 3);

        // Most recent first.
        assert_eq!(entries[0].operation, "delete");
        assert_eq!(entries[1].operation, "set");
        assert_eq!(entries[2].operation, "add");
    }

    #[test]
    fn query_with_limit() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        for i in 0..10 {
            audit.log("add", "password-vault", Some(&format!("svc-{i}")), None);
        }

        let entries = audit.query(3, None).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn query_with_since_filter() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        audit.log("export", "password-vault", None, Some("2 entries"));

        let past = Utc::now() - chrono::Duration::hours(1);
        assert_eq!(audit.query(10, Some(past)).unwrap().len(), 1);

        let future = Utc::now() + chrono::Duration::hours(1);
        assert!(audit.query(10, Some(future)).unwrap().is_empty());
    }

    #[test]
    fn log_records_document_and_details() {
        let dir = TempDir::new().unwrap();
        log_audit(dir.path(), "init", None, Some("vault created"));

        let audit = AuditLog::open(dir.path()).unwrap();
        let entries = audit.query(1, None).unwrap();
        assert_eq!(entries[0].document, "password-vault");
        assert_eq!(entries[0].operation, "init");
        assert!(entries[0].service.is_none());
        assert_eq!(entries[0].details.as_deref(), Some("vault created"));
    }

    #[test]
    fn open_returns_none_on_bad_path() {
        let result = AuditLog::open(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn audit_db_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let _audit = AuditLog::open(dir.path()).unwrap();

        let perms = std::fs::metadata(AuditLog::db_path(dir.path()))
            .unwrap()
            .permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
