//! Integration tests for the pwvault CLI.
//!
//! These tests run the binary end-to-end using `assert_cmd`.  The master
//! password comes from `PWVAULT_PASSWORD` and entry passwords are piped
//! on stdin, so nothing prompts.  Each test writes a `.pwvault.toml`
//! with the lowest accepted PBKDF2 iteration count to keep runs short.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "masterpw-123";

/// Helper: get a Command pointing at the pwvault binary.
fn pwvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("pwvault").expect("binary should exist")
}

/// A temp project dir with fast KDF settings.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml")
        .write_str("pbkdf2_iterations = 100000\n")
        .unwrap();
    tmp
}

/// pwvault in `dir`, with the master password in the environment.
fn pwvault_in(dir: &TempDir) -> Command {
    let mut cmd = pwvault();
    cmd.current_dir(dir.path())
        .env("PWVAULT_PASSWORD", MASTER)
        .env_remove("PWVAULT_LOG");
    cmd
}

/// A project with an initialized vault holding github/alice.
fn project_with_entry() -> TempDir {
    let tmp = project();
    pwvault_in(&tmp).arg("init").assert().success();
    pwvault_in(&tmp)
        .args(["add", "github", "alice"])
        .write_stdin("gh-secret\n")
        .assert()
        .success();
    tmp
}

// ---------------------------------------------------------------------------
// Basics
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    pwvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Client-side encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("rotate-key"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn version_flag_shows_version() {
    pwvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

#[test]
fn no_args_shows_help() {
    pwvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = project();
    pwvault_in(&tmp)
        .args(["generate", "--length", "32"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-HJ-NP-Za-km-z2-9]{32}\n$").unwrap());
}

#[test]
fn generate_uses_configured_default_length() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml")
        .write_str("password_length = 24\n")
        .unwrap();
    pwvault()
        .current_dir(tmp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\S{24}\n$").unwrap());
}

#[test]
fn generate_rejects_zero_length() {
    pwvault()
        .args(["generate", "-l", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password length"));
}

#[test]
fn completions_name_the_binary() {
    pwvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

// ---------------------------------------------------------------------------
// Vault lifecycle
// ---------------------------------------------------------------------------

#[test]
fn commands_without_vault_point_to_init() {
    let tmp = project();
    pwvault_in(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pwvault init"));
}

#[test]
fn init_creates_vault_document_once() {
    let tmp = project();
    pwvault_in(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));

    tmp.child(".pwvault/password-vault.json")
        .assert(predicate::path::exists());

    pwvault_in(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_password() {
    let tmp = project();
    pwvault()
        .current_dir(tmp.path())
        .env("PWVAULT_PASSWORD", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
    tmp.child(".pwvault").assert(predicate::path::missing());
}

#[test]
fn vault_dir_flag_overrides_settings() {
    let tmp = project();
    pwvault_in(&tmp)
        .args(["init", "--vault-dir", "elsewhere"])
        .assert()
        .success();
    tmp.child("elsewhere/password-vault.json")
        .assert(predicate::path::exists());
}

#[test]
fn add_then_get_reveals_password() {
    let tmp = project_with_entry();

    pwvault_in(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("gh-secret\n");

    // Plaintext never reaches disk.
    tmp.child(".pwvault/password-vault.json")
        .assert(predicate::str::contains("gh-secret").not());
}

#[test]
fn piped_password_keeps_trailing_spaces() {
    let tmp = project();
    pwvault_in(&tmp).arg("init").assert().success();
    pwvault_in(&tmp)
        .args(["add", "svc", "u"])
        .write_stdin("pass  \n")
        .assert()
        .success();

    pwvault_in(&tmp)
        .args(["get", "svc"])
        .assert()
        .success()
        .stdout("pass  \n");
}

#[test]
fn audit_rejects_out_of_range_since() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .args(["audit", "--since", "99999999999999d"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn get_with_wrong_master_password_fails() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .env("PWVAULT_PASSWORD", "not-the-password")
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));
}

#[test]
fn duplicate_add_is_rejected() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .args(["add", "github", "alice"])
        .write_stdin("other\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn list_filters_by_service() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .args(["add", "mail", "bob", "--generate"])
        .assert()
        .success();

    pwvault_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("mail"))
        .stdout(predicate::str::contains("gh-secret").not());

    pwvault_in(&tmp)
        .args(["list", "git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("mail").not());
}

#[test]
fn set_edit_and_delete_entry() {
    let tmp = project_with_entry();

    pwvault_in(&tmp)
        .args(["set", "github"])
        .write_stdin("new-secret\n")
        .assert()
        .success();

    pwvault_in(&tmp)
        .args(["edit", "github", "--new-username", "alice2"])
        .assert()
        .success();

    pwvault_in(&tmp)
        .args(["get", "github", "-u", "alice2"])
        .assert()
        .success()
        .stdout("new-secret\n");

    pwvault_in(&tmp)
        .args(["delete", "github", "--force"])
        .assert()
        .success();

    pwvault_in(&tmp)
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn export_stdout_prints_plaintext_json() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .args(["export", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""service": "github""#))
        .stdout(predicate::str::contains(r#""password": "gh-secret""#));
}

#[test]
fn import_replaces_entries() {
    let tmp = project_with_entry();
    tmp.child("import.json")
        .write_str(
            r#"[
                {"service": "zeta", "username": "z", "password": "z"},
                {"service": "alpha", "username": "a", "password": "a"}
            ]"#,
        )
        .unwrap();

    pwvault_in(&tmp)
        .args(["import", "import.json", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 entries"));

    pwvault_in(&tmp)
        .args(["get", "zeta"])
        .assert()
        .success()
        .stdout("z\n");
    pwvault_in(&tmp).args(["get", "github"]).assert().failure();
}

#[test]
fn import_rejects_malformed_file() {
    let tmp = project_with_entry();
    tmp.child("bad.json").write_str("{ not json").unwrap();

    pwvault_in(&tmp)
        .args(["import", "bad.json", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid import file"));

    pwvault_in(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("gh-secret\n");
}

#[test]
fn rotate_key_keeps_entries_readable() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .arg("rotate-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries re-encrypted"));

    pwvault_in(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("gh-secret\n");
}

#[cfg(feature = "audit-log")]
#[test]
fn audit_lists_operations() {
    let tmp = project_with_entry();
    pwvault_in(&tmp)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("github"));
}
