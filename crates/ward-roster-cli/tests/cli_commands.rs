// crates/ward-roster-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the `ward-roster` binary.
// Purpose: Exercise enrollment, admission, admin rights, and inspection end to end.
// Dependencies: ward-roster-cli binary, tempfile, serde_json, toml
// ============================================================================

//! ## Overview
//! Spawns the `ward-roster` binary against a throwaway config and store and
//! checks exit status plus stdout/stderr for each workflow.
//!
//! Security posture: stored passwords must never appear in command output.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn ward_roster_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ward-roster"))
}

/// Test fixture holding a temp directory with a config pointing inside it.
struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = dir.path().join("ward-roster.toml");
        let store = dir.path().join("roster.db");
        let body = format!(
            "[store]\npath = {store:?}\n\n[diagnostics]\nsink = \"none\"\n",
            store = store.display().to_string()
        );
        fs::write(&config, body).expect("write config");
        Self {
            dir,
            config,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(ward_roster_bin())
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .env_remove("WARD_ROSTER_LANG")
            .env_remove("WARD_ROSTER_CONFIG")
            .current_dir(self.dir.path())
            .output()
            .expect("run ward-roster")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run_ok(&full);
        serde_json::from_str(&stdout).expect("json output")
    }

    fn enroll(&self, name: &str, number: &str, password: &str) {
        self.run_ok(&[
            "enroll",
            "--name",
            name,
            "--number",
            number,
            "--section",
            "Cardiology",
            "--password",
            password,
            "--confirm-password",
            password,
        ]);
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_file(path: &Path, body: &str) {
    fs::write(path, body).expect("write file");
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

#[test]
fn config_validate_accepts_fixture() {
    let fixture = Fixture::new();
    let stdout = fixture.run_ok(&["config", "validate"]);
    assert!(stdout.contains("Config valid."));
    assert!(stdout.contains("pages=5"));
}

#[test]
fn config_validate_rejects_unknown_fields() {
    let fixture = Fixture::new();
    let bad = fixture.dir.path().join("bad.toml");
    write_file(&bad, "[store]\npath = \"x.db\"\nbogus = 1\n");
    let output = Command::new(ward_roster_bin())
        .args(["--config", bad.to_str().expect("utf8 path"), "config", "validate"])
        .output()
        .expect("run ward-roster");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Failed to load config"));
}

#[test]
fn config_validate_requires_existing_file() {
    let fixture = Fixture::new();
    let missing = fixture.dir.path().join("missing.toml");
    let output = Command::new(ward_roster_bin())
        .args(["--config", missing.to_str().expect("utf8 path"), "config", "validate"])
        .output()
        .expect("run ward-roster");
    assert!(!output.status.success());
}

#[test]
fn config_example_is_valid_toml() {
    let fixture = Fixture::new();
    let stdout = fixture.run_ok(&["config", "example"]);
    let parsed: toml::Table = toml::from_str(&stdout).expect("example parses");
    assert!(parsed.contains_key("store"));
    assert!(parsed.contains_key("directory"));
    assert!(parsed.contains_key("pages"));
}

// ============================================================================
// SECTION: Directory Workflow
// ============================================================================

#[test]
fn enrollment_admission_and_admin_flow() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");

    let session = fixture.run_json(&["login", "--number", "00042", "--password", "1234"]);
    assert_eq!(session["name"], "Ada");
    assert_eq!(session["permissions"]["status"], "pending");

    let pending = fixture.run_json(&["admission", "list"]);
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
    let id = pending[0]["id"].as_i64().expect("record id");

    let outcomes = fixture.run_json(&["admission", "approve", &id.to_string()]);
    assert_eq!(outcomes[0]["succeeded"], true);

    let text = fixture.run_ok(&["login", "--number", "00042", "--password", "1234"]);
    assert!(text.contains("Signed in as Ada (number 00042"));
    assert!(text.contains("Admin bits: 00000"));

    let view = fixture.run_json(&[
        "admin", "set", "--number", "00042", "--page", "5", "--admin", "true",
    ]);
    assert_eq!(view["state"]["bits"], "00001");

    let pages = fixture.run_json(&["pages", "list", "--number", "00042", "--password", "1234"]);
    let pages = pages.as_array().expect("page list");
    assert_eq!(pages.len(), 5);
    assert!(pages.iter().all(|page| page["visible"] == true));
    assert_eq!(pages[4]["admin"], true);
}

#[test]
fn signed_out_pages_are_hidden() {
    let fixture = Fixture::new();
    let pages = fixture.run_json(&["pages", "list"]);
    let pages = pages.as_array().expect("page list");
    assert!(pages.iter().all(|page| page["visible"] == false));
}

#[test]
fn fresh_store_has_no_pending_requests() {
    let fixture = Fixture::new();
    let stdout = fixture.run_ok(&["admission", "list"]);
    assert!(stdout.contains("No enrollment requests are awaiting admission."));
    let rows = fixture.run_json(&["records", "dump", "doctor_info"]);
    assert_eq!(rows.as_array().map(Vec::len), Some(0));
}

#[test]
fn pages_list_requires_both_credentials() {
    let fixture = Fixture::new();
    let output = fixture.run(&["pages", "list", "--number", "00042"]);
    assert!(!output.status.success());
}

#[test]
fn duplicate_enrollment_is_rejected() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    let output = fixture.run(&[
        "enroll",
        "--name",
        "Grace",
        "--number",
        "00042",
        "--section",
        "Oncology",
        "--password",
        "5678",
        "--confirm-password",
        "5678",
    ]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("already registered"));
}

#[test]
fn wrong_password_fails_closed() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    let output = fixture.run(&["login", "--number", "00042", "--password", "9999"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Wrong password."));
}

#[test]
fn rejection_deletes_request_and_reports_missing_ids() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    let pending = fixture.run_json(&["admission", "list"]);
    let id = pending[0]["id"].as_i64().expect("record id").to_string();

    fixture.run_ok(&["admission", "reject", &id]);
    let stdout = fixture.run_ok(&["admission", "list"]);
    assert!(stdout.contains("No enrollment requests"));

    let output = fixture.run(&["admission", "reject", &id]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(&format!("Record {id} failed")));
}

#[test]
fn profile_update_keeps_unchanged_fields() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    fixture.run_ok(&[
        "profile",
        "update",
        "--number",
        "00042",
        "--password",
        "1234",
        "--section",
        "Neurology",
        "--new-password",
        "4321",
        "--confirm-password",
        "4321",
    ]);
    let session = fixture.run_json(&["login", "--number", "00042", "--password", "4321"]);
    assert_eq!(session["name"], "Ada");
    assert_eq!(session["section"], "Neurology");
    assert_eq!(session["number"], 42);
}

#[test]
fn lookup_reports_matches_and_misses() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    let found = fixture.run_json(&["lookup", "--name", "Ada"]);
    assert_eq!(found[0]["number"], 42);
    let stdout = fixture.run_ok(&["lookup", "--name", "Nobody"]);
    assert!(stdout.contains("No staff named Nobody."));
}

// ============================================================================
// SECTION: Utilities
// ============================================================================

#[test]
fn convert_between_bases() {
    let fixture = Fixture::new();
    assert_eq!(fixture.run_ok(&["convert", "255", "--from", "10", "--to", "16"]).trim(), "FF");
    assert_eq!(
        fixture.run_ok(&["convert", "5", "--from", "10", "--to", "2", "--width", "8"]).trim(),
        "00000101"
    );
    let output = fixture.run(&["convert", "12", "--from", "10", "--to", "37"]);
    assert!(!output.status.success());
}

#[test]
fn records_dump_redacts_passwords() {
    let fixture = Fixture::new();
    fixture.enroll("Ada", "00042", "1234");
    let rows = fixture.run_json(&["records", "dump", "doctor_info"]);
    let rows = rows.as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ada");
    assert_ne!(rows[0]["password"], "1234");

    let latest = fixture.run_ok(&["records", "latest", "doctor_info"]);
    assert!(latest.contains("name=Ada"));
    assert!(!latest.contains("1234"));
}

#[test]
fn records_rejects_unsafe_table_names() {
    let fixture = Fixture::new();
    let output = fixture.run(&["records", "dump", "users; DROP TABLE x"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Invalid table name"));
}

#[test]
fn chinese_locale_localizes_messages() {
    let fixture = Fixture::new();
    let output = fixture.run(&["--lang", "zh", "config", "validate"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("配置有效"));
    assert!(stderr_of(&output).contains("机器翻译"));
}
