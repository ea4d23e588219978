//! Config load validation tests for ward-roster-config.
// crates/ward-roster-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tempfile::TempDir;
use ward_roster_config::ConfigError;
use ward_roster_config::RosterConfig;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(RosterConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        RosterConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(RosterConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(RosterConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_reports_missing_explicit_file_as_io() -> TestResult {
    let temp = TempDir::new().map_err(|err| err.to_string())?;
    let missing = temp.path().join("absent.toml");
    match RosterConfig::load_or_default(Some(&missing)) {
        Err(ConfigError::Io(_)) => Ok(()),
        Err(other) => Err(format!("expected io error, got {other}")),
        Ok(_) => Err("missing explicit config should fail".to_string()),
    }
}

#[test]
fn load_reports_malformed_toml_as_parse_error() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[store\npath = 1").map_err(|err| err.to_string())?;
    match RosterConfig::load(Some(file.path())) {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(other) => Err(format!("expected parse error, got {other}")),
        Ok(_) => Err("malformed config should fail".to_string()),
    }
}

#[test]
fn load_reads_valid_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[store]\npath = \"staff.db\"\n\n[directory]\nemployee_number_digits = 6\n")
        .map_err(|err| err.to_string())?;
    let config = RosterConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.directory_settings().employee_number_digits != 6 {
        return Err("employee_number_digits should be read from file".to_string());
    }
    if config.store.path != Path::new("staff.db") {
        return Err("store path should be read from file".to_string());
    }
    Ok(())
}

#[test]
fn load_rejects_unknown_fields() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[directory]\ntable_name = \"staff\"\n").map_err(|err| err.to_string())?;
    match RosterConfig::load(Some(file.path())) {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(other) => Err(format!("expected parse error, got {other}")),
        Ok(_) => Err("unknown fields should be rejected".to_string()),
    }
}
