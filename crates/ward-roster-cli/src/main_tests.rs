// crates/ward-roster-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for rendering and locale helpers in the entry point.
// Purpose: Pin number padding, redaction, and locale resolution behavior.
// Dependencies: ward-roster-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the pure helpers behind the `ward-roster` binary.

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

use clap::CommandFactory;
use ward_roster_core::Record;
use ward_roster_core::Value;

use super::Cli;
use super::LangArg;
use super::Locale;
use super::REDACTED;
use super::format_employee_number;
use super::record_line;
use super::redact;
use super::resolve_locale;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn employee_numbers_are_zero_padded() {
    assert_eq!(format_employee_number(42, 5), "00042");
    assert_eq!(format_employee_number(12345, 5), "12345");
    assert_eq!(format_employee_number(7, 0), "7");
}

#[test]
fn resolve_locale_prefers_flag_over_env() {
    let locale = resolve_locale(Some(LangArg::En), Some("zh")).unwrap();
    assert_eq!(locale, Locale::En);
    let locale = resolve_locale(Some(LangArg::Zh), None).unwrap();
    assert_eq!(locale, Locale::Zh);
}

#[test]
fn resolve_locale_reads_env_and_defaults_to_english() {
    assert_eq!(resolve_locale(None, Some("zh-CN")).unwrap(), Locale::Zh);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_value() {
    let err = resolve_locale(None, Some("klingon")).unwrap_err();
    assert!(err.to_string().contains("klingon"));
}

#[test]
fn redact_masks_password_only() {
    let row: Record = [
        ("id".to_string(), Value::from(1)),
        ("name".to_string(), Value::from("Ada")),
        ("password".to_string(), Value::from("123456")),
    ]
    .into_iter()
    .collect();
    let masked = redact(row);
    assert_eq!(masked.get_text("password").as_deref(), Some(REDACTED));
    assert_eq!(masked.get_text("name").as_deref(), Some("Ada"));

    let without: Record = [("id".to_string(), Value::from(2))].into_iter().collect();
    assert!(!redact(without).contains("password"));
}

#[test]
fn record_line_renders_null_and_values() {
    let row: Record = [
        ("a".to_string(), Value::from(1)),
        ("b".to_string(), Value::Null),
        ("c".to_string(), Value::from("x")),
    ]
    .into_iter()
    .collect();
    assert_eq!(record_line(&row), "a=1  b=NULL  c=x");
}
