// crates/ward-roster-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and the `t!` macro.
// Purpose: Ensure CLI strings route through stable i18n helpers.
// Dependencies: ward-roster-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates message arguments, key fallback, and macro formatting.

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

use ward_roster_cli::i18n::MessageArg;
use ward_roster_cli::i18n::translate;
use ward_roster_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("id", "7");
    assert_eq!(arg.key, "id");
    assert_eq!(arg.value, "7");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let result = translate("admission.approve.ok", vec![MessageArg::new("id", "7")]);
    assert_eq!(result, "Admitted record 7.");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

/// Confirms the t! macro formats named arguments of any displayable type.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("directory.bit_width", expected = 5, found = 3_usize);
    assert_eq!(rendered, "Permission vector must have 5 bits, got 3.");
    let version = t!("main.version", version = "0.1.0");
    assert_eq!(version, "ward-roster 0.1.0");
}
