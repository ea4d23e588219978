// crates/ward-roster-cli/src/lib.rs
// ============================================================================
// Module: Ward Roster CLI Library
// Description: Shared helpers for the `ward-roster` binary.
// Purpose: Expose the localization catalog and the `t!` macro.
// Dependencies: crate::i18n
// ============================================================================

//! ## Overview
//! Library half of the Ward Roster CLI. The binary routes every user-facing
//! string through [`i18n`] so catalogs can be checked in unit tests.
//!
//! Security posture: CLI inputs are untrusted; validation lives in the core
//! services.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;

#[cfg(test)]
mod tests;
