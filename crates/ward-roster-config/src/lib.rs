// crates/ward-roster-config/src/lib.rs
// ============================================================================
// Module: Ward Roster Config Library
// Description: Configuration model, validation, and example generation.
// Purpose: Single source of truth for ward-roster.toml semantics.
// Dependencies: ward-roster-core, ward-roster-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `ward-roster-config` defines the configuration model for Ward Roster: the
//! `SQLite` store, the staff directory layout, the diagnostic sink, and the
//! page registry that fixes the permission vector width. Validation is strict
//! and fail-closed.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
