//! Config defaults tests for ward-roster-config.
// crates/ward-roster-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults Tests
// Description: Validate default behavior of an empty configuration.
// Purpose: Ensure a minimal config is valid and matches the built-in layout.
// =============================================================================

use std::path::PathBuf;

use ward_roster_config::DiagnosticsSink;
use ward_roster_config::RosterConfig;
use ward_roster_config::config_toml_example;
use ward_roster_core::AccessLevel;
use ward_roster_core::DirectorySettings;
use ward_roster_core::PageRegistry;
use ward_roster_store_sqlite::SqliteStoreMode;
use ward_roster_store_sqlite::SqliteSyncMode;

mod common;

use common::TestResult;

#[test]
fn default_config_validates() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn default_store_points_at_directory_database() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    if config.store.path != PathBuf::from("doctor_info.db") {
        return Err(format!("unexpected store path {}", config.store.path.display()));
    }
    if config.store.busy_timeout_ms != 5_000
        || config.store.journal_mode != SqliteStoreMode::Wal
        || config.store.sync_mode != SqliteSyncMode::Full
    {
        return Err("store pragmas should default to wal/full/5000".to_string());
    }
    Ok(())
}

#[test]
fn default_directory_settings_match_core_defaults() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    if config.directory_settings() != DirectorySettings::default() {
        return Err("directory settings should match core defaults".to_string());
    }
    if config.diagnostics.sink != DiagnosticsSink::Stderr {
        return Err("diagnostics should default to stderr".to_string());
    }
    Ok(())
}

#[test]
fn default_pages_match_builtin_registry() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    if config.page_registry() != PageRegistry::default() {
        return Err("pages should default to the built-in registry".to_string());
    }
    Ok(())
}

#[test]
fn page_count_follows_configured_pages() -> TestResult {
    let config = RosterConfig::from_toml(
        r#"
[[pages]]
name = "Roster"
file = "pages/roster.toml"

[[pages]]
name = "Audit"
file = "pages/audit.toml"
access = "page_admin"
enabled = false
"#,
    )
    .map_err(|err| err.to_string())?;
    if config.directory_settings().page_count != 2 {
        return Err("page_count should equal the number of pages".to_string());
    }
    let registry = config.page_registry();
    let audit = registry.page(2).ok_or("missing page 2")?;
    if audit.access != AccessLevel::PageAdmin || audit.enabled {
        return Err("page fields should round through the config".to_string());
    }
    let roster = registry.page(1).ok_or("missing page 1")?;
    if roster.access != AccessLevel::Authenticated || !roster.enabled || roster.template.is_some()
    {
        return Err("page defaults should apply".to_string());
    }
    Ok(())
}

#[test]
fn canonical_example_parses_to_defaults() -> TestResult {
    let example =
        RosterConfig::from_toml(&config_toml_example()).map_err(|err| err.to_string())?;
    let defaults = RosterConfig::default();
    if example.store != defaults.store
        || example.directory != defaults.directory
        || example.diagnostics != defaults.diagnostics
        || example.pages != defaults.pages
    {
        return Err("canonical example should spell out the defaults".to_string());
    }
    Ok(())
}
