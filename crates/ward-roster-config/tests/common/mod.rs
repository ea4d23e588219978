// crates/ward-roster-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for ward-roster-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use ward_roster_config::ConfigError;
use ward_roster_config::RosterConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `RosterConfig` without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<RosterConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<RosterConfig, toml::de::Error> {
    config_from_toml("")
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
