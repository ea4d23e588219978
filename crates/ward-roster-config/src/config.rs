// crates/ward-roster-config/src/config.rs
// ============================================================================
// Module: Ward Roster Configuration
// Description: Configuration loading and validation for Ward Roster.
// Purpose: Provide strict, fail-closed config parsing with safe defaults.
// Dependencies: serde, toml, ward-roster-core, ward-roster-store-sqlite
// ============================================================================

//! ## Overview
//! Loads `ward-roster.toml` from an explicit path, the `WARD_ROSTER_CONFIG`
//! environment variable, or the working directory, in that order. Loading
//! enforces path and size limits, requires UTF-8, and validates every section
//! before a config is handed out. A missing section falls back to its
//! defaults; an invalid one rejects the whole file.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use ward_roster_core::ColumnName;
use ward_roster_core::DirectorySettings;
use ward_roster_core::PENDING_STATE;
use ward_roster_core::PageDescriptor;
use ward_roster_core::PageRegistry;
use ward_roster_core::TableName;
use ward_roster_core::default_pages;
use ward_roster_core::runtime::DEFAULT_EMPLOYEE_NUMBER_DIGITS;
use ward_roster_store_sqlite::FileDiagnostics;
use ward_roster_store_sqlite::NoopDiagnostics;
use ward_roster_store_sqlite::SqliteStoreConfig;
use ward_roster_store_sqlite::StderrDiagnostics;
use ward_roster_store_sqlite::StoreDiagnostics;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Default config file name.
const DEFAULT_CONFIG_NAME: &str = "ward-roster.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "WARD_ROSTER_CONFIG";
/// Default database file name.
pub(crate) const DEFAULT_STORE_PATH: &str = "doctor_info.db";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum store busy timeout in milliseconds.
pub(crate) const MAX_BUSY_TIMEOUT_MS: u64 = 60_000;
/// Maximum employee number width (fits a signed 64-bit column).
pub(crate) const MAX_EMPLOYEE_NUMBER_DIGITS: usize = 18;
/// Maximum number of pages (permission states are stored as signed 64-bit).
pub(crate) const MAX_PAGES: usize = 63;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Ward Roster configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    /// Record store configuration.
    #[serde(default = "default_store")]
    pub store: SqliteStoreConfig,
    /// Staff directory configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Store diagnostics configuration.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Page registry, in permission-bit order.
    #[serde(default = "default_pages")]
    pub pages: Vec<PageDescriptor>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            directory: DirectoryConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            pages: default_pages(),
        }
    }
}

impl RosterConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Loads configuration, falling back to defaults when no file exists at
    /// the resolved location.
    ///
    /// An explicit `path` that does not exist is still an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing file is invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none() {
            let resolved = resolve_path(None)?;
            if !resolved.exists() {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
        }
        Self::load(path)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values that fail validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_store(&self.store)?;
        self.directory.validate()?;
        self.diagnostics.validate()?;
        validate_pages(&self.pages)
    }

    /// Returns the page registry described by `[[pages]]`.
    #[must_use]
    pub fn page_registry(&self) -> PageRegistry {
        PageRegistry::new(self.pages.clone())
    }

    /// Returns directory settings sized to the configured page registry.
    #[must_use]
    pub fn directory_settings(&self) -> DirectorySettings {
        DirectorySettings {
            table: self.directory.table.clone(),
            id_column: self.directory.id_column.clone(),
            employee_number_digits: self.directory.employee_number_digits,
            pending_threshold: self.directory.pending_threshold,
            page_count: self.pages.len(),
        }
    }
}

/// Staff directory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Staff table name.
    #[serde(default = "TableName::default_directory")]
    pub table: TableName,
    /// Identifier column of the staff table.
    #[serde(default = "ColumnName::default_id")]
    pub id_column: ColumnName,
    /// Exact employee number width.
    #[serde(default = "default_employee_number_digits")]
    pub employee_number_digits: usize,
    /// States at or below this value are awaiting admission.
    #[serde(default = "default_pending_threshold")]
    pub pending_threshold: i64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            table: TableName::default_directory(),
            id_column: ColumnName::default_id(),
            employee_number_digits: DEFAULT_EMPLOYEE_NUMBER_DIGITS,
            pending_threshold: PENDING_STATE,
        }
    }
}

impl DirectoryConfig {
    /// Validates directory settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.employee_number_digits == 0
            || self.employee_number_digits > MAX_EMPLOYEE_NUMBER_DIGITS
        {
            return Err(ConfigError::Invalid(format!(
                "directory.employee_number_digits must be between 1 and \
                 {MAX_EMPLOYEE_NUMBER_DIGITS}"
            )));
        }
        if self.pending_threshold >= 0 {
            return Err(ConfigError::Invalid(
                "directory.pending_threshold must be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Diagnostic sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsSink {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard diagnostics.
    #[serde(rename = "none")]
    Disabled,
}

/// Store diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: DiagnosticsSink,
    /// Output path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DiagnosticsConfig {
    /// Validates the sink selection.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (DiagnosticsSink::File, None) => Err(ConfigError::Invalid(
                "diagnostics.path is required when diagnostics.sink = \"file\"".to_string(),
            )),
            (DiagnosticsSink::File, Some(path)) => {
                validate_path_string("diagnostics.path", &path.to_string_lossy())
            }
            (_, Some(_)) => Err(ConfigError::Invalid(
                "diagnostics.path is only valid with diagnostics.sink = \"file\"".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }

    /// Builds the configured diagnostic sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file sink cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn StoreDiagnostics>, ConfigError> {
        match (self.sink, &self.path) {
            (DiagnosticsSink::Stderr, _) => Ok(Arc::new(StderrDiagnostics)),
            (DiagnosticsSink::Disabled, _) => Ok(Arc::new(NoopDiagnostics)),
            (DiagnosticsSink::File, Some(path)) => {
                let sink =
                    FileDiagnostics::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (DiagnosticsSink::File, None) => Err(ConfigError::Invalid(
                "diagnostics.path is required when diagnostics.sink = \"file\"".to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the default store configuration.
fn default_store() -> SqliteStoreConfig {
    SqliteStoreConfig::new(DEFAULT_STORE_PATH)
}

/// Returns the default employee number width.
const fn default_employee_number_digits() -> usize {
    DEFAULT_EMPLOYEE_NUMBER_DIGITS
}

/// Returns the default pending threshold.
const fn default_pending_threshold() -> i64 {
    PENDING_STATE
}

/// Resolves the config path from an explicit path, env var, or default.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if Path::new(trimmed)
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH)
    {
        return Err(ConfigError::Invalid(format!("{field} component too long")));
    }
    Ok(())
}

/// Validates the store section.
fn validate_store(store: &SqliteStoreConfig) -> Result<(), ConfigError> {
    validate_path_string("store.path", &store.path.to_string_lossy())?;
    if store.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(ConfigError::Invalid(format!(
            "store.busy_timeout_ms must be at most {MAX_BUSY_TIMEOUT_MS}"
        )));
    }
    Ok(())
}

/// Validates the page registry entries.
fn validate_pages(pages: &[PageDescriptor]) -> Result<(), ConfigError> {
    if pages.is_empty() {
        return Err(ConfigError::Invalid("pages must not be empty".to_string()));
    }
    if pages.len() > MAX_PAGES {
        return Err(ConfigError::Invalid(format!("pages must not exceed {MAX_PAGES} entries")));
    }
    let mut names = BTreeSet::new();
    for (offset, page) in pages.iter().enumerate() {
        let index = offset + 1;
        if page.name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("pages[{index}].name must be non-empty")));
        }
        if page.file.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("pages[{index}].file must be non-empty")));
        }
        if !names.insert(page.name.as_str()) {
            return Err(ConfigError::Invalid(format!("duplicate page name: {}", page.name)));
        }
    }
    Ok(())
}
