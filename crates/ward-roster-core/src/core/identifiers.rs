// crates/ward-roster-core/src/core/identifiers.rs
// ============================================================================
// Module: Ward Roster Identifiers
// Description: Validated table/column names and record identifiers.
// Purpose: Guarantee that only safe identifiers reach SQL statement text.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Table and column names cannot be bound as statement parameters, so they are
//! interpolated into SQL text. [`TableName`] and [`ColumnName`] can only be
//! constructed through [`is_valid_identifier`], which makes the check the sole
//! gate in front of every interpolation. Values are always bound separately.
//!
//! Security posture: identifier inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Column name used for record identifiers unless a caller overrides it.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Table holding staff records unless configuration overrides it.
pub const DEFAULT_DIRECTORY_TABLE: &str = "doctor_info";

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Returns true when `name` is safe to interpolate as a table or column name.
///
/// A valid identifier is non-empty, at most [`MAX_IDENTIFIER_LENGTH`] bytes,
/// made only of letters, digits, and underscores, contains at least one
/// letter or digit, and does not start with a digit.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }
    let mut chars = name.chars();
    if chars.next().is_some_and(char::is_numeric) {
        return false;
    }
    let mut has_alphanumeric = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            has_alphanumeric = true;
        } else if ch != '_' {
            return false;
        }
    }
    has_alphanumeric
}

/// Identifier validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Table name failed validation.
    #[error("invalid table name: {0}")]
    Table(String),
    /// Column name failed validation.
    #[error("invalid column name: {0}")]
    Column(String),
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Validated table name.
///
/// # Invariants
/// - Always satisfies [`is_valid_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Validates and wraps a table name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Table`] when the name is not a safe identifier.
    pub fn parse(name: &str) -> Result<Self, IdentifierError> {
        if is_valid_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(IdentifierError::Table(name.to_string()))
        }
    }

    /// Returns the default staff directory table (`doctor_info`).
    #[must_use]
    pub fn default_directory() -> Self {
        Self(DEFAULT_DIRECTORY_TABLE.to_string())
    }

    /// Returns the table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableName {
    type Err = IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for TableName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated column name.
///
/// # Invariants
/// - Always satisfies [`is_valid_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    /// Validates and wraps a column name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Column`] when the name is not a safe identifier.
    pub fn parse(name: &str) -> Result<Self, IdentifierError> {
        if is_valid_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(IdentifierError::Column(name.to_string()))
        }
    }

    /// Returns the default identifier column (`id`).
    #[must_use]
    pub fn default_id() -> Self {
        Self(DEFAULT_ID_COLUMN.to_string())
    }

    /// Returns the column name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ColumnName {
    type Err = IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for ColumnName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Storage-assigned record identifier.
///
/// # Invariants
/// - Assigned values start at 1 and strictly increase per table; lookups may
///   use any value and simply miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self)
    }
}
