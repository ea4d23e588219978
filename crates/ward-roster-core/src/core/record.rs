// crates/ward-roster-core/src/core/record.rs
// ============================================================================
// Module: Ward Roster Records
// Description: Scalar values, field maps, and inferred column types.
// Purpose: Model schema-flexible rows independent of the storage engine.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Record`] maps column names to [`Value`]s. Values written by callers may
//! be booleans or composite JSON documents; before storage these collapse to
//! the engine's scalar classes (`Bool` to `Integer`, `Composite` to JSON
//! `Text`). Reads only ever produce scalar classes, so callers must know which
//! columns hold serialized composites.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Values
// ============================================================================

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// Boolean, stored as integer 0/1.
    Bool(bool),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
    /// Sequence or mapping, stored as JSON text.
    Composite(serde_json::Value),
}

impl Value {
    /// Returns the scalar form written to storage.
    #[must_use]
    pub fn to_storage(&self) -> Self {
        match self {
            Self::Bool(flag) => Self::Integer(i64::from(*flag)),
            Self::Composite(document) => Self::Text(document.to_string()),
            other => other.clone(),
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload when the value is an integer or boolean.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Bool(flag) => Some(if *flag { 1 } else { 0 }),
            _ => None,
        }
    }

    /// Returns the text payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Renders scalar values as text the way a form field would show them.
    ///
    /// Returns `None` for nulls and blobs.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Blob(_) => None,
            Self::Integer(value) => Some(value.to_string()),
            Self::Real(value) => Some(value.to_string()),
            Self::Bool(flag) => Some(i64::from(*flag).to_string()),
            Self::Text(value) => Some(value.clone()),
            Self::Composite(document) => Some(document.to_string()),
        }
    }

    /// Compares two stored values the way a SQL predicate would.
    ///
    /// Numbers compare numerically across integer/real; text and blobs
    /// compare bytewise; nulls and mismatched classes are incomparable.
    #[must_use]
    pub fn sql_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.to_storage(), other.to_storage()) {
            (Self::Integer(left), Self::Integer(right)) => Some(left.cmp(&right)),
            (Self::Integer(left), Self::Real(right)) => {
                #[allow(clippy::cast_precision_loss, reason = "Mirrors SQL numeric affinity.")]
                let left = left as f64;
                left.partial_cmp(&right)
            }
            (Self::Real(left), Self::Integer(right)) => {
                #[allow(clippy::cast_precision_loss, reason = "Mirrors SQL numeric affinity.")]
                let right = right as f64;
                left.partial_cmp(&right)
            }
            (Self::Real(left), Self::Real(right)) => left.partial_cmp(&right),
            (Self::Text(left), Self::Text(right)) => Some(left.as_bytes().cmp(right.as_bytes())),
            (Self::Blob(left), Self::Blob(right)) => Some(left.cmp(&right)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Real))
                .unwrap_or_else(|| Self::Text(number.to_string())),
            serde_json::Value::String(text) => Self::Text(text),
            composite @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Composite(composite)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
            other => f.write_str(&other.to_text().unwrap_or_default()),
        }
    }
}

// ============================================================================
// SECTION: Column Types
// ============================================================================

/// Declared column type inferred from the first value written to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// `INTEGER` (integers and booleans).
    Integer,
    /// `REAL`.
    Real,
    /// `TEXT` (text and serialized composites).
    Text,
    /// `BLOB`.
    Blob,
    /// `NULL` (column first seen with a null value).
    Null,
}

impl ColumnType {
    /// Infers the declared type for a value.
    #[must_use]
    pub const fn infer(value: &Value) -> Self {
        match value {
            Value::Integer(_) | Value::Bool(_) => Self::Integer,
            Value::Real(_) => Self::Real,
            Value::Text(_) | Value::Composite(_) => Self::Text,
            Value::Blob(_) => Self::Blob,
            Value::Null => Self::Null,
        }
    }

    /// Returns the SQL type keyword.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Null => "NULL",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Column-name to value map for a single row.
///
/// # Invariants
/// - Keys iterate in sorted order, which fixes column creation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    /// Field values keyed by column name.
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the record (builder style).
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(column.into(), value.into())
    }

    /// Removes a field.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.fields.remove(column)
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Returns an integer field.
    #[must_use]
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    /// Returns a field rendered as text.
    #[must_use]
    pub fn get_text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(Value::to_text)
    }

    /// Returns true when the column is present.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Returns true when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates fields in column order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Iterates column names in order.
    pub fn columns(&self) -> btree_map::Keys<'_, String, Value> {
        self.fields.keys()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
