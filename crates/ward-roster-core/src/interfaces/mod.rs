// crates/ward-roster-core/src/interfaces/mod.rs
// ============================================================================
// Module: Ward Roster Interfaces
// Description: Backend-agnostic record store interface and query filters.
// Purpose: Define the contract every record store backend implements.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! [`RecordStore`] is the seam between the roster services and storage. Every
//! operation returns an explicit [`Result`] so callers can tell a missing row
//! ([`StoreError::NotFound`]) apart from an engine fault ([`StoreError::Db`]).
//! Front ends that only want a yes/no answer use [`FailClosed`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::ColumnName;
use crate::core::IdentifierError;
use crate::core::Record;
use crate::core::RecordId;
use crate::core::TableName;
use crate::core::Value;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Record store errors.
///
/// # Invariants
/// - Messages name tables and columns but never embed field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Caller input is empty or malformed.
    #[error("record store invalid input: {0}")]
    Invalid(String),
    /// Table or column name failed identifier validation.
    #[error("record store rejected identifier: {0}")]
    Identifier(#[from] IdentifierError),
    /// Table or row does not exist.
    #[error("record store miss: {0}")]
    NotFound(String),
    /// Schema change (create table / add column) failed.
    #[error("record store schema change failed on {table}.{column}: {message}")]
    Schema {
        /// Target table.
        table: String,
        /// Column being added.
        column: String,
        /// Engine message.
        message: String,
    },
    /// Storage engine error.
    #[error("record store db error: {0}")]
    Db(String),
    /// Filesystem error.
    #[error("record store io error: {0}")]
    Io(String),
}

impl StoreError {
    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "invalid",
            Self::Identifier(_) => "identifier",
            Self::NotFound(_) => "not_found",
            Self::Schema {
                ..
            } => "schema",
            Self::Db(_) => "db",
            Self::Io(_) => "io",
        }
    }

    /// Returns true when the error means "no such row/table".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// ============================================================================
// SECTION: Filters
// ============================================================================

/// How filter conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every condition must hold (`AND`).
    #[default]
    All,
    /// At least one condition must hold (`OR`).
    Any,
}

impl MatchMode {
    /// Returns the SQL connective.
    #[must_use]
    pub const fn connective(self) -> &'static str {
        match self {
            Self::All => " AND ",
            Self::Any => " OR ",
        }
    }
}

/// Comparison operator for a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Comparison {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Evaluates the operator against two values (SQL semantics: nulls never match).
    #[must_use]
    pub fn holds(self, left: &Value, right: &Value) -> bool {
        left.sql_cmp(right).is_some_and(|ordering| match self {
            Self::Eq => ordering.is_eq(),
            Self::Lt => ordering.is_lt(),
            Self::Le => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Ge => ordering.is_ge(),
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

/// One `column <op> value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    /// Column being compared.
    pub column: String,
    /// Operator.
    pub comparison: Comparison,
    /// Bound comparison value.
    pub value: Value,
}

/// Ordered list of filter conditions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldFilter {
    /// Conditions in predicate order.
    conditions: Vec<FieldCondition>,
}

impl FieldFilter {
    /// Creates an empty filter (matches every row).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Comparison::Eq, value)
    }

    /// Adds a `<=` condition.
    #[must_use]
    pub fn le(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Comparison::Le, value)
    }

    /// Adds a condition with an explicit operator.
    #[must_use]
    pub fn with(
        mut self,
        column: impl Into<String>,
        comparison: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        self.conditions.push(FieldCondition {
            column: column.into(),
            comparison,
            value: value.into(),
        });
        self
    }

    /// Returns the conditions.
    #[must_use]
    pub fn conditions(&self) -> &[FieldCondition] {
        &self.conditions
    }

    /// Returns true when there are no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluates the filter against a row.
    #[must_use]
    pub fn matches(&self, row: &Record, mode: MatchMode) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let mut outcomes = self.conditions.iter().map(|condition| {
            row.get(&condition.column)
                .is_some_and(|value| condition.comparison.holds(value, &condition.value))
        });
        match mode {
            MatchMode::All => outcomes.all(|hit| hit),
            MatchMode::Any => outcomes.any(|hit| hit),
        }
    }
}

impl From<&Record> for FieldFilter {
    fn from(record: &Record) -> Self {
        record
            .iter()
            .fold(Self::new(), |filter, (column, value)| filter.eq(column.clone(), value.clone()))
    }
}

// ============================================================================
// SECTION: Record Store
// ============================================================================

/// Schema-flexible record store.
///
/// Writes extend the table schema on demand: a missing table is created from
/// the supplied fields and missing columns are added before the row is written.
pub trait RecordStore {
    /// Returns every row of `table` in insertion order.
    ///
    /// A missing table yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the engine fails.
    fn fetch_table(&self, table: &TableName) -> Result<Vec<Record>, StoreError>;

    /// Returns the rows matching `filter` combined with `mode`.
    ///
    /// An empty filter returns the whole table; a missing table yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] for invalid column names or engine failures.
    fn fetch_matching(
        &self,
        table: &TableName,
        filter: &FieldFilter,
        mode: MatchMode,
    ) -> Result<Vec<Record>, StoreError>;

    /// Returns the most recently inserted row, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the engine fails.
    fn fetch_latest(&self, table: &TableName) -> Result<Option<Record>, StoreError>;

    /// Inserts a row and returns its assigned identifier.
    ///
    /// The identifier is also written into `id_column` of the new row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for an empty field map, and
    /// [`StoreError`] for invalid names, schema, or engine failures.
    fn insert(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<RecordId, StoreError>;

    /// Updates exactly one row by identifier, adding missing columns first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the table or row is missing and
    /// [`StoreError`] for empty input, invalid names, schema, or engine failures.
    fn update_by_id(
        &self,
        table: &TableName,
        id: RecordId,
        fields: &Record,
    ) -> Result<(), StoreError>;

    /// Deletes exactly one row by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when nothing was removed and
    /// [`StoreError`] for engine failures.
    fn delete_by_id(&self, table: &TableName, id: RecordId) -> Result<(), StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn fetch_table(&self, table: &TableName) -> Result<Vec<Record>, StoreError> {
        (**self).fetch_table(table)
    }

    fn fetch_matching(
        &self,
        table: &TableName,
        filter: &FieldFilter,
        mode: MatchMode,
    ) -> Result<Vec<Record>, StoreError> {
        (**self).fetch_matching(table, filter, mode)
    }

    fn fetch_latest(&self, table: &TableName) -> Result<Option<Record>, StoreError> {
        (**self).fetch_latest(table)
    }

    fn insert(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<RecordId, StoreError> {
        (**self).insert(table, fields, id_column)
    }

    fn update_by_id(
        &self,
        table: &TableName,
        id: RecordId,
        fields: &Record,
    ) -> Result<(), StoreError> {
        (**self).update_by_id(table, id, fields)
    }

    fn delete_by_id(&self, table: &TableName, id: RecordId) -> Result<(), StoreError> {
        (**self).delete_by_id(table, id)
    }
}

// ============================================================================
// SECTION: Fail-Closed Adapters
// ============================================================================

/// Collapses store results into the boolean / empty-result form used at UI
/// boundaries.
pub trait FailClosed {
    /// Simplified output type.
    type Output;

    /// Returns the success value, or the fail-closed default on any error.
    fn fail_closed(self) -> Self::Output;
}

impl FailClosed for Result<(), StoreError> {
    type Output = bool;

    fn fail_closed(self) -> bool {
        self.is_ok()
    }
}

impl FailClosed for Result<Vec<Record>, StoreError> {
    type Output = Vec<Record>;

    fn fail_closed(self) -> Vec<Record> {
        self.unwrap_or_default()
    }
}

impl FailClosed for Result<Option<Record>, StoreError> {
    type Output = Option<Record>;

    fn fail_closed(self) -> Option<Record> {
        self.ok().flatten()
    }
}
