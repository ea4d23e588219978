// crates/ward-roster-store-sqlite/src/schema.rs
// ============================================================================
// Module: SQLite Schema Introspection
// Description: Table existence, column listing, and schema-change DDL.
// Purpose: Read a table's live column set and extend it on demand.
// Dependencies: rusqlite, ward-roster-core
// ============================================================================

//! ## Overview
//! Tables are schema-flexible: their live column set may lag behind the keys
//! ever written to them. Helpers here read the current shape through
//! `PRAGMA table_info` and build the `CREATE TABLE` / `ALTER TABLE ADD COLUMN`
//! statements that close the gap.
//!
//! Security posture: every name interpolated here is a validated identifier
//! and is additionally double-quoted. Values are never interpolated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Serialize;
use ward_roster_core::ColumnName;
use ward_roster_core::ColumnType;
use ward_roster_core::DEFAULT_ID_COLUMN;
use ward_roster_core::Record;
use ward_roster_core::TableName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared type text (may be empty).
    pub declared_type: String,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
}

/// Schema changes applied before a write.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SchemaChange {
    /// Whether the table was created.
    pub table_created: bool,
    /// Columns added, in the order they were added.
    pub columns_added: Vec<String>,
}

impl SchemaChange {
    /// Returns true when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.table_created && self.columns_added.is_empty()
    }
}

// ============================================================================
// SECTION: Introspection
// ============================================================================

/// Double-quotes a validated identifier for statement text.
#[must_use]
pub fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// Returns whether `table` exists.
///
/// # Errors
///
/// Returns the engine error when the catalog query fails.
pub fn table_exists(connection: &Connection, table: &TableName) -> rusqlite::Result<bool> {
    connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table.as_str()],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
}

/// Returns the columns of `table` in declaration order (empty when missing).
///
/// # Errors
///
/// Returns the engine error when the pragma query fails.
pub fn table_columns(
    connection: &Connection,
    table: &TableName,
) -> rusqlite::Result<Vec<ColumnInfo>> {
    let mut statement =
        connection.prepare(&format!("PRAGMA table_info({})", quote(table.as_str())))?;
    let rows = statement.query_map([], |row| {
        Ok(ColumnInfo {
            name: row.get(1)?,
            declared_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            primary_key: row.get::<_, i64>(5)? > 0,
        })
    })?;
    rows.collect()
}

/// Returns the identifier column: the primary key, else `id`.
#[must_use]
pub fn identifier_column(columns: &[ColumnInfo]) -> String {
    columns
        .iter()
        .find(|column| column.primary_key)
        .map_or_else(|| DEFAULT_ID_COLUMN.to_string(), |column| column.name.clone())
}

// ============================================================================
// SECTION: DDL
// ============================================================================

/// Builds the `CREATE TABLE` statement for a new table.
///
/// The identifier column comes first as an auto-incrementing primary key,
/// followed by one column per field with its inferred type.
#[must_use]
pub fn create_table_sql(table: &TableName, id_column: &ColumnName, fields: &Record) -> String {
    let mut columns = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote(id_column.as_str()))];
    columns.extend(
        fields
            .iter()
            .filter(|(column, _)| !column.eq_ignore_ascii_case(id_column.as_str()))
            .map(|(column, value)| {
                format!("{} {}", quote(column), ColumnType::infer(value).sql_name())
            }),
    );
    format!("CREATE TABLE {} ({})", quote(table.as_str()), columns.join(", "))
}

/// Builds the `ALTER TABLE ... ADD COLUMN` statement for one new column.
#[must_use]
pub fn add_column_sql(table: &TableName, column: &str, column_type: ColumnType) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote(table.as_str()),
        quote(column),
        column_type.sql_name()
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
