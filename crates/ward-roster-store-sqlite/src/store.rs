// crates/ward-roster-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Record Store
// Description: Schema-flexible RecordStore backed by an SQLite file.
// Purpose: Persist staff records and extend tables as new fields appear.
// Dependencies: rusqlite, serde, thiserror, ward-roster-core
// ============================================================================

//! ## Overview
//! [`SqliteRecordStore`] implements [`RecordStore`] over a single database
//! file. Each operation opens its own connection and drops it on every exit
//! path; no connection outlives the call that opened it.
//!
//! Writes run in two phases. The schema phase creates the table or adds the
//! missing columns, one committed statement per change, and reports a
//! [`SchemaChange`]. The apply phase then writes the row inside a single
//! transaction. A failed column addition aborts the write, but columns added
//! before it stay in place.
//!
//! Security posture: table and column names are validated identifiers and are
//! double-quoted; field values are always bound parameters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use ward_roster_core::ColumnName;
use ward_roster_core::ColumnType;
use ward_roster_core::FieldFilter;
use ward_roster_core::IdentifierError;
use ward_roster_core::MatchMode;
use ward_roster_core::Record;
use ward_roster_core::RecordId;
use ward_roster_core::RecordStore;
use ward_roster_core::StoreError;
use ward_roster_core::TableName;
use ward_roster_core::Value;

use crate::diagnostics::NoopDiagnostics;
use crate::diagnostics::StoreDiagnosticEvent;
use crate::diagnostics::StoreDiagnostics;
use crate::schema::ColumnInfo;
use crate::schema::SchemaChange;
use crate::schema::add_column_sql;
use crate::schema::create_table_sql;
use crate::schema::identifier_column;
use crate::schema::quote;
use crate::schema::table_columns;
use crate::schema::table_exists;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode.
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode.
    #[default]
    Full,
    /// Normal synchronous mode.
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` record store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Returns a configuration with default pragmas for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding field values.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid caller input or store configuration.
    #[error("sqlite store invalid input: {0}")]
    Invalid(String),
    /// Table or column name failed validation.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    /// Table or row does not exist.
    #[error("sqlite store miss: {0}")]
    NotFound(String),
    /// Column addition failed.
    #[error("sqlite store schema change failed on {table}.{column}: {message}")]
    Schema {
        /// Target table.
        table: String,
        /// Column being added.
        column: String,
        /// Engine message.
        message: String,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::Identifier(error) => Self::Identifier(error),
            SqliteStoreError::NotFound(message) => Self::NotFound(message),
            SqliteStoreError::Schema {
                table,
                column,
                message,
            } => Self::Schema {
                table,
                column,
                message,
            },
        }
    }
}

/// Maps an engine error into a store error.
fn db_error(error: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(error.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed record store.
///
/// # Invariants
/// - Holds no open connection between operations.
#[derive(Clone)]
pub struct SqliteRecordStore {
    /// Store configuration.
    config: SqliteStoreConfig,
    /// Diagnostic sink for schema changes and failures.
    diagnostics: Arc<dyn StoreDiagnostics>,
}

impl SqliteRecordStore {
    /// Validates the configuration and verifies that the database opens.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is unsafe, its parent
    /// directory cannot be created, or the database cannot be opened.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        drop(open_connection(&config)?);
        Ok(Self {
            config,
            diagnostics: Arc::new(NoopDiagnostics),
        })
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn StoreDiagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &SqliteStoreConfig {
        &self.config
    }

    /// Returns the live columns of `table` (empty when the table is missing).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the database cannot be read.
    pub fn columns(&self, table: &TableName) -> Result<Vec<ColumnInfo>, StoreError> {
        let result = self
            .connect()
            .and_then(|connection| table_columns(&connection, table).map_err(db_error));
        self.observe("columns", table, None, result)
    }

    /// Creates `table` from `fields` when it does not exist, otherwise adds
    /// any columns of `fields` the table lacks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] for invalid names, an identifier column that
    /// differs from the existing table's, or a failed schema change.
    pub fn ensure_table(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<SchemaChange, StoreError> {
        let result = validate_columns(fields).and_then(|()| {
            let connection = self.connect()?;
            self.ensure_table_on(&connection, table, id_column, fields)
        });
        self.observe("ensure_table", table, None, result)
    }

    /// Adds every column of `fields` that `table` lacks.
    ///
    /// Calling it again with the same fields changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the table does not exist and
    /// [`StoreError`] for invalid names or a failed column addition.
    pub fn ensure_columns(
        &self,
        table: &TableName,
        fields: &Record,
    ) -> Result<SchemaChange, StoreError> {
        let result = validate_columns(fields).and_then(|()| {
            let connection = self.connect()?;
            let columns = existing_columns(&connection, table)?;
            let id_column = identifier_column(&columns);
            self.ensure_columns_on(&connection, table, &columns, &id_column, fields)
        });
        self.observe("ensure_columns", table, None, result)
    }

    // ------------------------------------------------------------------------
    // Connection and diagnostics plumbing
    // ------------------------------------------------------------------------

    /// Opens a connection scoped to one operation.
    fn connect(&self) -> Result<Connection, SqliteStoreError> {
        open_connection(&self.config)
    }

    /// Converts an operation result, recording failures.
    fn observe<T>(
        &self,
        operation: &'static str,
        table: &TableName,
        record_id: Option<RecordId>,
        result: Result<T, SqliteStoreError>,
    ) -> Result<T, StoreError> {
        result.map_err(|error| {
            let error = StoreError::from(error);
            self.diagnostics.record(&StoreDiagnosticEvent::failure(
                operation,
                table.as_str(),
                record_id.map(RecordId::get),
                &error,
            ));
            error
        })
    }

    // ------------------------------------------------------------------------
    // Schema phase
    // ------------------------------------------------------------------------

    /// Creates the table or extends its columns.
    fn ensure_table_on(
        &self,
        connection: &Connection,
        table: &TableName,
        id_column: &ColumnName,
        fields: &Record,
    ) -> Result<SchemaChange, SqliteStoreError> {
        if !table_exists(connection, table).map_err(db_error)? {
            connection.execute_batch(&create_table_sql(table, id_column, fields)).map_err(
                |err| SqliteStoreError::Schema {
                    table: table.to_string(),
                    column: id_column.to_string(),
                    message: err.to_string(),
                },
            )?;
            let change = SchemaChange {
                table_created: true,
                columns_added: fields
                    .columns()
                    .filter(|column| column.as_str() != id_column.as_str())
                    .cloned()
                    .collect(),
            };
            self.diagnostics.record(&StoreDiagnosticEvent::schema_change(
                "create_table",
                table.as_str(),
                true,
                change.columns_added.clone(),
            ));
            return Ok(change);
        }

        let columns = table_columns(connection, table).map_err(db_error)?;
        let existing_id = identifier_column(&columns);
        if existing_id != id_column.as_str() {
            return Err(SqliteStoreError::Invalid(format!(
                "table {table} identifies rows by {existing_id}, not {id_column}"
            )));
        }
        self.ensure_columns_on(connection, table, &columns, &existing_id, fields)
    }

    /// Adds the columns of `fields` missing from `columns`, one statement each.
    fn ensure_columns_on(
        &self,
        connection: &Connection,
        table: &TableName,
        columns: &[ColumnInfo],
        id_column: &str,
        fields: &Record,
    ) -> Result<SchemaChange, SqliteStoreError> {
        let mut change = SchemaChange::default();
        let mut outcome = Ok(());
        for (column, value) in fields {
            let known = column.eq_ignore_ascii_case(id_column)
                || columns.iter().any(|info| info.name.eq_ignore_ascii_case(column));
            if known {
                continue;
            }
            let sql = add_column_sql(table, column, ColumnType::infer(value));
            if let Err(err) = connection.execute_batch(&sql) {
                outcome = Err(SqliteStoreError::Schema {
                    table: table.to_string(),
                    column: column.clone(),
                    message: err.to_string(),
                });
                break;
            }
            change.columns_added.push(column.clone());
        }
        if !change.is_empty() {
            self.diagnostics.record(&StoreDiagnosticEvent::schema_change(
                "add_columns",
                table.as_str(),
                false,
                change.columns_added.clone(),
            ));
        }
        outcome.map(|()| change)
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Runs `fetch_table`.
    fn fetch_table_rows(&self, table: &TableName) -> Result<Vec<Record>, SqliteStoreError> {
        let connection = self.connect()?;
        if !table_exists(&connection, table).map_err(db_error)? {
            return Ok(Vec::new());
        }
        query_records(
            &connection,
            &format!("SELECT * FROM {} ORDER BY ROWID", quote(table.as_str())),
            Vec::new(),
        )
    }

    /// Runs `fetch_matching`.
    fn fetch_matching_rows(
        &self,
        table: &TableName,
        filter: &FieldFilter,
        mode: MatchMode,
    ) -> Result<Vec<Record>, SqliteStoreError> {
        if filter.is_empty() {
            return self.fetch_table_rows(table);
        }
        let mut predicates = Vec::with_capacity(filter.conditions().len());
        let mut values = Vec::with_capacity(filter.conditions().len());
        for (index, condition) in filter.conditions().iter().enumerate() {
            let column = ColumnName::parse(&condition.column)?;
            predicates.push(format!(
                "{} {} ?{}",
                quote(column.as_str()),
                condition.comparison.operator(),
                index + 1
            ));
            values.push(to_sql_value(&condition.value));
        }
        let connection = self.connect()?;
        if !table_exists(&connection, table).map_err(db_error)? {
            return Ok(Vec::new());
        }
        let known = table_columns(&connection, table).map_err(db_error)?;
        if let Some(condition) = filter.conditions().iter().find(|condition| {
            !known.iter().any(|column| column.name.eq_ignore_ascii_case(&condition.column))
        }) {
            return Err(SqliteStoreError::Db(format!("no such column: {}", condition.column)));
        }
        let sql = format!(
            "SELECT * FROM {} WHERE {} ORDER BY ROWID",
            quote(table.as_str()),
            predicates.join(mode.connective())
        );
        query_records(&connection, &sql, values)
    }

    /// Runs `fetch_latest`.
    fn fetch_latest_row(&self, table: &TableName) -> Result<Option<Record>, SqliteStoreError> {
        let connection = self.connect()?;
        if !table_exists(&connection, table).map_err(db_error)? {
            return Ok(None);
        }
        let rows = query_records(
            &connection,
            &format!("SELECT * FROM {} ORDER BY ROWID DESC LIMIT 1", quote(table.as_str())),
            Vec::new(),
        )?;
        Ok(rows.into_iter().next())
    }

    /// Runs `insert`.
    fn insert_row(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<RecordId, SqliteStoreError> {
        validate_columns(fields)?;
        let values = writable_fields(fields, id_column.as_str())?;
        let mut connection = self.connect()?;
        self.ensure_table_on(&connection, table, id_column, &values)?;

        let columns: Vec<String> = values.columns().map(|column| quote(column)).collect();
        let placeholders: Vec<String> =
            (1 ..= columns.len()).map(|index| format!("?{index}")).collect();
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(table.as_str()),
            columns.join(", "),
            placeholders.join(", ")
        );
        let assign_id = format!(
            "UPDATE {} SET {} = ?1 WHERE ROWID = ?2",
            quote(table.as_str()),
            quote(id_column.as_str())
        );

        let tx = connection.transaction().map_err(db_error)?;
        tx.execute(&insert, params_from_iter(values.iter().map(|(_, value)| to_sql_value(value))))
            .map_err(db_error)?;
        let id = tx.last_insert_rowid();
        tx.execute(&assign_id, params![id, id]).map_err(db_error)?;
        tx.commit().map_err(db_error)?;
        Ok(RecordId::new(id))
    }

    /// Runs `update_by_id`.
    fn update_row(
        &self,
        table: &TableName,
        id: RecordId,
        fields: &Record,
    ) -> Result<(), SqliteStoreError> {
        validate_columns(fields)?;
        let mut connection = self.connect()?;
        let columns = existing_columns(&connection, table)?;
        let id_column = identifier_column(&columns);
        let values = writable_fields(fields, &id_column)?;

        let exists = connection
            .query_row(
                &format!(
                    "SELECT 1 FROM {} WHERE {} = ?1",
                    quote(table.as_str()),
                    quote(&id_column)
                ),
                params![id.get()],
                |_| Ok(()),
            )
            .optional()
            .map_err(db_error)?;
        if exists.is_none() {
            return Err(SqliteStoreError::NotFound(format!("{table} row {id}")));
        }

        self.ensure_columns_on(&connection, table, &columns, &id_column, &values)?;

        let assignments: Vec<String> = values
            .columns()
            .enumerate()
            .map(|(index, column)| format!("{} = ?{}", quote(column), index + 1))
            .collect();
        let mut bound: Vec<SqlValue> = values.iter().map(|(_, value)| to_sql_value(value)).collect();
        bound.push(SqlValue::Integer(id.get()));
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote(table.as_str()),
            assignments.join(", "),
            quote(&id_column),
            bound.len()
        );

        let tx = connection.transaction().map_err(db_error)?;
        let changed = tx.execute(&sql, params_from_iter(bound)).map_err(db_error)?;
        if changed != 1 {
            return Err(SqliteStoreError::NotFound(format!(
                "{table} row {id} matched {changed} rows"
            )));
        }
        tx.commit().map_err(db_error)
    }

    /// Runs `delete_by_id`.
    fn delete_row(&self, table: &TableName, id: RecordId) -> Result<(), SqliteStoreError> {
        let mut connection = self.connect()?;
        let columns = existing_columns(&connection, table)?;
        let id_column = identifier_column(&columns);
        let sql =
            format!("DELETE FROM {} WHERE {} = ?1", quote(table.as_str()), quote(&id_column));

        let tx = connection.transaction().map_err(db_error)?;
        let removed = tx.execute(&sql, params![id.get()]).map_err(db_error)?;
        if removed != 1 {
            return Err(SqliteStoreError::NotFound(format!("{table} row {id}")));
        }
        tx.commit().map_err(db_error)
    }
}

impl RecordStore for SqliteRecordStore {
    fn fetch_table(&self, table: &TableName) -> Result<Vec<Record>, StoreError> {
        self.observe("fetch_table", table, None, self.fetch_table_rows(table))
    }

    fn fetch_matching(
        &self,
        table: &TableName,
        filter: &FieldFilter,
        mode: MatchMode,
    ) -> Result<Vec<Record>, StoreError> {
        self.observe("fetch_matching", table, None, self.fetch_matching_rows(table, filter, mode))
    }

    fn fetch_latest(&self, table: &TableName) -> Result<Option<Record>, StoreError> {
        self.observe("fetch_latest", table, None, self.fetch_latest_row(table))
    }

    fn insert(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<RecordId, StoreError> {
        self.observe("insert", table, None, self.insert_row(table, fields, id_column))
    }

    fn update_by_id(
        &self,
        table: &TableName,
        id: RecordId,
        fields: &Record,
    ) -> Result<(), StoreError> {
        self.observe("update_by_id", table, Some(id), self.update_row(table, id, fields))
    }

    fn delete_by_id(&self, table: &TableName, id: RecordId) -> Result<(), StoreError> {
        self.observe("delete_by_id", table, Some(id), self.delete_row(table, id))
    }
}

// ============================================================================
// SECTION: Row Helpers
// ============================================================================

/// Rejects empty field maps and unsafe column names.
fn validate_columns(fields: &Record) -> Result<(), SqliteStoreError> {
    if fields.is_empty() {
        return Err(SqliteStoreError::Invalid("field map must not be empty".to_string()));
    }
    for column in fields.columns() {
        ColumnName::parse(column)?;
    }
    Ok(())
}

/// Drops the identifier column; fails when nothing else remains.
fn writable_fields(fields: &Record, id_column: &str) -> Result<Record, SqliteStoreError> {
    let values: Record = fields
        .iter()
        .filter(|(column, _)| !column.eq_ignore_ascii_case(id_column))
        .map(|(column, value)| (column.clone(), value.clone()))
        .collect();
    if values.is_empty() {
        return Err(SqliteStoreError::Invalid(
            "field map has no columns besides the identifier".to_string(),
        ));
    }
    Ok(values)
}

/// Returns the columns of an existing table.
fn existing_columns(
    connection: &Connection,
    table: &TableName,
) -> Result<Vec<ColumnInfo>, SqliteStoreError> {
    if !table_exists(connection, table).map_err(db_error)? {
        return Err(SqliteStoreError::NotFound(format!("table {table}")));
    }
    table_columns(connection, table).map_err(db_error)
}

/// Runs a query and collects every row as a record.
fn query_records(
    connection: &Connection,
    sql: &str,
    values: Vec<SqlValue>,
) -> Result<Vec<Record>, SqliteStoreError> {
    let mut statement = connection.prepare(sql).map_err(db_error)?;
    let names: Vec<String> =
        statement.column_names().into_iter().map(str::to_string).collect();
    let mut rows = statement.query(params_from_iter(values)).map_err(db_error)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(db_error)? {
        let mut record = Record::new();
        for (index, name) in names.iter().enumerate() {
            record.insert(name.clone(), from_sql_value(row.get_ref(index).map_err(db_error)?));
        }
        records.push(record);
    }
    Ok(records)
}

/// Converts a field value into its bound `SQLite` form.
fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(value) => SqlValue::Integer(*value),
        Value::Real(value) => SqlValue::Real(*value),
        Value::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
        Value::Text(text) => SqlValue::Text(text.clone()),
        Value::Blob(bytes) => SqlValue::Blob(bytes.clone()),
        Value::Composite(document) => SqlValue::Text(document.to_string()),
    }
}

/// Converts a stored `SQLite` value into a field value.
fn from_sql_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(value) => Value::Integer(value),
        ValueRef::Real(value) => Value::Real(value),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

// ============================================================================
// SECTION: Connection Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if path.display().to_string().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    if path
        .components()
        .any(|component| component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH)
    {
        return Err(SqliteStoreError::Invalid(
            "store path contains an overlong component".to_string(),
        ));
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens a connection and applies the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db_error)?;
    connection.busy_timeout(Duration::from_millis(config.busy_timeout_ms)).map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_error)?;
    Ok(connection)
}
