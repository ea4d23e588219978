// crates/ward-roster-core/src/runtime/memory.rs
// ============================================================================
// Module: Ward Roster In-Memory Store
// Description: Mutex-guarded record store for tests and demos.
// Purpose: Mirror the schema-drift and identifier semantics of durable stores.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`InMemoryRecordStore`] keeps each table as a column list plus rows behind
//! a shared mutex. It follows the same contract as the `SQLite` backend:
//! tables are created on first insert, unknown columns are added before a
//! write, identifiers are never reused, and reads of missing tables are empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::ColumnName;
use crate::core::ColumnType;
use crate::core::Record;
use crate::core::RecordId;
use crate::core::TableName;
use crate::core::Value;
use crate::interfaces::FieldFilter;
use crate::interfaces::MatchMode;
use crate::interfaces::RecordStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Tables
// ============================================================================

/// One in-memory table.
#[derive(Debug, Clone)]
struct MemoryTable {
    /// Identifier column name.
    id_column: String,
    /// Declared columns in creation order (identifier first).
    columns: Vec<(String, ColumnType)>,
    /// Rows in insertion order; every row carries every column.
    rows: Vec<Record>,
    /// Last identifier handed out.
    last_id: i64,
}

impl MemoryTable {
    /// Creates an empty table with only the identifier column.
    fn new(id_column: &ColumnName) -> Self {
        Self {
            id_column: id_column.as_str().to_string(),
            columns: vec![(id_column.as_str().to_string(), ColumnType::Integer)],
            rows: Vec::new(),
            last_id: 0,
        }
    }

    /// Returns the declared spelling of `column`; names match ASCII case-insensitively.
    fn declared(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .map(|(name, _)| name.as_str())
            .find(|name| name.eq_ignore_ascii_case(column))
    }

    /// Returns true when the column is declared.
    fn has_column(&self, column: &str) -> bool {
        self.declared(column).is_some()
    }

    /// Rewrites `fields` so every key uses the declared column spelling.
    fn canonical(&self, fields: Record) -> Record {
        fields
            .into_iter()
            .map(|(column, value)| {
                let name = self.declared(&column).map_or(column, str::to_string);
                (name, value)
            })
            .collect()
    }

    /// Rewrites `filter` onto declared columns; unknown columns are an engine error.
    fn canonical_filter(&self, filter: &FieldFilter) -> Result<FieldFilter, StoreError> {
        filter.conditions().iter().try_fold(FieldFilter::new(), |canonical, condition| {
            let column = self
                .declared(&condition.column)
                .ok_or_else(|| StoreError::Db(format!("no such column: {}", condition.column)))?;
            Ok(canonical.with(column, condition.comparison, condition.value.clone()))
        })
    }

    /// Adds every column of `fields` the table lacks.
    fn ensure_columns(&mut self, fields: &Record) {
        for (column, value) in fields {
            if column.eq_ignore_ascii_case(&self.id_column) || self.has_column(column) {
                continue;
            }
            self.columns.push((column.clone(), ColumnType::infer(value)));
            for row in &mut self.rows {
                row.insert(column.clone(), Value::Null);
            }
        }
    }

    /// Returns the position of the row carrying `id`.
    fn position(&self, id: RecordId) -> Option<usize> {
        self.rows.iter().position(|row| row.get_i64(&self.id_column) == Some(id.get()))
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// In-memory record store.
///
/// # Invariants
/// - Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    /// Tables keyed by name.
    tables: Arc<Mutex<BTreeMap<String, MemoryTable>>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declared columns of `table`, identifier first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Db`] when the store mutex is poisoned.
    pub fn columns(&self, table: &TableName) -> Result<Vec<String>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .get(table.as_str())
            .map(|entry| entry.columns.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default())
    }

    /// Locks the table map.
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, MemoryTable>>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Db("record store mutex poisoned".to_string()))
    }
}

/// Validates every column name in `fields`.
fn validate_columns(fields: &Record) -> Result<(), StoreError> {
    for column in fields.columns() {
        ColumnName::parse(column)?;
    }
    Ok(())
}

/// Copies `fields` without the identifier column, in storage form.
fn without_id(fields: &Record, id_column: &str) -> Record {
    fields
        .iter()
        .filter(|(column, _)| !column.eq_ignore_ascii_case(id_column))
        .map(|(column, value)| (column.clone(), value.to_storage()))
        .collect()
}

impl RecordStore for InMemoryRecordStore {
    fn fetch_table(&self, table: &TableName) -> Result<Vec<Record>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(table.as_str()).map(|entry| entry.rows.clone()).unwrap_or_default())
    }

    fn fetch_matching(
        &self,
        table: &TableName,
        filter: &FieldFilter,
        mode: MatchMode,
    ) -> Result<Vec<Record>, StoreError> {
        for condition in filter.conditions() {
            ColumnName::parse(&condition.column)?;
        }
        let guard = self.lock()?;
        let Some(entry) = guard.get(table.as_str()) else {
            return Ok(Vec::new());
        };
        let filter = entry.canonical_filter(filter)?;
        Ok(entry.rows.iter().filter(|row| filter.matches(row, mode)).cloned().collect())
    }

    fn fetch_latest(&self, table: &TableName) -> Result<Option<Record>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(table.as_str()).and_then(|entry| entry.rows.last().cloned()))
    }

    fn insert(
        &self,
        table: &TableName,
        fields: &Record,
        id_column: &ColumnName,
    ) -> Result<RecordId, StoreError> {
        if fields.is_empty() {
            return Err(StoreError::Invalid("field map must not be empty".to_string()));
        }
        validate_columns(fields)?;
        let values = without_id(fields, id_column.as_str());
        if values.is_empty() {
            return Err(StoreError::Invalid(
                "field map has no columns besides the identifier".to_string(),
            ));
        }

        let mut guard = self.lock()?;
        let entry =
            guard.entry(table.as_str().to_string()).or_insert_with(|| MemoryTable::new(id_column));
        if entry.id_column != id_column.as_str() {
            return Err(StoreError::Invalid(format!(
                "table {table} identifies rows by {}, not {id_column}",
                entry.id_column
            )));
        }
        entry.ensure_columns(&values);
        let values = entry.canonical(values);

        entry.last_id += 1;
        let id = RecordId::new(entry.last_id);
        let mut row: Record =
            entry.columns.iter().map(|(column, _)| (column.clone(), Value::Null)).collect();
        for (column, value) in values {
            row.insert(column, value);
        }
        row.insert(entry.id_column.clone(), id.get());
        entry.rows.push(row);
        drop(guard);
        Ok(id)
    }

    fn update_by_id(
        &self,
        table: &TableName,
        id: RecordId,
        fields: &Record,
    ) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::Invalid("field map must not be empty".to_string()));
        }
        validate_columns(fields)?;

        let mut guard = self.lock()?;
        let entry = guard
            .get_mut(table.as_str())
            .ok_or_else(|| StoreError::NotFound(format!("table {table}")))?;
        let values = without_id(fields, &entry.id_column);
        if values.is_empty() {
            return Err(StoreError::Invalid(
                "field map has no columns besides the identifier".to_string(),
            ));
        }
        let position =
            entry.position(id).ok_or_else(|| StoreError::NotFound(format!("{table} row {id}")))?;
        entry.ensure_columns(&values);
        let values = entry.canonical(values);
        if let Some(row) = entry.rows.get_mut(position) {
            for (column, value) in values {
                row.insert(column, value);
            }
        }
        drop(guard);
        Ok(())
    }

    fn delete_by_id(&self, table: &TableName, id: RecordId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let entry = guard
            .get_mut(table.as_str())
            .ok_or_else(|| StoreError::NotFound(format!("table {table}")))?;
        let position =
            entry.position(id).ok_or_else(|| StoreError::NotFound(format!("{table} row {id}")))?;
        entry.rows.remove(position);
        drop(guard);
        Ok(())
    }
}
