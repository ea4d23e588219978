// crates/ward-roster-store-sqlite/src/diagnostics.rs
// ============================================================================
// Module: Record Store Diagnostics
// Description: Structured JSON-line events for schema changes and failures.
// Purpose: Record what the store did without logging field values.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every schema change (table created, column added) and every failed store
//! operation produces a [`StoreDiagnosticEvent`]. Sinks decide where events
//! go: stderr, an append-only file, or nowhere. Events carry table and column
//! names only; field values and passwords never reach a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use ward_roster_core::StoreError;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Diagnostic event emitted by the `SQLite` record store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreDiagnosticEvent {
    /// Event name (`schema_change` or `store_failure`).
    pub event: &'static str,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: u128,
    /// Store operation that produced the event.
    pub operation: &'static str,
    /// Target table.
    pub table: String,
    /// Outcome label.
    pub outcome: &'static str,
    /// Target record, when the operation addressed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    /// Columns added by a schema change.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns_added: Vec<String>,
    /// Error classification for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Error message for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoreDiagnosticEvent {
    /// Builds a schema change event.
    #[must_use]
    pub fn schema_change(
        operation: &'static str,
        table: &str,
        table_created: bool,
        columns_added: Vec<String>,
    ) -> Self {
        Self {
            event: "schema_change",
            timestamp_ms: now_ms(),
            operation,
            table: table.to_string(),
            outcome: if table_created { "table_created" } else { "column_added" },
            record_id: None,
            columns_added,
            error_kind: None,
            message: None,
        }
    }

    /// Builds a failure event from a store error.
    #[must_use]
    pub fn failure(
        operation: &'static str,
        table: &str,
        record_id: Option<i64>,
        error: &StoreError,
    ) -> Self {
        Self {
            event: "store_failure",
            timestamp_ms: now_ms(),
            operation,
            table: table.to_string(),
            outcome: "error",
            record_id,
            columns_added: Vec::new(),
            error_kind: Some(error.kind()),
            message: Some(error.to_string()),
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Diagnostic sink for store events.
pub trait StoreDiagnostics: Send + Sync {
    /// Records a diagnostic event.
    fn record(&self, event: &StoreDiagnosticEvent);
}

/// JSON-lines sink that writes to stderr.
pub struct StderrDiagnostics;

impl StoreDiagnostics for StderrDiagnostics {
    fn record(&self, event: &StoreDiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// JSON-lines sink that appends to a file.
pub struct FileDiagnostics {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnostics {
    /// Opens the diagnostics file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl StoreDiagnostics for FileDiagnostics {
    fn record(&self, event: &StoreDiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that discards events.
pub struct NoopDiagnostics;

impl StoreDiagnostics for NoopDiagnostics {
    fn record(&self, _event: &StoreDiagnosticEvent) {}
}
