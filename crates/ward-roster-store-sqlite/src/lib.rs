// crates/ward-roster-store-sqlite/src/lib.rs
// ============================================================================
// Module: Ward Roster SQLite Store Library
// Description: Public API surface for the SQLite record store.
// Purpose: Expose the store, its configuration, schema helpers, and sinks.
// Dependencies: crate::{diagnostics, schema, store}
// ============================================================================

//! ## Overview
//! Durable [`ward_roster_core::RecordStore`] implementation over a single
//! `SQLite` file. Tables grow new columns as new fields are written, and
//! every schema change or failure is reported to a pluggable diagnostic sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod diagnostics;
pub mod schema;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use diagnostics::FileDiagnostics;
pub use diagnostics::NoopDiagnostics;
pub use diagnostics::StderrDiagnostics;
pub use diagnostics::StoreDiagnosticEvent;
pub use diagnostics::StoreDiagnostics;
pub use schema::ColumnInfo;
pub use schema::SchemaChange;
pub use store::SqliteRecordStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
