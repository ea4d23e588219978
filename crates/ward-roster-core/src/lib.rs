// crates/ward-roster-core/src/lib.rs
// ============================================================================
// Module: Ward Roster Core Library
// Description: Public API surface for the Ward Roster core.
// Purpose: Expose record types, the permission codec, interfaces, and services.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Ward Roster core provides the schema-flexible record model, the
//! bitmask-encoded permission codec, and the staff directory services built on
//! top of them. It is storage-agnostic and integrates through the
//! [`RecordStore`] interface; the `SQLite` backend lives in its own crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::Comparison;
pub use interfaces::FailClosed;
pub use interfaces::FieldCondition;
pub use interfaces::FieldFilter;
pub use interfaces::MatchMode;
pub use interfaces::RecordStore;
pub use interfaces::StoreError;
pub use runtime::AdminStateEditor;
pub use runtime::AdminStateView;
pub use runtime::AdmissionOutcome;
pub use runtime::AdmissionService;
pub use runtime::DirectoryError;
pub use runtime::DirectoryService;
pub use runtime::DirectorySettings;
pub use runtime::EnrollmentForm;
pub use runtime::InMemoryRecordStore;
pub use runtime::ProfileUpdate;
pub use runtime::Session;
pub use runtime::StaffProfile;
