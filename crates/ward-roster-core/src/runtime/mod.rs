// crates/ward-roster-core/src/runtime/mod.rs
// ============================================================================
// Module: Ward Roster Runtime
// Description: Staff directory, admission, and admin-state services.
// Purpose: Drive roster workflows over any record store backend.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime services hold the workflow rules (enrollment checks, login,
//! admission, permission editing) and delegate persistence to a
//! [`crate::interfaces::RecordStore`]. Every front end calls into the same
//! services so the rules stay in one place.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod admin_state;
pub mod admission;
pub mod directory;
pub mod memory;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use admin_state::AdminStateEditor;
pub use admin_state::AdminStateView;
pub use admission::AdmissionOutcome;
pub use admission::AdmissionService;
pub use directory::DEFAULT_EMPLOYEE_NUMBER_DIGITS;
pub use directory::DirectoryError;
pub use directory::DirectoryService;
pub use directory::DirectorySettings;
pub use directory::EnrollmentForm;
pub use directory::ProfileUpdate;
pub use directory::Session;
pub use directory::StaffProfile;
pub use memory::InMemoryRecordStore;
