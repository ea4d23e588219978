// crates/ward-roster-core/src/core/mod.rs
// ============================================================================
// Module: Ward Roster Core Types
// Description: Identifiers, records, radix conversion, permissions, and pages.
// Purpose: Group the storage-independent building blocks of the roster.
// Dependencies: bigdecimal, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types shared by every Ward Roster crate. Nothing here touches storage;
//! the store backends and the runtime services depend on these definitions.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod pages;
pub mod permission;
pub mod radix;
pub mod record;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::ColumnName;
pub use identifiers::DEFAULT_DIRECTORY_TABLE;
pub use identifiers::DEFAULT_ID_COLUMN;
pub use identifiers::IdentifierError;
pub use identifiers::MAX_IDENTIFIER_LENGTH;
pub use identifiers::RecordId;
pub use identifiers::TableName;
pub use identifiers::is_valid_identifier;
pub use pages::PageDescriptor;
pub use pages::PageRegistry;
pub use pages::PageVisibility;
pub use pages::default_pages;
pub use permission::AccessLevel;
pub use permission::PENDING_STATE;
pub use permission::PermissionBits;
pub use permission::PermissionError;
pub use permission::PermissionState;
pub use permission::authorize;
pub use permission::is_admin;
pub use permission::to_bits;
pub use permission::to_state;
pub use radix::ConvertError;
pub use radix::MAX_RADIX;
pub use radix::MIN_RADIX;
pub use radix::convert;
pub use record::ColumnType;
pub use record::Record;
pub use record::Value;
