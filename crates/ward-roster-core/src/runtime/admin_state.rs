// crates/ward-roster-core/src/runtime/admin_state.rs
// ============================================================================
// Module: Ward Roster Admin-State Editor
// Description: Per-page admin rights editing for admitted staff.
// Purpose: Decode, edit, and re-encode the stored permission state.
// Dependencies: crate::{core, interfaces, runtime::directory}, serde
// ============================================================================

//! ## Overview
//! The editor loads a staff record by employee number, decodes its `state`
//! at the registered page width, and writes back edits through the codec.
//! Pending users have no bit vector to edit; admission comes first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::PermissionBits;
use crate::core::PermissionError;
use crate::core::PermissionState;
use crate::core::Record;
use crate::core::RecordId;
use crate::interfaces::RecordStore;
use crate::runtime::directory::DirectoryError;
use crate::runtime::directory::DirectorySettings;
use crate::runtime::directory::STATE_COLUMN;
use crate::runtime::directory::StaffProfile;
use crate::runtime::directory::decode_state;
use crate::runtime::directory::fetch_by_number;
use crate::runtime::directory::parse_employee_number;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Decoded permission view of one staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStateView {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Employee number.
    pub number: i64,
    /// Decoded state.
    pub state: PermissionState,
}

impl AdminStateView {
    /// Returns the admin bits of an admitted user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Pending`] for users awaiting admission.
    pub fn bits(&self) -> Result<&PermissionBits, DirectoryError> {
        match &self.state {
            PermissionState::Pending => Err(DirectoryError::Pending),
            PermissionState::Active(bits) => Ok(bits),
        }
    }
}

// ============================================================================
// SECTION: Editor
// ============================================================================

/// Admin-state editor over a record store.
#[derive(Debug, Clone)]
pub struct AdminStateEditor<S> {
    /// Backing store.
    store: S,
    /// Staff table settings.
    settings: DirectorySettings,
}

impl<S: RecordStore> AdminStateEditor<S> {
    /// Creates an editor.
    #[must_use]
    pub const fn new(store: S, settings: DirectorySettings) -> Self {
        Self {
            store,
            settings,
        }
    }

    /// Loads and decodes the state of the staff member with `number`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for a malformed or unknown number, a
    /// malformed row, or store failure.
    pub fn load(&self, number: &str) -> Result<AdminStateView, DirectoryError> {
        let number = parse_employee_number(number, self.settings.employee_number_digits)?;
        let row = fetch_by_number(&self.store, &self.settings, number)?;
        let profile = StaffProfile::from_row(&row, &self.settings)?;
        Ok(AdminStateView {
            id: profile.id,
            name: profile.name,
            number: profile.number,
            state: decode_state(&row, &self.settings)?,
        })
    }

    /// Grants or revokes admin rights on one page (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Pending`] for users awaiting admission,
    /// [`DirectoryError::Permission`] for a page outside the registry, and
    /// other [`DirectoryError`]s from loading or writing.
    pub fn set_page_admin(
        &self,
        number: &str,
        page_index: usize,
        admin: bool,
    ) -> Result<AdminStateView, DirectoryError> {
        let view = self.load(number)?;
        if page_index == 0 || page_index > self.settings.page_count {
            return Err(PermissionError::PageIndex {
                index: page_index,
                width: self.settings.page_count,
            }
            .into());
        }
        let mut bits = view.bits()?.clone();
        bits.set_admin(page_index, admin)?;
        self.write(view, bits)
    }

    /// Replaces the whole permission vector with `bit_string`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::BitWidth`] when the vector width differs
    /// from the page count, [`DirectoryError::Pending`] for users awaiting
    /// admission, and other [`DirectoryError`]s from parsing or writing.
    pub fn replace(&self, number: &str, bit_string: &str) -> Result<AdminStateView, DirectoryError> {
        let bits = PermissionBits::from_bit_string(bit_string.trim())?;
        if bits.width() != self.settings.page_count {
            return Err(DirectoryError::BitWidth {
                expected: self.settings.page_count,
                found: bits.width(),
            });
        }
        let view = self.load(number)?;
        view.bits()?;
        self.write(view, bits)
    }

    /// Encodes and stores new bits, returning the updated view.
    fn write(
        &self,
        view: AdminStateView,
        bits: PermissionBits,
    ) -> Result<AdminStateView, DirectoryError> {
        let state = PermissionState::Active(bits);
        let record = Record::new().with(STATE_COLUMN, state.to_stored()?);
        self.store.update_by_id(&self.settings.table, view.id, &record)?;
        Ok(AdminStateView {
            state,
            ..view
        })
    }
}
