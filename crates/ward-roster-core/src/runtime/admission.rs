// crates/ward-roster-core/src/runtime/admission.rs
// ============================================================================
// Module: Ward Roster Admission Service
// Description: Review queue for enrolled staff awaiting admission.
// Purpose: List, approve, and reject pending staff records.
// Dependencies: crate::{core, interfaces, runtime::directory}, serde
// ============================================================================

//! ## Overview
//! Pending staff are the rows whose `state` is at or below the configured
//! threshold. Approval resets `state` to zero (admitted, no admin rights);
//! rejection deletes the row. Both only act on rows that are still pending:
//! an admitted record keeps its admin bits and its row. Batch operations
//! report one outcome per record so a single failure does not hide the others.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::Record;
use crate::core::RecordId;
use crate::interfaces::FieldFilter;
use crate::interfaces::MatchMode;
use crate::interfaces::RecordStore;
use crate::interfaces::StoreError;
use crate::runtime::directory::DirectoryError;
use crate::runtime::directory::DirectorySettings;
use crate::runtime::directory::STATE_COLUMN;
use crate::runtime::directory::StaffProfile;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result of approving or rejecting one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionOutcome {
    /// Target record.
    pub id: RecordId,
    /// Whether the write succeeded.
    pub succeeded: bool,
    /// Failure reason when it did not.
    pub error: Option<String>,
}

impl AdmissionOutcome {
    /// Builds an outcome from a store result.
    fn from_result(id: RecordId, result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self {
                id,
                succeeded: true,
                error: None,
            },
            Err(err) => Self {
                id,
                succeeded: false,
                error: Some(err.to_string()),
            },
        }
    }
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Admission review over a record store.
#[derive(Debug, Clone)]
pub struct AdmissionService<S> {
    /// Backing store.
    store: S,
    /// Staff table settings.
    settings: DirectorySettings,
}

impl<S: RecordStore> AdmissionService<S> {
    /// Creates an admission service.
    #[must_use]
    pub const fn new(store: S, settings: DirectorySettings) -> Self {
        Self {
            store,
            settings,
        }
    }

    /// Lists staff awaiting admission.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on store failure or malformed rows.
    pub fn pending(&self) -> Result<Vec<StaffProfile>, DirectoryError> {
        let filter = FieldFilter::new().le(STATE_COLUMN, self.settings.pending_threshold);
        self.store
            .fetch_matching(&self.settings.table, &filter, MatchMode::All)?
            .iter()
            .map(|row| StaffProfile::from_row(row, &self.settings))
            .collect()
    }

    /// Admits each pending record by resetting its state to zero.
    #[must_use]
    pub fn approve(&self, ids: &[RecordId]) -> Vec<AdmissionOutcome> {
        let admitted = Record::new().with(STATE_COLUMN, 0_i64);
        ids.iter()
            .map(|id| {
                let result = self
                    .awaiting(*id)
                    .and_then(|()| self.store.update_by_id(&self.settings.table, *id, &admitted));
                AdmissionOutcome::from_result(*id, result)
            })
            .collect()
    }

    /// Rejects each pending record by deleting it.
    #[must_use]
    pub fn reject(&self, ids: &[RecordId]) -> Vec<AdmissionOutcome> {
        ids.iter()
            .map(|id| {
                let result = self
                    .awaiting(*id)
                    .and_then(|()| self.store.delete_by_id(&self.settings.table, *id));
                AdmissionOutcome::from_result(*id, result)
            })
            .collect()
    }

    /// Confirms `id` names a row whose state is still at or below the threshold.
    fn awaiting(&self, id: RecordId) -> Result<(), StoreError> {
        let filter = FieldFilter::new()
            .eq(self.settings.id_column.as_str(), id.get())
            .le(STATE_COLUMN, self.settings.pending_threshold);
        let rows = self.store.fetch_matching(&self.settings.table, &filter, MatchMode::All)?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(format!(
                "{} row {id} awaiting admission",
                self.settings.table
            )));
        }
        Ok(())
    }
}
