// crates/ward-roster-core/src/runtime/directory.rs
// ============================================================================
// Module: Ward Roster Directory Service
// Description: Staff enrollment, login, lookup, and profile edits.
// Purpose: Apply directory workflow rules on top of a record store.
// Dependencies: crate::{core, interfaces}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`DirectoryService`] owns the staff table rules: enrollment creates a
//! pending record, login compares the stored password, and profile edits
//! write only the fields the user changed. Employee numbers are fixed-width
//! digit strings on input and integers in storage.
//!
//! Security posture: passwords are stored and compared as plain text, exactly
//! as the staff table holds them. They never appear in errors or profiles.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ColumnName;
use crate::core::PENDING_STATE;
use crate::core::PermissionError;
use crate::core::PermissionState;
use crate::core::Record;
use crate::core::RecordId;
use crate::core::TableName;
use crate::core::default_pages;
use crate::interfaces::FieldFilter;
use crate::interfaces::MatchMode;
use crate::interfaces::RecordStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Columns
// ============================================================================

/// Staff display name column.
pub const NAME_COLUMN: &str = "name";
/// Employee number column.
pub const NUMBER_COLUMN: &str = "number";
/// Department column.
pub const SECTION_COLUMN: &str = "section";
/// Plain-text password column.
pub const PASSWORD_COLUMN: &str = "password";
/// Encoded permission state column.
pub const STATE_COLUMN: &str = "state";

/// Default employee number width.
pub const DEFAULT_EMPLOYEE_NUMBER_DIGITS: usize = 5;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Directory workflow errors.
///
/// # Invariants
/// - Messages never include passwords.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A required form field was blank.
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    /// Employee number is not exactly the configured number of digits.
    #[error("employee number must be exactly {digits} digits")]
    InvalidNumber {
        /// Required digit count.
        digits: usize,
    },
    /// Login credentials contained non-digit characters.
    #[error("employee number and password must be numeric")]
    NonNumericCredentials,
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Name or number already enrolled.
    #[error("employee is already registered")]
    AlreadyRegistered,
    /// No record carries the employee number.
    #[error("unknown employee number")]
    UnknownEmployee,
    /// Stored password differs.
    #[error("wrong password")]
    WrongPassword,
    /// Operation requires an admitted user.
    #[error("employee is awaiting admission")]
    Pending,
    /// Edited permission vector has the wrong width.
    #[error("permission vector must have {expected} bits, got {found}")]
    BitWidth {
        /// Registered page count.
        expected: usize,
        /// Supplied bit count.
        found: usize,
    },
    /// Stored staff row lacks a required column.
    #[error("malformed staff record: {0}")]
    MalformedRecord(String),
    /// Permission codec failure.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DirectoryError {
    /// Returns a stable code for message catalogs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidNumber {
                ..
            } => "invalid_number",
            Self::NonNumericCredentials => "non_numeric_credentials",
            Self::PasswordMismatch => "password_mismatch",
            Self::AlreadyRegistered => "already_registered",
            Self::UnknownEmployee => "unknown_employee",
            Self::WrongPassword => "wrong_password",
            Self::Pending => "pending",
            Self::BitWidth {
                ..
            } => "bit_width",
            Self::MalformedRecord(_) => "malformed_record",
            Self::Permission(_) => "permission",
            Self::Store(_) => "store",
        }
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Directory table layout and validation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    /// Staff table.
    pub table: TableName,
    /// Identifier column of the staff table.
    pub id_column: ColumnName,
    /// Exact employee number width.
    pub employee_number_digits: usize,
    /// States at or below this value are awaiting admission.
    pub pending_threshold: i64,
    /// Number of registered pages (permission vector width).
    pub page_count: usize,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            table: TableName::default_directory(),
            id_column: ColumnName::default_id(),
            employee_number_digits: DEFAULT_EMPLOYEE_NUMBER_DIGITS,
            pending_threshold: PENDING_STATE,
            page_count: default_pages().len(),
        }
    }
}

// ============================================================================
// SECTION: Forms And Views
// ============================================================================

/// Enrollment form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentForm {
    /// Display name.
    pub name: String,
    /// Employee number as typed.
    pub number: String,
    /// Department.
    pub section: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

/// Profile edit input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,
    /// New department.
    pub section: String,
    /// New employee number as typed.
    pub number: String,
    /// Optional new password; blank keeps the stored one.
    pub new_password: Option<String>,
    /// Confirmation of the new password.
    pub confirm_password: Option<String>,
}

/// Public view of a staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffProfile {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Department.
    pub section: String,
    /// Employee number.
    pub number: i64,
}

impl StaffProfile {
    /// Extracts the profile fields from a staff row.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::MalformedRecord`] when the identifier or
    /// employee number is missing.
    pub fn from_row(row: &Record, settings: &DirectorySettings) -> Result<Self, DirectoryError> {
        let id = row.get_i64(settings.id_column.as_str()).ok_or_else(|| {
            DirectoryError::MalformedRecord(format!("missing {}", settings.id_column))
        })?;
        let number = row
            .get_i64(NUMBER_COLUMN)
            .or_else(|| row.get_text(NUMBER_COLUMN).and_then(|text| text.trim().parse().ok()))
            .ok_or_else(|| DirectoryError::MalformedRecord(format!("missing {NUMBER_COLUMN}")))?;
        Ok(Self {
            id: RecordId::new(id),
            name: row.get_text(NAME_COLUMN).unwrap_or_default(),
            section: row.get_text(SECTION_COLUMN).unwrap_or_default(),
            number,
        })
    }
}

/// Signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Department.
    pub section: String,
    /// Employee number.
    pub number: i64,
    /// Decoded permission state.
    pub permissions: PermissionState,
}

impl Session {
    /// Builds a session from a staff row.
    fn from_row(row: &Record, settings: &DirectorySettings) -> Result<Self, DirectoryError> {
        let profile = StaffProfile::from_row(row, settings)?;
        let permissions = decode_state(row, settings)?;
        Ok(Self {
            id: profile.id,
            name: profile.name,
            section: profile.section,
            number: profile.number,
            permissions,
        })
    }

    /// Returns the public profile view.
    #[must_use]
    pub fn profile(&self) -> StaffProfile {
        StaffProfile {
            id: self.id,
            name: self.name.clone(),
            section: self.section.clone(),
            number: self.number,
        }
    }
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Returns the trimmed value or a missing-field error.
fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DirectoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() { Err(DirectoryError::MissingField(field)) } else { Ok(trimmed) }
}

/// Parses an employee number that must be exactly `digits` ASCII digits.
///
/// # Errors
///
/// Returns [`DirectoryError::InvalidNumber`] for any other input.
pub fn parse_employee_number(raw: &str, digits: usize) -> Result<i64, DirectoryError> {
    let raw = raw.trim();
    if raw.len() != digits || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(DirectoryError::InvalidNumber {
            digits,
        });
    }
    raw.parse::<i64>().map_err(|_| DirectoryError::InvalidNumber {
        digits,
    })
}

/// Decodes the `state` column of a staff row.
pub(crate) fn decode_state(
    row: &Record,
    settings: &DirectorySettings,
) -> Result<PermissionState, DirectoryError> {
    let raw = row
        .get_i64(STATE_COLUMN)
        .ok_or_else(|| DirectoryError::MalformedRecord(format!("missing {STATE_COLUMN}")))?;
    Ok(PermissionState::from_stored(raw, settings.page_count)?)
}

/// Fetches the staff row carrying `number`.
pub(crate) fn fetch_by_number<S: RecordStore>(
    store: &S,
    settings: &DirectorySettings,
    number: i64,
) -> Result<Record, DirectoryError> {
    store
        .fetch_matching(&settings.table, &FieldFilter::new().eq(NUMBER_COLUMN, number), MatchMode::All)?
        .into_iter()
        .next()
        .ok_or(DirectoryError::UnknownEmployee)
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Staff directory workflows over a record store.
#[derive(Debug, Clone)]
pub struct DirectoryService<S> {
    /// Backing store.
    store: S,
    /// Table layout and validation settings.
    settings: DirectorySettings,
}

impl<S: RecordStore> DirectoryService<S> {
    /// Creates a directory service.
    #[must_use]
    pub const fn new(store: S, settings: DirectorySettings) -> Self {
        Self {
            store,
            settings,
        }
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &DirectorySettings {
        &self.settings
    }

    /// Enrolls a new staff member in the pending state.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when a field is blank, the number has the
    /// wrong width, the passwords differ, the name or number is already
    /// enrolled, or the store fails.
    pub fn enroll(&self, form: &EnrollmentForm) -> Result<RecordId, DirectoryError> {
        let name = required("name", &form.name)?;
        let section = required("section", &form.section)?;
        required("number", &form.number)?;
        if form.password.is_empty() {
            return Err(DirectoryError::MissingField("password"));
        }
        if form.confirm_password.is_empty() {
            return Err(DirectoryError::MissingField("confirm_password"));
        }
        let number = parse_employee_number(&form.number, self.settings.employee_number_digits)?;
        if form.password != form.confirm_password {
            return Err(DirectoryError::PasswordMismatch);
        }

        let duplicates = FieldFilter::new().eq(NAME_COLUMN, name).eq(NUMBER_COLUMN, number);
        if !self.store.fetch_matching(&self.settings.table, &duplicates, MatchMode::Any)?.is_empty()
        {
            return Err(DirectoryError::AlreadyRegistered);
        }

        let record = Record::new()
            .with(NAME_COLUMN, name)
            .with(NUMBER_COLUMN, number)
            .with(SECTION_COLUMN, section)
            .with(PASSWORD_COLUMN, form.password.as_str())
            .with(STATE_COLUMN, PENDING_STATE);
        Ok(self.store.insert(&self.settings.table, &record, &self.settings.id_column)?)
    }

    /// Signs a staff member in.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for blank or non-numeric input, a number of
    /// the wrong width, an unknown number, a wrong password, or store failure.
    pub fn login(&self, number: &str, password: &str) -> Result<Session, DirectoryError> {
        let number = number.trim();
        if number.is_empty() || password.is_empty() {
            return Err(DirectoryError::MissingField("credentials"));
        }
        let numeric = |value: &str| value.bytes().all(|byte| byte.is_ascii_digit());
        if !numeric(number) || !numeric(password) {
            return Err(DirectoryError::NonNumericCredentials);
        }
        let number = parse_employee_number(number, self.settings.employee_number_digits)?;

        let row = fetch_by_number(&self.store, &self.settings, number)?;
        if row.get_text(PASSWORD_COLUMN).as_deref() != Some(password) {
            return Err(DirectoryError::WrongPassword);
        }
        Session::from_row(&row, &self.settings)
    }

    /// Returns every staff profile carrying `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for a blank name or store failure.
    pub fn lookup_by_name(&self, name: &str) -> Result<Vec<StaffProfile>, DirectoryError> {
        let name = required("name", name)?;
        self.store
            .fetch_matching(
                &self.settings.table,
                &FieldFilter::new().eq(NAME_COLUMN, name),
                MatchMode::All,
            )?
            .iter()
            .map(|row| StaffProfile::from_row(row, &self.settings))
            .collect()
    }

    /// Applies a profile edit for the signed-in user.
    ///
    /// The stored password only changes when a new one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for a blank name, a number of the wrong
    /// width, mismatched passwords, a missing record, or store failure.
    pub fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), DirectoryError> {
        let name = required("name", &update.name)?;
        let new_password = update.new_password.as_deref().filter(|password| !password.is_empty());
        if let Some(password) = new_password
            && update.confirm_password.as_deref() != Some(password)
        {
            return Err(DirectoryError::PasswordMismatch);
        }
        let number = parse_employee_number(&update.number, self.settings.employee_number_digits)?;

        let mut record = Record::new()
            .with(NAME_COLUMN, name)
            .with(SECTION_COLUMN, update.section.trim())
            .with(NUMBER_COLUMN, number);
        if let Some(password) = new_password {
            record.insert(PASSWORD_COLUMN, password);
        }
        self.store.update_by_id(&self.settings.table, session.id, &record)?;
        Ok(())
    }
}
