// crates/ward-roster-core/tests/directory.rs
// ============================================================================
// Module: Directory Workflow Tests
// Description: Enrollment, login, admission, and admin-state editing.
// Purpose: Exercise the staff lifecycle from enrollment to page admin rights.
// ============================================================================

//! ## Overview
//! Runs every directory service against the in-memory store.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use ward_roster_core::AdminStateEditor;
use ward_roster_core::AdmissionService;
use ward_roster_core::DirectoryError;
use ward_roster_core::DirectoryService;
use ward_roster_core::DirectorySettings;
use ward_roster_core::EnrollmentForm;
use ward_roster_core::InMemoryRecordStore;
use ward_roster_core::PermissionError;
use ward_roster_core::PermissionState;
use ward_roster_core::ProfileUpdate;
use ward_roster_core::RecordId;
use ward_roster_core::RecordStore;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn form(name: &str, number: &str, password: &str) -> EnrollmentForm {
    EnrollmentForm {
        name: name.to_string(),
        number: number.to_string(),
        section: "Cardiology".to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

fn enrolled(store: &InMemoryRecordStore) -> RecordId {
    let directory = DirectoryService::new(store, DirectorySettings::default());
    directory.enroll(&form("Li Ming", "10001", "123")).unwrap()
}

fn admitted(store: &InMemoryRecordStore) -> RecordId {
    let id = enrolled(store);
    let admission = AdmissionService::new(store, DirectorySettings::default());
    assert!(admission.approve(&[id])[0].succeeded);
    id
}

// ============================================================================
// SECTION: Enrollment
// ============================================================================

#[test]
fn enroll_creates_pending_record() {
    let store = InMemoryRecordStore::new();
    let id = enrolled(&store);
    assert_eq!(id, RecordId::new(1));

    let settings = DirectorySettings::default();
    let row = store.fetch_latest(&settings.table).unwrap().unwrap();
    assert_eq!(row.get_i64("state"), Some(-1));
    assert_eq!(row.get_i64("number"), Some(10001));
    assert_eq!(row.get_text("password").as_deref(), Some("123"));
}

#[test]
fn enroll_validates_form() {
    let store = InMemoryRecordStore::new();
    let directory = DirectoryService::new(&store, DirectorySettings::default());

    let blank = form(" ", "10001", "1");
    assert!(matches!(directory.enroll(&blank), Err(DirectoryError::MissingField("name"))));

    let short = form("Li", "1234", "1");
    assert!(matches!(directory.enroll(&short), Err(DirectoryError::InvalidNumber { digits: 5 })));

    let mut mismatch = form("Li", "12345", "1");
    mismatch.confirm_password = "2".to_string();
    assert!(matches!(directory.enroll(&mismatch), Err(DirectoryError::PasswordMismatch)));

    assert!(store.fetch_table(&DirectorySettings::default().table).unwrap().is_empty());
}

#[test]
fn enroll_rejects_duplicate_name_or_number() {
    let store = InMemoryRecordStore::new();
    enrolled(&store);
    let directory = DirectoryService::new(&store, DirectorySettings::default());
    assert!(matches!(
        directory.enroll(&form("Li Ming", "20002", "1")),
        Err(DirectoryError::AlreadyRegistered)
    ));
    assert!(matches!(
        directory.enroll(&form("Other", "10001", "1")),
        Err(DirectoryError::AlreadyRegistered)
    ));
    assert_eq!(directory.enroll(&form("Other", "20002", "1")).unwrap(), RecordId::new(2));
}

// ============================================================================
// SECTION: Login And Lookup
// ============================================================================

#[test]
fn login_checks_credentials() {
    let store = InMemoryRecordStore::new();
    enrolled(&store);
    let directory = DirectoryService::new(&store, DirectorySettings::default());

    assert!(matches!(directory.login("", "1"), Err(DirectoryError::MissingField(_))));
    assert!(matches!(directory.login("1000a", "1"), Err(DirectoryError::NonNumericCredentials)));
    assert!(matches!(directory.login("10001", "abc"), Err(DirectoryError::NonNumericCredentials)));
    assert!(matches!(directory.login("100011", "1"), Err(DirectoryError::InvalidNumber { .. })));
    assert!(matches!(directory.login("99999", "123"), Err(DirectoryError::UnknownEmployee)));
    assert!(matches!(directory.login("10001", "124"), Err(DirectoryError::WrongPassword)));

    let session = directory.login("10001", "123").unwrap();
    assert_eq!(session.name, "Li Ming");
    assert_eq!(session.permissions, PermissionState::Pending);
    assert_eq!(session.permissions.bit_string(), "");
}

#[test]
fn lookup_hides_passwords() {
    let store = InMemoryRecordStore::new();
    enrolled(&store);
    let directory = DirectoryService::new(&store, DirectorySettings::default());
    let profiles = directory.lookup_by_name("Li Ming").unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].number, 10001);
    let json = serde_json::to_string(&profiles[0]).unwrap();
    assert!(!json.contains("password"));
    assert!(directory.lookup_by_name("Nobody").unwrap().is_empty());
}

#[test]
fn update_profile_keeps_password_unless_supplied() {
    let store = InMemoryRecordStore::new();
    admitted(&store);
    let directory = DirectoryService::new(&store, DirectorySettings::default());
    let session = directory.login("10001", "123").unwrap();

    let update = ProfileUpdate {
        name: "Li Hua".to_string(),
        section: "Surgery".to_string(),
        number: "10001".to_string(),
        new_password: Some(String::new()),
        confirm_password: None,
    };
    directory.update_profile(&session, &update).unwrap();
    let session = directory.login("10001", "123").unwrap();
    assert_eq!(session.name, "Li Hua");
    assert_eq!(session.section, "Surgery");

    let mismatch = ProfileUpdate {
        new_password: Some("456".to_string()),
        confirm_password: Some("457".to_string()),
        ..update.clone()
    };
    assert!(matches!(
        directory.update_profile(&session, &mismatch),
        Err(DirectoryError::PasswordMismatch)
    ));

    let change = ProfileUpdate {
        new_password: Some("456".to_string()),
        confirm_password: Some("456".to_string()),
        ..update
    };
    directory.update_profile(&session, &change).unwrap();
    assert!(matches!(directory.login("10001", "123"), Err(DirectoryError::WrongPassword)));
    assert!(directory.login("10001", "456").is_ok());
}

// ============================================================================
// SECTION: Admission
// ============================================================================

#[test]
fn admission_lists_approves_and_rejects() {
    let store = InMemoryRecordStore::new();
    let directory = DirectoryService::new(&store, DirectorySettings::default());
    let first = directory.enroll(&form("Li", "10001", "1")).unwrap();
    let second = directory.enroll(&form("Wang", "10002", "1")).unwrap();
    let admission = AdmissionService::new(&store, DirectorySettings::default());

    let pending: Vec<RecordId> = admission.pending().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(pending, vec![first, second]);

    let outcomes = admission.approve(&[first, RecordId::new(77)]);
    assert!(outcomes[0].succeeded);
    assert!(!outcomes[1].succeeded);
    assert!(outcomes[1].error.is_some());

    let session = directory.login("10001", "1").unwrap();
    assert_eq!(session.permissions.bit_string(), "00000");

    assert!(admission.reject(&[second])[0].succeeded);
    assert!(admission.pending().unwrap().is_empty());
    assert!(!admission.reject(&[second])[0].succeeded);
}

#[test]
fn approve_leaves_admitted_admin_bits_untouched() {
    let store = InMemoryRecordStore::new();
    let id = admitted(&store);
    let editor = AdminStateEditor::new(&store, DirectorySettings::default());
    editor.set_page_admin("10001", 1, true).unwrap();

    let admission = AdmissionService::new(&store, DirectorySettings::default());
    let outcomes = admission.approve(&[id]);
    assert!(!outcomes[0].succeeded);
    assert!(outcomes[0].error.is_some());
    assert_eq!(editor.load("10001").unwrap().state.bit_string(), "10000");
}

#[test]
fn reject_keeps_admitted_record() {
    let store = InMemoryRecordStore::new();
    let id = admitted(&store);
    let admission = AdmissionService::new(&store, DirectorySettings::default());
    assert!(!admission.reject(&[id])[0].succeeded);

    let directory = DirectoryService::new(&store, DirectorySettings::default());
    assert!(directory.login("10001", "123").is_ok());
}

#[test]
fn pending_list_of_empty_directory_is_empty() {
    let store = InMemoryRecordStore::new();
    let admission = AdmissionService::new(&store, DirectorySettings::default());
    assert!(admission.pending().unwrap().is_empty());
}

// ============================================================================
// SECTION: Admin State
// ============================================================================

#[test]
fn admin_state_toggles_single_pages() {
    let store = InMemoryRecordStore::new();
    admitted(&store);
    let editor = AdminStateEditor::new(&store, DirectorySettings::default());

    let view = editor.set_page_admin("10001", 5, true).unwrap();
    assert_eq!(view.state.bit_string(), "00001");
    let view = editor.set_page_admin("10001", 2, true).unwrap();
    assert_eq!(view.state.bit_string(), "01001");

    let row = store.fetch_latest(&DirectorySettings::default().table).unwrap().unwrap();
    assert_eq!(row.get_i64("state"), Some(9));

    let view = editor.set_page_admin("10001", 5, false).unwrap();
    assert_eq!(view.state.bit_string(), "01000");
    assert!(editor.load("10001").unwrap().state.is_admin(2));
}

#[test]
fn admin_state_rejects_pending_and_out_of_range() {
    let store = InMemoryRecordStore::new();
    enrolled(&store);
    let editor = AdminStateEditor::new(&store, DirectorySettings::default());
    assert!(matches!(editor.set_page_admin("10001", 1, true), Err(DirectoryError::Pending)));
    assert!(matches!(editor.replace("10001", "10000"), Err(DirectoryError::Pending)));

    let admission = AdmissionService::new(&store, DirectorySettings::default());
    assert!(admission.approve(&[RecordId::new(1)])[0].succeeded);
    assert!(matches!(
        editor.set_page_admin("10001", 6, true),
        Err(DirectoryError::Permission(PermissionError::PageIndex { index: 6, width: 5 }))
    ));
    assert!(matches!(editor.load("20002"), Err(DirectoryError::UnknownEmployee)));
}

#[test]
fn admin_state_replace_checks_width() {
    let store = InMemoryRecordStore::new();
    admitted(&store);
    let editor = AdminStateEditor::new(&store, DirectorySettings::default());
    assert!(matches!(
        editor.replace("10001", "101"),
        Err(DirectoryError::BitWidth { expected: 5, found: 3 })
    ));
    let view = editor.replace("10001", "10101").unwrap();
    assert_eq!(view.state.to_stored().unwrap(), 21);
}

#[test]
fn admin_pages_gate_session_visibility() {
    let store = InMemoryRecordStore::new();
    admitted(&store);
    let editor = AdminStateEditor::new(&store, DirectorySettings::default());
    editor.set_page_admin("10001", 5, true).unwrap();

    let directory = DirectoryService::new(&store, DirectorySettings::default());
    let session = directory.login("10001", "123").unwrap();
    let registry = ward_roster_core::PageRegistry::default();
    let visible: Vec<bool> =
        registry.visibility(Some(&session.permissions)).iter().map(|page| page.visible).collect();
    assert_eq!(visible, vec![true, true, true, true, true]);

    let signed_out: Vec<bool> = registry.visibility(None).iter().map(|page| page.visible).collect();
    assert_eq!(signed_out, vec![false; 5]);
}
