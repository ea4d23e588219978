// crates/ward-roster-core/tests/permission.rs
// ============================================================================
// Module: Permission Codec Tests
// Description: Bit vector encoding, pending state, and page authorization.
// Purpose: Pin the stored-state contract and three-tier visibility rules.
// ============================================================================

//! Permission codec and page registry tests.

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

use proptest::prelude::*;
use ward_roster_core::AccessLevel;
use ward_roster_core::PENDING_STATE;
use ward_roster_core::PageDescriptor;
use ward_roster_core::PageRegistry;
use ward_roster_core::PermissionBits;
use ward_roster_core::PermissionError;
use ward_roster_core::PermissionState;
use ward_roster_core::authorize;
use ward_roster_core::is_admin;
use ward_roster_core::to_bits;
use ward_roster_core::to_state;

// ============================================================================
// SECTION: Codec
// ============================================================================

#[test]
fn encodes_states_at_page_width() {
    assert_eq!(to_bits(0, 5).unwrap(), "00000");
    assert_eq!(to_bits(1, 5).unwrap(), "00001");
    assert_eq!(to_bits(16, 5).unwrap(), "10000");
    assert_eq!(to_state("00001").unwrap(), 1);
    assert_eq!(to_state("10100").unwrap(), 20);
}

#[test]
fn wider_states_are_not_truncated() {
    assert_eq!(to_bits(33, 5).unwrap(), "100001");
}

#[test]
fn to_state_rejects_non_binary_input() {
    assert!(matches!(to_state("0201"), Err(PermissionError::Convert(_))));
    assert!(matches!(to_state(""), Err(PermissionError::Convert(_))));
}

#[test]
fn is_admin_reads_msb_first() {
    // 0b10010: pages 1 and 4.
    assert!(is_admin(18, 1, 5));
    assert!(!is_admin(18, 2, 5));
    assert!(is_admin(18, 4, 5));
    assert!(!is_admin(18, 5, 5));
}

#[test]
fn is_admin_out_of_range_is_false() {
    assert!(!is_admin(31, 0, 5));
    assert!(!is_admin(31, 6, 5));
    assert!(!is_admin(1, 8, 3));
}

#[test]
fn narrow_states_decode_missing_positions_as_zero() {
    let bits = PermissionBits::from_bit_string("101").unwrap();
    assert!(bits.is_admin(1));
    assert!(bits.is_admin(3));
    assert!(!bits.is_admin(4));
    assert!(!bits.is_admin(5));
}

// ============================================================================
// SECTION: Bit Vector
// ============================================================================

#[test]
fn set_admin_updates_single_page() {
    let mut bits = PermissionBits::from_state(0, 5).unwrap();
    bits.set_admin(2, true).unwrap();
    bits.set_admin(5, true).unwrap();
    assert_eq!(bits.to_bit_string(), "01001");
    assert_eq!(bits.to_state().unwrap(), 9);
    assert_eq!(bits.admin_pages(), vec![2, 5]);

    bits.set_admin(2, false).unwrap();
    assert_eq!(bits.to_state().unwrap(), 1);
}

#[test]
fn set_admin_rejects_page_outside_vector() {
    let mut bits = PermissionBits::none(5);
    assert_eq!(
        bits.set_admin(6, true),
        Err(PermissionError::PageIndex {
            index: 6,
            width: 5
        })
    );
    assert!(bits.set_admin(0, true).is_err());
}

#[test]
fn from_bit_string_reports_bad_position() {
    assert_eq!(
        PermissionBits::from_bit_string("01x1"),
        Err(PermissionError::InvalidBit {
            position: 3,
            found: 'x'
        })
    );
}

#[test]
fn bits_serialize_as_strings() {
    let bits = PermissionBits::from_bit_string("00110").unwrap();
    assert_eq!(serde_json::to_string(&bits).unwrap(), "\"00110\"");
    let parsed: PermissionBits = serde_json::from_str("\"00110\"").unwrap();
    assert_eq!(parsed, bits);
    assert!(serde_json::from_str::<PermissionBits>("\"012\"").is_err());
}

// ============================================================================
// SECTION: Permission State
// ============================================================================

#[test]
fn negative_states_are_pending() {
    assert_eq!(PermissionState::from_stored(PENDING_STATE, 5).unwrap(), PermissionState::Pending);
    assert_eq!(PermissionState::from_stored(-7, 5).unwrap(), PermissionState::Pending);
    assert_eq!(PermissionState::Pending.to_stored().unwrap(), PENDING_STATE);
    assert_eq!(PermissionState::Pending.bit_string(), "");
    assert!(!PermissionState::Pending.is_admin(1));
}

#[test]
fn zero_is_admitted_without_rights() {
    let state = PermissionState::from_stored(0, 5).unwrap();
    assert!(!state.is_pending());
    assert_eq!(state.bit_string(), "00000");
    assert_eq!(state.to_stored().unwrap(), 0);
}

#[test]
fn permission_state_serializes_tagged() {
    let state = PermissionState::from_stored(3, 5).unwrap();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json, serde_json::json!({"status": "active", "bits": "00011"}));
    let pending = serde_json::to_value(PermissionState::Pending).unwrap();
    assert_eq!(pending, serde_json::json!({"status": "pending"}));
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

#[test]
fn authorize_applies_three_tiers() {
    let admin_of_two = PermissionState::from_stored(8, 5).unwrap();
    let pending = PermissionState::Pending;

    assert!(authorize(AccessLevel::Public, None, 1));
    assert!(!authorize(AccessLevel::Authenticated, None, 1));
    assert!(!authorize(AccessLevel::PageAdmin, None, 2));

    assert!(authorize(AccessLevel::Authenticated, Some(&pending), 1));
    assert!(!authorize(AccessLevel::PageAdmin, Some(&pending), 2));

    assert!(authorize(AccessLevel::PageAdmin, Some(&admin_of_two), 2));
    assert!(!authorize(AccessLevel::PageAdmin, Some(&admin_of_two), 3));
}

#[test]
fn access_levels_map_numeric_tiers() {
    for level in 0 ..= 2 {
        assert_eq!(AccessLevel::from_level(level).unwrap().level(), level);
    }
    assert_eq!(AccessLevel::from_level(3), None);
}

#[test]
fn registry_visibility_combines_enabled_flag_and_tier() {
    let page = |name: &str, enabled: bool, access: AccessLevel| PageDescriptor {
        name: name.to_string(),
        file: format!("pages/{name}.toml"),
        enabled,
        template: None,
        access,
    };
    let registry = PageRegistry::new(vec![
        page("news", true, AccessLevel::Public),
        page("log", true, AccessLevel::Authenticated),
        page("archive", false, AccessLevel::Authenticated),
        page("maintenance", true, AccessLevel::PageAdmin),
    ]);
    assert_eq!(registry.page_count(), 4);
    assert_eq!(registry.index_of("maintenance"), Some(4));
    assert_eq!(registry.page(1).map(|page| page.name.as_str()), Some("news"));
    assert!(registry.page(0).is_none());

    let anonymous: Vec<bool> = registry.visibility(None).iter().map(|v| v.visible).collect();
    assert_eq!(anonymous, vec![true, false, false, false]);

    let maintainer = PermissionState::from_stored(1, 4).unwrap();
    let visible: Vec<bool> =
        registry.visibility(Some(&maintainer)).iter().map(|v| v.visible).collect();
    assert_eq!(visible, vec![true, true, false, true]);
}

#[test]
fn default_registry_has_five_pages() {
    let registry = PageRegistry::default();
    assert_eq!(registry.page_count(), 5);
    assert_eq!(registry.page(5).unwrap().access, AccessLevel::PageAdmin);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn bits_round_trip_through_state(state in 0_u64 .. 1 << 20, page_count in 1_usize .. 24) {
        let bits = to_bits(state, page_count).unwrap();
        prop_assert!(bits.len() >= page_count);
        prop_assert_eq!(to_state(&bits).unwrap(), state);
        for index in 1 ..= page_count {
            let expected = bits.as_bytes()[index - 1] == b'1';
            prop_assert_eq!(is_admin(state, index, page_count), expected);
        }
    }
}
