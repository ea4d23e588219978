// crates/ward-roster-core/src/core/permission.rs
// ============================================================================
// Module: Ward Roster Permission Codec
// Description: Bitmask-encoded per-page admin rights and page authorization.
// Purpose: Map the stored `state` integer to and from a per-page bit vector.
// Dependencies: crate::core::radix, serde, thiserror
// ============================================================================

//! ## Overview
//! A staff record stores its permissions in one integer column, `state`. Its
//! binary representation, most significant bit first and left-padded to the
//! number of registered pages, is a bit vector: position `i` (1-indexed) grants
//! admin rights on page `i`. Negative stored values mark a user still awaiting
//! admission and decode to [`PermissionState::Pending`].
//!
//! All encoding goes through [`crate::core::radix::convert`] (radix 10 <-> 2).
//! Decoding tolerates states encoded when fewer pages existed: positions that
//! a narrower bit string does not cover read as "not admin".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::radix::ConvertError;
use crate::core::radix::convert;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Stored `state` value for users awaiting admission.
pub const PENDING_STATE: i64 = -1;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Permission codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Underlying radix conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// Decoded state does not fit the storage integer.
    #[error("permission state out of range: {0}")]
    Overflow(String),
    /// Bit string contained something other than `0` or `1`.
    #[error("invalid permission bit '{found}' at position {position}")]
    InvalidBit {
        /// 1-indexed position of the offending character.
        position: usize,
        /// Offending character.
        found: char,
    },
    /// Page index outside the bit vector.
    #[error("page index {index} outside 1..={width}")]
    PageIndex {
        /// Requested 1-indexed page.
        index: usize,
        /// Current bit vector width.
        width: usize,
    },
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Encodes a decimal state as a bit string padded to `page_count` digits.
///
/// # Errors
///
/// Returns [`PermissionError::Convert`] if the radix conversion fails.
pub fn to_bits(state: u64, page_count: usize) -> Result<String, PermissionError> {
    Ok(convert(&state.to_string(), 10, 2, page_count)?)
}

/// Decodes a bit string back into its decimal state.
///
/// # Errors
///
/// Returns [`PermissionError::Convert`] for empty or non-binary input and
/// [`PermissionError::Overflow`] when the value exceeds `u64`.
pub fn to_state(bits: &str) -> Result<u64, PermissionError> {
    let decimal = convert(bits, 2, 10, 0)?;
    decimal.parse::<u64>().map_err(|_| PermissionError::Overflow(decimal))
}

/// Returns whether `state` grants admin rights on `page_index` (1-indexed).
///
/// Out-of-range indices yield `false` rather than an error.
#[must_use]
pub fn is_admin(state: u64, page_index: usize, page_count: usize) -> bool {
    if page_index == 0 || page_index > page_count {
        return false;
    }
    to_bits(state, page_count)
        .is_ok_and(|bits| bits.as_bytes().get(page_index - 1).is_some_and(|bit| *bit == b'1'))
}

// ============================================================================
// SECTION: Bit Vector
// ============================================================================

/// Per-page admin bit vector, most significant (page 1) first.
///
/// # Invariants
/// - `bits[i]` describes page `i + 1`.
/// - Serializes as a `0`/`1` string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PermissionBits {
    /// Admin flags in page order.
    bits: Vec<bool>,
}

impl PermissionBits {
    /// Returns a vector of `page_count` cleared bits.
    #[must_use]
    pub fn none(page_count: usize) -> Self {
        Self {
            bits: vec![false; page_count],
        }
    }

    /// Decodes a stored decimal state at the given page width.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the conversion fails.
    pub fn from_state(state: u64, page_count: usize) -> Result<Self, PermissionError> {
        Self::from_bit_string(&to_bits(state, page_count)?)
    }

    /// Parses a `0`/`1` string (page 1 first).
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidBit`] on any other character.
    pub fn from_bit_string(bits: &str) -> Result<Self, PermissionError> {
        let bits = bits
            .chars()
            .enumerate()
            .map(|(index, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(PermissionError::InvalidBit {
                    position: index + 1,
                    found,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            bits,
        })
    }

    /// Renders the vector as a `0`/`1` string.
    #[must_use]
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
    }

    /// Encodes the vector back into its decimal state.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::Overflow`] when the vector exceeds `u64`.
    pub fn to_state(&self) -> Result<u64, PermissionError> {
        if self.bits.is_empty() {
            return Ok(0);
        }
        to_state(&self.to_bit_string())
    }

    /// Returns the number of encoded pages.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns whether `page_index` (1-indexed) carries admin rights.
    #[must_use]
    pub fn is_admin(&self, page_index: usize) -> bool {
        page_index
            .checked_sub(1)
            .and_then(|index| self.bits.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Sets or clears admin rights for `page_index` (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::PageIndex`] when the page is outside the vector.
    pub fn set_admin(&mut self, page_index: usize, admin: bool) -> Result<(), PermissionError> {
        let width = self.bits.len();
        let slot = page_index
            .checked_sub(1)
            .and_then(|index| self.bits.get_mut(index))
            .ok_or(PermissionError::PageIndex {
                index: page_index,
                width,
            })?;
        *slot = admin;
        Ok(())
    }

    /// Returns the 1-indexed pages with admin rights.
    #[must_use]
    pub fn admin_pages(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, bit)| bit.then_some(index + 1))
            .collect()
    }
}

impl fmt::Display for PermissionBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl From<PermissionBits> for String {
    fn from(bits: PermissionBits) -> Self {
        bits.to_bit_string()
    }
}

impl TryFrom<String> for PermissionBits {
    type Error = PermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_bit_string(&value)
    }
}

// ============================================================================
// SECTION: Permission State
// ============================================================================

/// Decoded permission state of a staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "bits", rename_all = "snake_case")]
pub enum PermissionState {
    /// Enrolled but not yet admitted.
    Pending,
    /// Admitted; bits carry per-page admin rights.
    Active(PermissionBits),
}

impl PermissionState {
    /// Decodes a stored `state` value at the given page width.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the conversion fails.
    pub fn from_stored(raw: i64, page_count: usize) -> Result<Self, PermissionError> {
        match u64::try_from(raw) {
            Ok(state) => Ok(Self::Active(PermissionBits::from_state(state, page_count)?)),
            Err(_) => Ok(Self::Pending),
        }
    }

    /// Encodes the state for storage.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::Overflow`] when the bits exceed `i64`.
    pub fn to_stored(&self) -> Result<i64, PermissionError> {
        match self {
            Self::Pending => Ok(PENDING_STATE),
            Self::Active(bits) => {
                let state = bits.to_state()?;
                i64::try_from(state).map_err(|_| PermissionError::Overflow(state.to_string()))
            }
        }
    }

    /// Returns true for users awaiting admission.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns whether the state grants admin rights on `page_index`.
    #[must_use]
    pub fn is_admin(&self, page_index: usize) -> bool {
        match self {
            Self::Pending => false,
            Self::Active(bits) => bits.is_admin(page_index),
        }
    }

    /// Renders the bit string; pending users render as an empty string.
    #[must_use]
    pub fn bit_string(&self) -> String {
        match self {
            Self::Pending => String::new(),
            Self::Active(bits) => bits.to_bit_string(),
        }
    }
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

/// Access tier required to view a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Visible to everyone, no session required.
    Public,
    /// Visible to any signed-in user.
    #[default]
    Authenticated,
    /// Visible only to admins of the page.
    PageAdmin,
}

impl AccessLevel {
    /// Maps the numeric tier (0, 1, 2) to an access level.
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Public),
            1 => Some(Self::Authenticated),
            2 => Some(Self::PageAdmin),
            _ => None,
        }
    }

    /// Returns the numeric tier.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Authenticated => 1,
            Self::PageAdmin => 2,
        }
    }
}

/// Decides whether a viewer may see page `page_index` at the `required` tier.
///
/// `session` is `None` when nobody is signed in.
#[must_use]
pub fn authorize(
    required: AccessLevel,
    session: Option<&PermissionState>,
    page_index: usize,
) -> bool {
    match (required, session) {
        (AccessLevel::Public, _) => true,
        (_, None) => false,
        (AccessLevel::Authenticated, Some(_)) => true,
        (AccessLevel::PageAdmin, Some(state)) => state.is_admin(page_index),
    }
}
