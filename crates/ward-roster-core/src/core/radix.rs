// crates/ward-roster-core/src/core/radix.rs
// ============================================================================
// Module: Ward Roster Radix Conversion
// Description: Arbitrary base conversion for non-negative digit strings.
// Purpose: Provide the encode/decode primitive behind the permission codec.
// Dependencies: bigdecimal, thiserror
// ============================================================================

//! ## Overview
//! [`convert`] rewrites a digit string from one radix (2..=36) into another,
//! left-padding the result with zeros to a caller-supplied minimum width. The
//! value is accumulated into an unbounded integer, so conversion is exact for
//! any input length.
//!
//! A leading minus sign yields an empty string rather than a signed result.
//! Permission states are never negative once admitted, so nothing in the
//! roster relies on that path beyond rendering pending users as "no bits".

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::num_bigint::BigInt;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest supported radix.
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix.
pub const MAX_RADIX: u32 = 36;
/// Digit alphabet shared by every radix.
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Radix conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A radix fell outside `2..=36`.
    #[error("radix must be between {MIN_RADIX} and {MAX_RADIX}, got {0}")]
    Radix(u32),
    /// Input digit string was empty.
    #[error("input value must not be empty")]
    Empty,
    /// Input contained a character that is not a digit of the source radix.
    #[error("character '{digit}' is not a valid base-{radix} digit")]
    InvalidDigit {
        /// Offending character.
        digit: char,
        /// Source radix.
        radix: u32,
    },
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Converts `value` from `from_base` to `to_base`, zero-padded to `min_width`.
///
/// Input digits are case-insensitive; output digits are uppercase. Zero
/// converts to `"0"`. Results longer than `min_width` are never truncated.
///
/// # Errors
///
/// Returns [`ConvertError::Radix`] when either radix is out of range,
/// [`ConvertError::Empty`] for empty input, and
/// [`ConvertError::InvalidDigit`] when a character is outside the alphabet or
/// not below `from_base`.
pub fn convert(
    value: &str,
    from_base: u32,
    to_base: u32,
    min_width: usize,
) -> Result<String, ConvertError> {
    for radix in [from_base, to_base] {
        if !(MIN_RADIX ..= MAX_RADIX).contains(&radix) {
            return Err(ConvertError::Radix(radix));
        }
    }
    if value.is_empty() {
        return Err(ConvertError::Empty);
    }
    if value.starts_with('-') {
        return Ok(String::new());
    }

    let mut accumulated = BigInt::from(0u32);
    for ch in value.chars() {
        let digit = digit_value(ch).filter(|digit| *digit < from_base).ok_or(
            ConvertError::InvalidDigit {
                digit: ch,
                radix: from_base,
            },
        )?;
        accumulated = accumulated * from_base + digit;
    }

    let natural = accumulated.to_str_radix(to_base).to_ascii_uppercase();
    Ok(left_pad(natural, min_width))
}

/// Returns the numeric value of an alphabet character.
fn digit_value(ch: char) -> Option<u32> {
    let upper = ch.to_ascii_uppercase();
    if !upper.is_ascii() {
        return None;
    }
    DIGITS.iter().position(|digit| char::from(*digit) == upper).and_then(|index| {
        u32::try_from(index).ok()
    })
}

/// Left-pads `digits` with `'0'` up to `min_width` characters.
fn left_pad(digits: String, min_width: usize) -> String {
    let missing = min_width.saturating_sub(digits.len());
    if missing == 0 {
        return digits;
    }
    let mut padded = "0".repeat(missing);
    padded.push_str(&digits);
    padded
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::digit_value;
    use super::left_pad;

    #[test]
    fn digit_value_is_case_insensitive() {
        assert_eq!(digit_value('a'), Some(10));
        assert_eq!(digit_value('A'), Some(10));
        assert_eq!(digit_value('z'), Some(35));
        assert_eq!(digit_value('!'), None);
        assert_eq!(digit_value('é'), None);
    }

    #[test]
    fn left_pad_never_truncates() {
        assert_eq!(left_pad("101".to_string(), 5), "00101");
        assert_eq!(left_pad("10101".to_string(), 3), "10101");
    }
}
