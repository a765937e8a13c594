//! Digit-run classification and parsing over raw byte slices.
//!
//! All routines take the digits *without* a sign; callers strip a leading
//! `-` and apply it afterwards.

use crate::error::FormatError;

const MAX_INT_DIGITS: &[u8] = b"2147483647";
const MIN_INT_DIGITS: &[u8] = b"2147483648";

/// Returns `true` if the digit run fits a signed 32-bit integer.
///
/// Runs shorter than ten bytes always fit, longer ones never do, and a
/// ten-byte run is compared against the boundary magnitude.
pub(crate) fn is_plain_integer(digits: &[u8], negative: bool) -> bool {
    let bound = if negative {
        MIN_INT_DIGITS
    } else {
        MAX_INT_DIGITS
    };
    match digits.len().cmp(&bound.len()) {
        core::cmp::Ordering::Less => true,
        core::cmp::Ordering::Greater => false,
        core::cmp::Ordering::Equal => digits <= bound,
    }
}

#[inline]
fn digit(byte: u8, offset: usize) -> Result<u8, FormatError> {
    if byte.is_ascii_digit() {
        Ok(byte - b'0')
    } else {
        Err(FormatError::InvalidDigit { byte, offset })
    }
}

pub(crate) fn parse_digits_u32(digits: &[u8]) -> Result<u32, FormatError> {
    if digits.is_empty() {
        return Err(FormatError::Empty);
    }
    let mut acc: u32 = 0;
    for (offset, &byte) in digits.iter().enumerate() {
        let d = digit(byte, offset)?;
        acc = acc
            .checked_mul(10)
            .and_then(|n| n.checked_add(u32::from(d)))
            .ok_or(FormatError::Overflow)?;
    }
    Ok(acc)
}

pub(crate) fn parse_digits_u64(digits: &[u8]) -> Result<u64, FormatError> {
    if digits.is_empty() {
        return Err(FormatError::Empty);
    }
    let mut acc: u64 = 0;
    for (offset, &byte) in digits.iter().enumerate() {
        let d = digit(byte, offset)?;
        acc = acc
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(d)))
            .ok_or(FormatError::Overflow)?;
    }
    Ok(acc)
}

/// Accumulates every digit of a short decimal literal, skipping the point.
///
/// Returns `None` on any byte that is neither a digit nor `.`, and when there
/// is no digit at all.
pub(crate) fn parse_digits_ignore_dot(digits: &[u8]) -> Option<u64> {
    let mut acc: u64 = 0;
    let mut seen_digit = false;
    for &byte in digits {
        match byte {
            b'.' => {}
            b'0'..=b'9' => {
                acc = acc.checked_mul(10)?.checked_add(u64::from(byte - b'0'))?;
                seen_digit = true;
            }
            _ => return None,
        }
    }
    seen_digit.then_some(acc)
}

pub(crate) fn parse_double(text: &[u8]) -> Result<f64, FormatError> {
    Ok(core::str::from_utf8(text)?.parse::<f64>()?)
}

pub(crate) fn parse_float(text: &[u8]) -> Result<f32, FormatError> {
    Ok(core::str::from_utf8(text)?.parse::<f32>()?)
}

/// Applies a sign to a 32-bit magnitude; `2147483648` negated is `i32::MIN`.
pub(crate) fn signed_i32(magnitude: u32, negative: bool) -> Result<i32, FormatError> {
    if negative {
        if magnitude > i32::MIN.unsigned_abs() {
            return Err(FormatError::Overflow);
        }
        Ok(0i32.wrapping_sub_unsigned(magnitude))
    } else {
        i32::try_from(magnitude).map_err(|_| FormatError::Overflow)
    }
}

/// Applies a sign to a 64-bit magnitude; see [`signed_i32`].
pub(crate) fn signed_i64(magnitude: u64, negative: bool) -> Result<i64, FormatError> {
    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(FormatError::Overflow);
        }
        Ok(0i64.wrapping_sub_unsigned(magnitude))
    } else {
        i64::try_from(magnitude).map_err(|_| FormatError::Overflow)
    }
}
