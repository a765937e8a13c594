pub(crate) mod dates;
pub(crate) mod escape;
pub(crate) mod numbers;

use alloc::{borrow::Cow, string::String};

use chrono::{DateTime, Utc};

use crate::error::FormatError;

/// Low-level routines a [`LazyValue`](crate::LazyValue) delegates to.
///
/// Every method has a default implementation; [`DefaultCtx`] uses them all.
/// Implementors override individual methods to swap in another scanner or to
/// observe calls. All slices are the value's active range, with any sign
/// already removed where noted.
pub trait ValueCtx {
    /// `true` iff the unsigned digit run fits a signed 32-bit integer.
    fn is_plain_integer(&self, digits: &[u8], negative: bool) -> bool {
        numbers::is_plain_integer(digits, negative)
    }

    /// Parses an unsigned digit run into a 32-bit magnitude.
    fn parse_digits_u32(&self, digits: &[u8]) -> Result<u32, FormatError> {
        numbers::parse_digits_u32(digits)
    }

    /// Parses an unsigned digit run into a 64-bit magnitude.
    fn parse_digits_u64(&self, digits: &[u8]) -> Result<u64, FormatError> {
        numbers::parse_digits_u64(digits)
    }

    /// Accumulates the digits of a short decimal literal, skipping a `.`.
    fn parse_digits_ignore_dot(&self, digits: &[u8]) -> Option<u64> {
        numbers::parse_digits_ignore_dot(digits)
    }

    /// Parses a JSON number (`.`/`e`/`E` grammar) as a double.
    fn parse_double(&self, text: &[u8]) -> Result<f64, FormatError> {
        numbers::parse_double(text)
    }

    /// Generic float parser used when the fast path does not apply.
    fn parse_float(&self, text: &[u8]) -> Result<f32, FormatError> {
        numbers::parse_float(text)
    }

    /// Decodes every escape, failing on a malformed one.
    fn decode_escaped(&self, text: &str) -> Result<String, FormatError> {
        escape::decode_strict(text)
    }

    /// Decodes escapes if present; malformed escapes pass through.
    fn decode_lenient<'t>(&self, text: &'t str) -> Cow<'t, str> {
        escape::decode_lenient(text)
    }

    fn looks_like_iso8601(&self, text: &[u8]) -> bool {
        dates::looks_like_iso8601(text)
    }

    fn is_json_date(&self, text: &[u8]) -> bool {
        dates::is_json_date(text)
    }

    fn parse_json_date(&self, text: &[u8]) -> Option<DateTime<Utc>> {
        dates::parse_json_date(text)
    }

    fn is_iso8601(&self, text: &[u8]) -> bool {
        dates::is_iso8601(text)
    }

    fn parse_iso8601(&self, text: &[u8]) -> Option<DateTime<Utc>> {
        dates::parse_iso8601(text)
    }

    /// Builds a UTC timestamp from epoch milliseconds.
    fn utc_from_millis(&self, millis: i64) -> Option<DateTime<Utc>> {
        dates::utc_from_millis(millis)
    }
}

/// The built-in scanner routines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultCtx;

impl ValueCtx for DefaultCtx {}

impl<T: ValueCtx + ?Sized> ValueCtx for &T {
    fn is_plain_integer(&self, digits: &[u8], negative: bool) -> bool {
        (**self).is_plain_integer(digits, negative)
    }

    fn parse_digits_u32(&self, digits: &[u8]) -> Result<u32, FormatError> {
        (**self).parse_digits_u32(digits)
    }

    fn parse_digits_u64(&self, digits: &[u8]) -> Result<u64, FormatError> {
        (**self).parse_digits_u64(digits)
    }

    fn parse_digits_ignore_dot(&self, digits: &[u8]) -> Option<u64> {
        (**self).parse_digits_ignore_dot(digits)
    }

    fn parse_double(&self, text: &[u8]) -> Result<f64, FormatError> {
        (**self).parse_double(text)
    }

    fn parse_float(&self, text: &[u8]) -> Result<f32, FormatError> {
        (**self).parse_float(text)
    }

    fn decode_escaped(&self, text: &str) -> Result<String, FormatError> {
        (**self).decode_escaped(text)
    }

    fn decode_lenient<'t>(&self, text: &'t str) -> Cow<'t, str> {
        (**self).decode_lenient(text)
    }

    fn looks_like_iso8601(&self, text: &[u8]) -> bool {
        (**self).looks_like_iso8601(text)
    }

    fn is_json_date(&self, text: &[u8]) -> bool {
        (**self).is_json_date(text)
    }

    fn parse_json_date(&self, text: &[u8]) -> Option<DateTime<Utc>> {
        (**self).parse_json_date(text)
    }

    fn is_iso8601(&self, text: &[u8]) -> bool {
        (**self).is_iso8601(text)
    }

    fn parse_iso8601(&self, text: &[u8]) -> Option<DateTime<Utc>> {
        (**self).parse_iso8601(text)
    }

    fn utc_from_millis(&self, millis: i64) -> Option<DateTime<Utc>> {
        (**self).utc_from_millis(millis)
    }
}
