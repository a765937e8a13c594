use alloc::string::String;
use core::{num::ParseFloatError, str::Utf8Error};

use bigdecimal::ParseBigDecimalError;
use num_bigint::ParseBigIntError;
use thiserror::Error;

use crate::options::TokenType;

/// Any failure reported by a [`LazyValue`](crate::LazyValue) accessor.
///
/// A failed accessor leaves the value untouched; callers may still invoke
/// other accessors or inspect the raw slice.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),
}

/// The value's type does not support the requested conversion, or a format
/// cascade gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unsupported type {kind} for {operation}")]
    Unsupported {
        kind: TokenType,
        operation: &'static str,
    },
    #[error("unable to convert {text:?} to date")]
    NotADate { text: String },
    #[error("cannot convert {kind} value {text:?} to enum {type_name}")]
    UnsupportedEnumSource {
        kind: TokenType,
        type_name: &'static str,
        text: String,
    },
    #[error("no member of enum {type_name} matches {value:?}")]
    UnknownEnumMember {
        type_name: &'static str,
        value: String,
    },
    #[error("can't convert ordinal value {ordinal} into enum of type {type_name}")]
    OrdinalOutOfRange {
        type_name: &'static str,
        ordinal: i64,
    },
    #[error("value slice is empty")]
    EmptySlice,
    #[error("epoch millis {millis} are outside the representable range")]
    TimestampOutOfRange { millis: i64 },
}

/// The slice text is not well formed for the requested representation.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("empty digit run")]
    Empty,
    #[error("invalid digit {byte:#04x} at offset {offset}")]
    InvalidDigit { byte: u8, offset: usize },
    #[error("numeric value out of range")]
    Overflow,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u16),
    #[error("unexpected end of escape sequence")]
    UnexpectedEnd,
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error("invalid decimal: {0}")]
    BigDecimal(ParseBigDecimalError),
    #[error("invalid integer: {0}")]
    BigInt(ParseBigIntError),
}

// The arbitrary-precision errors only implement `Error` with their `std`
// features, so they are carried as plain payloads.
impl From<ParseBigDecimalError> for FormatError {
    fn from(err: ParseBigDecimalError) -> Self {
        Self::BigDecimal(err)
    }
}

impl From<ParseBigIntError> for FormatError {
    fn from(err: ParseBigIntError) -> Self {
        Self::BigInt(err)
    }
}

/// A value could not be built over the requested range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}
