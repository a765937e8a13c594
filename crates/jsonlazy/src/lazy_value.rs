//! The lazy value handle emitted by a tokenizer.
//!
//! A [`LazyValue`] is a type tag plus a `[start, end)` range over a byte
//! buffer. Nothing is parsed until an accessor asks for it:
//!
//! - The typed accessors (`int_value`, `float_value`, `string_value`, ...)
//!   always recompute from the slice. They never change the range.
//! - [`LazyValue::to_value`] converts according to the type tag and keeps the
//!   result for the lifetime of the value.
//!
//! The buffer is either the tokenizer's scan buffer, shared by every value
//! sliced from it, or a private copy taken by [`LazyValue::chop`].
//!
//! Sharing and threads
//! - A shared buffer is only ever read; any number of values may alias it.
//! - Memoization writes through `&mut self`, so a value is confined to one
//!   owner at a time. There is no interior mutability.

use alloc::{borrow::Cow, boxed::Box, string::String};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::Range,
    str::FromStr,
};

use bigdecimal::BigDecimal;
use bstr::ByteSlice;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;

use crate::{
    backend::{
        DefaultCtx, ValueCtx,
        numbers::{signed_i32, signed_i64},
    },
    backing::Backing,
    enums::JsonEnum,
    error::{ConstructionError, ConversionError, FormatError, ValueError},
    options::ValueKind,
    value::Value,
};

/// `10^n` for the number of digits after the point the float fast path
/// supports.
const POWERS_OF_10: [f32; 10] = [
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
];

/// Longest unsigned slice the float fast path accumulates.
const FLOAT_FAST_PATH_MAX_LEN: usize = 10;

fn utf8(bytes: &[u8]) -> Result<&str, FormatError> {
    Ok(core::str::from_utf8(bytes)?)
}

/// A scalar JSON token whose conversion is deferred until first use.
///
/// # Examples
///
/// ```
/// use jsonlazy::{LazyValue, Value, ValueKind};
///
/// let input = br#"{"n": -42, "pi": 3.14}"#;
/// let mut n = LazyValue::new(false, ValueKind::Integer, 6..9, input).unwrap();
/// assert_eq!(n.int_value().unwrap(), -42);
/// assert_eq!(n.to_value().unwrap(), &Value::Integer(-42));
///
/// let pi = LazyValue::new(false, ValueKind::Double, 17..21, input).unwrap();
/// assert_eq!(pi.float_value().unwrap(), 314.0 / 100.0);
/// ```
///
/// # Equality
///
/// Two values are equal when they have the same kind, the same *whole*
/// backing buffer contents, the same range and equal cached values. Values
/// over identical slices of different buffers are therefore unequal, and a
/// value compares differently before and after [`chop`](Self::chop).
#[derive(Clone)]
pub struct LazyValue<'a, C = DefaultCtx> {
    kind: ValueKind,
    backing: Backing<'a>,
    start: usize,
    end: usize,
    cached: Option<Value>,
    ctx: C,
}

impl<'a> LazyValue<'a, DefaultCtx> {
    /// Creates a value over `buffer[range]` using the built-in scanner.
    ///
    /// With `chop` set the slice is copied into a private buffer right away
    /// and the range becomes `0..len`; otherwise `buffer` is borrowed as is.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidRange`] if `range` does not lie within
    /// `buffer`.
    pub fn new(
        chop: bool,
        kind: ValueKind,
        range: Range<usize>,
        buffer: &'a [u8],
    ) -> Result<Self, ValueError> {
        Self::with_ctx(DefaultCtx, chop, kind, range, buffer)
    }
}

impl<'a, C: ValueCtx> LazyValue<'a, C> {
    /// Creates a value that delegates scanning to `ctx`.
    ///
    /// # Errors
    ///
    /// See [`LazyValue::new`].
    pub fn with_ctx(
        ctx: C,
        chop: bool,
        kind: ValueKind,
        range: Range<usize>,
        buffer: &'a [u8],
    ) -> Result<Self, ValueError> {
        let Range { start, end } = range;
        let slice = buffer
            .get(start..end)
            .ok_or(ConstructionError::InvalidRange {
                start,
                end,
                len: buffer.len(),
            })?;

        let (backing, start, end) = if chop {
            (Backing::Owned(Box::from(slice)), 0, slice.len())
        } else {
            (Backing::Shared(buffer), start, end)
        };

        Ok(Self {
            kind,
            backing,
            start,
            end,
            cached: None,
            ctx,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Always `false`: a lazy value is a scalar token.
    #[must_use]
    pub fn is_container(&self) -> bool {
        false
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The active slice, `backing[start..end]`.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        self.raw_bytes()
    }

    /// The whole backing buffer, including bytes outside the range.
    #[must_use]
    pub fn backing(&self) -> &[u8] {
        &self.backing
    }

    /// `true` once the value holds a private copy of its slice.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.backing.is_owned()
    }

    /// The memoized result of [`to_value`](Self::to_value), if any.
    #[must_use]
    pub fn cached_value(&self) -> Option<&Value> {
        self.cached.as_ref()
    }

    // --------------------------------------------------------------------
    // Generic conversion
    // --------------------------------------------------------------------

    /// Converts the value according to its kind, once.
    ///
    /// - `Double` parses the slice as an `f64`.
    /// - `Integer` yields [`Value::Integer`] when the digits fit 32 bits and
    ///   [`Value::Long`] otherwise.
    /// - `String` yields [`Value::Date`] when date detection is on and a date
    ///   parser accepts the text, and [`Value::String`] in every other case.
    /// - `Null` yields [`Value::Null`].
    ///
    /// The first successful result is cached and returned by every later
    /// call without touching the scanner again. A failed conversion caches
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`ConversionError::Unsupported`] for the other kinds, or the
    /// [`FormatError`] of the underlying parser.
    pub fn to_value(&mut self) -> Result<&Value, ValueError> {
        let value = match self.cached.take() {
            Some(value) => value,
            None => {
                let value = self.convert()?;
                trace!(kind = ?self.kind, range = ?self.range(), "memoized lazy value");
                value
            }
        };
        Ok(self.cached.insert(value))
    }

    /// Consumes the value, returning the cached conversion or computing it.
    ///
    /// # Errors
    ///
    /// See [`to_value`](Self::to_value).
    pub fn into_value(self) -> Result<Value, ValueError> {
        match self.cached {
            Some(value) => Ok(value),
            None => self.convert(),
        }
    }

    fn convert(&self) -> Result<Value, ValueError> {
        match self.kind {
            ValueKind::Double => Ok(Value::Double(self.double_value()?)),
            ValueKind::Integer => self.integer(),
            ValueKind::String(options) => {
                if options.detect_dates {
                    if let Some(date) = self.date_cascade() {
                        return Ok(Value::Date(date));
                    }
                    debug!(text = ?self.raw().as_bstr(), "date detection declined");
                }
                Ok(Value::String(self.string_value()?.into_owned()))
            }
            ValueKind::Null => Ok(Value::Null),
            kind => Err(ConversionError::Unsupported {
                kind: kind.token_type(),
                operation: "lazy conversion",
            }
            .into()),
        }
    }

    fn integer(&self) -> Result<Value, ValueError> {
        let (negative, digits) = self.signed_digits();
        if self.ctx.is_plain_integer(digits, negative) {
            let magnitude = self.ctx.parse_digits_u32(digits)?;
            Ok(Value::Integer(signed_i32(magnitude, negative)?))
        } else {
            let magnitude = self.ctx.parse_digits_u64(digits)?;
            Ok(Value::Long(signed_i64(magnitude, negative)?))
        }
    }

    /// Quick check, then JSON date, then ISO-8601. `None` when any stage
    /// declines.
    fn date_cascade(&self) -> Option<DateTime<Utc>> {
        let text = self.raw();
        if !self.ctx.looks_like_iso8601(text) {
            return None;
        }
        if self.ctx.is_json_date(text) {
            self.ctx.parse_json_date(text)
        } else if self.ctx.is_iso8601(text) {
            self.ctx.parse_iso8601(text)
        } else {
            None
        }
    }

    /// Converts a string token to a member of `E`.
    ///
    /// Strings match a member name exactly, then retry upper-cased with `-`
    /// replaced by `_`, so `"light-blue"` finds `LIGHT_BLUE`. Integers select
    /// the member at that ordinal. `Null` converts to `None`.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnknownEnumMember`],
    /// [`ConversionError::OrdinalOutOfRange`], or
    /// [`ConversionError::UnsupportedEnumSource`] for any other kind.
    pub fn to_enum<E: JsonEnum>(&self) -> Result<Option<E>, ValueError> {
        match self.kind {
            ValueKind::String(_) => {
                let name = self.string_value()?;
                E::from_name(&name)
                    .or_else(|| E::from_name(&name.to_uppercase().replace('-', "_")))
                    .map(Some)
                    .ok_or_else(|| {
                        ConversionError::UnknownEnumMember {
                            type_name: E::TYPE_NAME,
                            value: name.into_owned(),
                        }
                        .into()
                    })
            }
            ValueKind::Integer => {
                let ordinal = self.int_value()?;
                usize::try_from(ordinal)
                    .ok()
                    .and_then(E::from_ordinal)
                    .map(Some)
                    .ok_or_else(|| {
                        ConversionError::OrdinalOutOfRange {
                            type_name: E::TYPE_NAME,
                            ordinal: i64::from(ordinal),
                        }
                        .into()
                    })
            }
            ValueKind::Null => Ok(None),
            kind => Err(ConversionError::UnsupportedEnumSource {
                kind: kind.token_type(),
                type_name: E::TYPE_NAME,
                text: self.raw().to_str_lossy().into_owned(),
            }
            .into()),
        }
    }

    // --------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------

    /// The slice as text, run through the strict escape decoder when the
    /// kind asks for decoding.
    ///
    /// # Errors
    ///
    /// [`FormatError::Utf8`] for invalid UTF-8, or the decoder's error for a
    /// malformed escape.
    pub fn string_value(&self) -> Result<Cow<'_, str>, ValueError> {
        let text = utf8(self.raw())?;
        if self.kind.decodes_escapes() {
            Ok(Cow::Owned(self.ctx.decode_escaped(text)?))
        } else {
            Ok(Cow::Borrowed(text))
        }
    }

    /// The slice with escapes decoded regardless of the kind's options.
    /// Malformed escapes are kept verbatim.
    ///
    /// # Errors
    ///
    /// [`FormatError::Utf8`] for invalid UTF-8.
    pub fn string_value_encoded(&self) -> Result<Cow<'_, str>, ValueError> {
        Ok(self.ctx.decode_lenient(utf8(self.raw())?))
    }

    /// The raw slice as text, without decoding.
    ///
    /// Borrows the backing buffer when the range covers all of it and
    /// copies the substring otherwise.
    ///
    /// # Errors
    ///
    /// [`FormatError::Utf8`] for invalid UTF-8.
    pub fn text(&self) -> Result<Cow<'_, str>, ValueError> {
        if self.start == 0 && self.end == self.backing.len() {
            Ok(Cow::Borrowed(utf8(&self.backing)?))
        } else {
            Ok(Cow::Owned(String::from(utf8(self.raw())?)))
        }
    }

    // --------------------------------------------------------------------
    // Numbers
    // --------------------------------------------------------------------

    /// Splits off one leading `-` without touching the range.
    fn signed_digits(&self) -> (bool, &[u8]) {
        match self.raw().split_first() {
            Some((b'-', digits)) => (true, digits),
            _ => (false, self.raw()),
        }
    }

    /// Parses the slice as a signed 32-bit integer.
    ///
    /// # Errors
    ///
    /// [`FormatError`] for an empty run, a non-digit byte, or a value that
    /// does not fit `i32`.
    pub fn int_value(&self) -> Result<i32, ValueError> {
        let (negative, digits) = self.signed_digits();
        let magnitude = self.ctx.parse_digits_u32(digits)?;
        Ok(signed_i32(magnitude, negative)?)
    }

    /// Parses the slice as a signed 64-bit integer, through the 32-bit
    /// parser when the digits fit it.
    ///
    /// # Errors
    ///
    /// See [`int_value`](Self::int_value).
    pub fn long_value(&self) -> Result<i64, ValueError> {
        let (negative, digits) = self.signed_digits();
        if self.ctx.is_plain_integer(digits, negative) {
            let magnitude = self.ctx.parse_digits_u32(digits)?;
            Ok(i64::from(signed_i32(magnitude, negative)?))
        } else {
            let magnitude = self.ctx.parse_digits_u64(digits)?;
            Ok(signed_i64(magnitude, negative)?)
        }
    }

    /// Truncating cast of [`int_value`](Self::int_value).
    ///
    /// # Errors
    ///
    /// See [`int_value`](Self::int_value).
    #[expect(clippy::cast_possible_truncation)]
    pub fn byte_value(&self) -> Result<i8, ValueError> {
        Ok(self.int_value()? as i8)
    }

    /// Truncating cast of [`int_value`](Self::int_value).
    ///
    /// # Errors
    ///
    /// See [`int_value`](Self::int_value).
    #[expect(clippy::cast_possible_truncation)]
    pub fn short_value(&self) -> Result<i16, ValueError> {
        Ok(self.int_value()? as i16)
    }

    /// # Errors
    ///
    /// [`FormatError`] if the slice is not a number.
    pub fn double_value(&self) -> Result<f64, ValueError> {
        Ok(self.ctx.parse_double(self.raw())?)
    }

    /// Parses the slice as an `f32`, dividing an integer accumulator by a
    /// power of ten for short plain decimals.
    ///
    /// The fast path applies to at most ten bytes after the sign, without an
    /// exponent or suffix; `"3.14"` is computed as `314.0 / 100.0`. Anything
    /// else goes to the generic float parser, which sees the slice with its
    /// sign.
    ///
    /// # Errors
    ///
    /// [`FormatError`] if the generic parser rejects the slice.
    #[expect(clippy::cast_precision_loss)]
    pub fn float_value(&self) -> Result<f32, ValueError> {
        let (negative, digits) = self.signed_digits();
        let sign = if negative { -1.0 } else { 1.0 };

        if digits.len() > FLOAT_FAST_PATH_MAX_LEN {
            debug!(len = digits.len(), "float slice too long for fast path");
            return Ok(self.ctx.parse_float(self.raw())?);
        }

        let mut simple = true;
        let mut found_point = false;
        let mut past_point = 0usize;
        for &byte in digits {
            match byte {
                b'e' | b'E' | b'f' | b'F' => {
                    simple = false;
                    break;
                }
                b'.' => found_point = true,
                _ if found_point => {
                    past_point += 1;
                    if past_point >= POWERS_OF_10.len() {
                        break;
                    }
                }
                _ => {}
            }
        }

        if simple {
            if let (Some(power), Some(acc)) = (
                POWERS_OF_10.get(past_point),
                self.ctx.parse_digits_ignore_dot(digits),
            ) {
                return Ok(acc as f32 / (power * sign));
            }
        }

        debug!(text = ?self.raw().as_bstr(), "float fast path fell back");
        Ok(self.ctx.parse_float(self.raw())?)
    }

    /// `true` iff the slice is `true` in any letter case.
    #[must_use]
    pub fn boolean_value(&self) -> bool {
        self.raw().eq_ignore_ascii_case(b"true")
    }

    /// The first character of the slice. Bytes after it are not inspected.
    ///
    /// # Errors
    ///
    /// [`ConversionError::EmptySlice`] for an empty range, or
    /// [`FormatError::Utf8`].
    pub fn char_value(&self) -> Result<char, ValueError> {
        let raw = self.raw();
        match bstr::decode_utf8(raw) {
            (Some(ch), _) => Ok(ch),
            (None, 0) => Err(ConversionError::EmptySlice.into()),
            // An invalid leading sequence; only its bytes are validated.
            (None, size) => match core::str::from_utf8(raw.get(..size).unwrap_or(raw)) {
                Err(err) => Err(FormatError::from(err).into()),
                Ok(_) => Err(ConversionError::EmptySlice.into()),
            },
        }
    }

    /// # Errors
    ///
    /// [`FormatError::BigDecimal`] as reported by `bigdecimal`.
    pub fn big_decimal_value(&self) -> Result<BigDecimal, ValueError> {
        let text = utf8(self.raw())?;
        BigDecimal::from_str(text).map_err(|err| FormatError::from(err).into())
    }

    /// # Errors
    ///
    /// [`FormatError::BigInt`] as reported by `num-bigint`.
    pub fn big_integer_value(&self) -> Result<BigInt, ValueError> {
        let text = utf8(self.raw())?;
        BigInt::from_str(text).map_err(|err| FormatError::from(err).into())
    }

    // --------------------------------------------------------------------
    // Dates
    // --------------------------------------------------------------------

    /// The value as a UTC timestamp.
    ///
    /// String tokens go through the same cascade as
    /// [`to_value`](Self::to_value), whether or not date detection is on, but
    /// a decline is an error here instead of a fallback. Any other kind is
    /// read with [`long_value`](Self::long_value) as epoch milliseconds.
    ///
    /// # Errors
    ///
    /// [`ConversionError::NotADate`] when the cascade declines,
    /// [`ConversionError::TimestampOutOfRange`] for unrepresentable millis,
    /// or the [`FormatError`] of `long_value`.
    pub fn date_value(&self) -> Result<DateTime<Utc>, ValueError> {
        if let ValueKind::String(_) = self.kind {
            return self.date_cascade().ok_or_else(|| {
                ConversionError::NotADate {
                    text: self.raw().to_str_lossy().into_owned(),
                }
                .into()
            });
        }
        let millis = self.long_value()?;
        self.ctx
            .utc_from_millis(millis)
            .ok_or_else(|| ConversionError::TimestampOutOfRange { millis }.into())
    }

    // --------------------------------------------------------------------
    // Sequence view and detachment
    // --------------------------------------------------------------------

    /// Total length of the *backing buffer*, not of the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    /// `true` if the backing buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// The byte at absolute `index` in the backing buffer.
    #[must_use]
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.backing.get(index).copied()
    }

    /// A new value over `from..to` of this value's backing buffer, with the
    /// same kind and scanner.
    ///
    /// Over a shared buffer the new value borrows the tokenizer's buffer
    /// directly, so it may outlive `self` and is unaffected by a later
    /// [`chop`](Self::chop) of `self`. A detached value has no shared buffer
    /// to hand out; its sub-sequence gets its own copy of the whole backing,
    /// keeping absolute offsets, and is detached as well.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidRange`] if the range is outside the
    /// backing buffer.
    pub fn sub_sequence(&self, from: usize, to: usize) -> Result<LazyValue<'a, C>, ValueError>
    where
        C: Clone,
    {
        let bytes = match &self.backing {
            Backing::Shared(buffer) => {
                let buffer: &'a [u8] = *buffer;
                return LazyValue::with_ctx(self.ctx.clone(), false, self.kind, from..to, buffer);
            }
            Backing::Owned(bytes) => bytes,
        };
        if bytes.get(from..to).is_none() {
            return Err(ConstructionError::InvalidRange {
                start: from,
                end: to,
                len: bytes.len(),
            }
            .into());
        }
        Ok(LazyValue {
            kind: self.kind,
            backing: Backing::Owned(bytes.clone()),
            start: from,
            end: to,
            cached: None,
            ctx: self.ctx.clone(),
        })
    }

    /// Copies the slice into a private buffer and resets the range to
    /// `0..len`. Does nothing if the value is already detached.
    pub fn chop(&mut self) {
        if self.backing.is_owned() {
            return;
        }
        let owned: Box<[u8]> = Box::from(self.raw());
        trace!(range = ?self.range(), "detaching lazy value");
        self.start = 0;
        self.end = owned.len();
        self.backing = Backing::Owned(owned);
    }

    /// Detaches the value and drops the borrow of the scan buffer.
    #[must_use]
    pub fn into_owned(mut self) -> LazyValue<'static, C> {
        self.chop();
        let backing = match self.backing {
            Backing::Owned(bytes) => bytes,
            Backing::Shared(bytes) => Box::from(bytes),
        };
        LazyValue {
            kind: self.kind,
            backing: Backing::Owned(backing),
            start: self.start,
            end: self.end,
            cached: self.cached,
            ctx: self.ctx,
        }
    }
}

impl<C> LazyValue<'_, C> {
    fn raw_bytes(&self) -> &[u8] {
        self.backing.get(self.start..self.end).unwrap_or_default()
    }
}

impl<C, D> PartialEq<LazyValue<'_, D>> for LazyValue<'_, C> {
    fn eq(&self, other: &LazyValue<'_, D>) -> bool {
        self.kind == other.kind
            && self.start == other.start
            && self.end == other.end
            && self.backing.as_slice() == other.backing.as_slice()
            && self.cached == other.cached
    }
}

impl<C> Eq for LazyValue<'_, C> {}

impl<C> Hash for LazyValue<'_, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.backing.as_slice().hash(state);
        self.start.hash(state);
        self.end.hash(state);
        self.cached.hash(state);
    }
}

impl<C> fmt::Debug for LazyValue<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyValue")
            .field("kind", &self.kind)
            .field("range", &(self.start..self.end))
            .field("detached", &self.backing.is_owned())
            .field("raw", &self.raw_bytes().as_bstr())
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}

/// Writes the raw slice, replacing invalid UTF-8.
impl<C> fmt::Display for LazyValue<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.raw_bytes().as_bstr(), f)
    }
}
