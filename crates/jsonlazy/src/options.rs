use core::fmt;

/// String handling options carried by [`ValueKind::String`].
///
/// These options control how a string token is materialized and whether
/// [`LazyValue::to_value`](crate::LazyValue::to_value) probes it for a date.
///
/// # Examples
///
/// ```rust
/// use jsonlazy::{StringOptions, ValueKind};
///
/// let kind = ValueKind::String(StringOptions {
///     detect_dates: true,
///     ..Default::default()
/// });
/// assert_eq!(kind.token_type(), jsonlazy::TokenType::String);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringOptions {
    /// Whether string conversion runs the escape decoder over the slice.
    ///
    /// The tokenizer sets this when it saw a backslash while scanning the
    /// token. When `false` the raw slice is returned as is.
    ///
    /// # Default
    ///
    /// `false`
    pub decode_escapes: bool,

    /// Whether the generic conversion tries to read the string as a
    /// timestamp before falling back to plain text.
    ///
    /// Only ISO-8601 shaped strings are handed to the date parsers; anything
    /// else stays a string.
    ///
    /// # Examples
    ///
    /// ```json
    /// "2020-01-02T03:04:05Z"
    /// ```
    ///
    /// ```json
    /// "2013-12-14T01:55:33.412Z"
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub detect_dates: bool,
}

/// The token type a lazy value was scanned as, with the options relevant to
/// that type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Double,
    Integer,
    String(StringOptions),
    Null,
    Boolean,
    Char,
    Array,
    Object,
}

impl ValueKind {
    /// A plain string kind with all options off.
    pub const PLAIN_STRING: Self = Self::String(StringOptions {
        decode_escapes: false,
        detect_dates: false,
    });

    /// The bare tag, without options.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        match self {
            Self::Double => TokenType::Double,
            Self::Integer => TokenType::Integer,
            Self::String(_) => TokenType::String,
            Self::Null => TokenType::Null,
            Self::Boolean => TokenType::Boolean,
            Self::Char => TokenType::Char,
            Self::Array => TokenType::Array,
            Self::Object => TokenType::Object,
        }
    }

    pub(crate) fn decodes_escapes(&self) -> bool {
        matches!(
            self,
            Self::String(StringOptions {
                decode_escapes: true,
                ..
            })
        )
    }
}

/// Tag-only view of [`ValueKind`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Double,
    Integer,
    String,
    Null,
    Boolean,
    Char,
    Array,
    Object,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "DOUBLE",
            Self::Integer => "INTEGER",
            Self::String => "STRING",
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
        })
    }
}
