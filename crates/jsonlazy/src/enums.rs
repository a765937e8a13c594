/// A Rust enum that lazy values can be converted into.
///
/// String tokens resolve by member name, integer tokens by position in
/// [`JsonEnum::members`].
///
/// ```rust
/// use jsonlazy::{JsonEnum, LazyValue, ValueKind};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Color {
///     Red,
///     LightBlue,
/// }
///
/// impl JsonEnum for Color {
///     const TYPE_NAME: &'static str = "Color";
///
///     fn members() -> &'static [Self] {
///         &[Color::Red, Color::LightBlue]
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Color::Red => "RED",
///             Color::LightBlue => "LIGHT_BLUE",
///         }
///     }
/// }
///
/// let node = LazyValue::new(false, ValueKind::PLAIN_STRING, 0..10, b"light-blue").unwrap();
/// assert_eq!(node.to_enum::<Color>().unwrap(), Some(Color::LightBlue));
/// ```
pub trait JsonEnum: Copy + 'static {
    /// Name used in conversion errors.
    const TYPE_NAME: &'static str;

    /// Every member, in declaration (ordinal) order.
    fn members() -> &'static [Self];

    /// The member's declared name.
    fn name(&self) -> &'static str;

    /// Exact, case-sensitive lookup by name.
    fn from_name(name: &str) -> Option<Self> {
        Self::members().iter().copied().find(|m| m.name() == name)
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::members().get(ordinal).copied()
    }
}
