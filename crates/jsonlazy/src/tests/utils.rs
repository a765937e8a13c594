use crate::{LazyValue, StringOptions, ValueKind};

/// A value whose range covers all of `text`.
pub(crate) fn node(kind: ValueKind, text: &str) -> LazyValue<'_> {
    LazyValue::new(false, kind, 0..text.len(), text.as_bytes()).unwrap()
}

pub(crate) fn string_kind(decode_escapes: bool, detect_dates: bool) -> ValueKind {
    ValueKind::String(StringOptions {
        decode_escapes,
        detect_dates,
    })
}

pub(crate) fn dated(text: &str) -> LazyValue<'_> {
    node(string_kind(false, true), text)
}
