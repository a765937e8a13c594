#![no_main]
use arbitrary::Arbitrary;
use jsonlazy::{DefaultCtx, LazyValue, StringOptions, ValueCtx, ValueKind};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    kind: u8,
    decode_escapes: bool,
    detect_dates: bool,
    chop: bool,
    start: u16,
    end: u16,
    data: Vec<u8>,
}

fn kind(input: &Input) -> ValueKind {
    match input.kind % 8 {
        0 => ValueKind::Double,
        1 => ValueKind::Integer,
        2 => ValueKind::String(StringOptions {
            decode_escapes: input.decode_escapes,
            detect_dates: input.detect_dates,
        }),
        3 => ValueKind::Null,
        4 => ValueKind::Boolean,
        5 => ValueKind::Char,
        6 => ValueKind::Array,
        _ => ValueKind::Object,
    }
}

fuzz_target!(|input: Input| {
    let range = usize::from(input.start)..usize::from(input.end);
    let Ok(mut value) = LazyValue::new(input.chop, kind(&input), range, &input.data) else {
        return;
    };
    let raw = value.raw().to_vec();
    let before = value.range();

    let _ = value.int_value();
    let _ = value.long_value();
    let _ = value.byte_value();
    let _ = value.short_value();
    let _ = value.double_value();
    let _ = value.float_value();
    let _ = value.boolean_value();
    let _ = value.char_value();
    let _ = value.big_decimal_value();
    let _ = value.big_integer_value();
    let _ = value.string_value();
    let _ = value.string_value_encoded();
    let _ = value.text();
    let _ = value.date_value();
    assert_eq!(value.range(), before, "accessors must not move the range");

    if let Ok(text) = std::str::from_utf8(&raw) {
        let _ = DefaultCtx.decode_lenient(text);
        let _ = DefaultCtx.decode_escaped(text);
    }

    // Debug rendering, since a cached NaN double never compares equal.
    let first = format!("{:?}", value.to_value().ok());
    let second = format!("{:?}", value.to_value().ok());
    assert_eq!(first, second, "memoized conversion changed");

    value.chop();
    assert_eq!(value.raw(), raw.as_slice());
    assert_eq!(value.len(), raw.len());
});
