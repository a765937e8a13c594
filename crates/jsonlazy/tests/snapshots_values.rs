#![expect(missing_docs)]

use core::fmt::Write;

use insta::assert_snapshot;
use jsonlazy::{LazyValue, StringOptions, Value, ValueKind};

const DOCUMENT: &str =
    r#"[1,-2147483649,3.5,"a\nb","2020-01-02T03:04:05Z","not a date",null,true]"#;

fn variant(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Integer(_) => "Integer",
        Value::Long(_) => "Long",
        Value::Double(_) => "Double",
        Value::String(_) => "String",
        Value::Date(_) => "Date",
    }
}

/// Slices `DOCUMENT` the way a tokenizer would, one scalar per row.
fn tokens() -> Vec<LazyValue<'static>> {
    let decoded = ValueKind::String(StringOptions {
        decode_escapes: true,
        detect_dates: false,
    });
    let dated = ValueKind::String(StringOptions {
        decode_escapes: false,
        detect_dates: true,
    });
    let rows = [
        (ValueKind::Integer, "1"),
        (ValueKind::Integer, "-2147483649"),
        (ValueKind::Double, "3.5"),
        (decoded, r"a\nb"),
        (dated, "2020-01-02T03:04:05Z"),
        (dated, "not a date"),
        (ValueKind::Null, "null"),
        (ValueKind::Boolean, "true"),
    ];

    let mut cursor = 0;
    rows.into_iter()
        .map(|(kind, text)| {
            let start = cursor + DOCUMENT[cursor..].find(text).unwrap();
            cursor = start + text.len();
            LazyValue::new(false, kind, start..cursor, DOCUMENT.as_bytes()).unwrap()
        })
        .collect()
}

#[test]
fn snapshot_generic_conversion() {
    let mut lines = String::new();
    for mut token in tokens() {
        let kind = token.kind().token_type();
        let raw = token.to_string();
        match token.to_value() {
            Ok(value) => writeln!(lines, "{kind} | {raw} | {} {value}", variant(value)).unwrap(),
            Err(err) => writeln!(lines, "{kind} | {raw} | error: {err}").unwrap(),
        }
    }

    assert_snapshot!(lines, @r#"
    INTEGER | 1 | Integer 1
    INTEGER | -2147483649 | Long -2147483649
    DOUBLE | 3.5 | Double 3.5
    STRING | a\nb | String "a\nb"
    STRING | 2020-01-02T03:04:05Z | Date 2020-01-02T03:04:05.000Z
    STRING | not a date | String "not a date"
    NULL | null | Null null
    BOOLEAN | true | error: conversion error: unsupported type BOOLEAN for lazy conversion
    "#);
}

#[test]
fn snapshot_date_accessor() {
    let mut lines = String::new();
    for token in tokens() {
        match token.date_value() {
            Ok(date) => writeln!(lines, "{token} => {}", date.timestamp_millis()).unwrap(),
            Err(err) => writeln!(lines, "{token} => error: {err}").unwrap(),
        }
    }

    assert_snapshot!(lines, @r#"
    1 => 1
    -2147483649 => -2147483649
    3.5 => error: format error: invalid digit 0x2e at offset 1
    a\nb => error: conversion error: unable to convert "a\\nb" to date
    2020-01-02T03:04:05Z => 1577934245000
    not a date => error: conversion error: unable to convert "not a date" to date
    null => error: format error: invalid digit 0x6e at offset 0
    true => error: format error: invalid digit 0x74 at offset 0
    "#);
}
