use alloc::string::ToString;

use chrono::{TimeZone, Timelike, Utc};
use rstest::rstest;

use super::utils::{dated, node, string_kind};
use crate::{ConversionError, Value, ValueError, ValueKind};

#[test]
fn short_iso_becomes_a_date() {
    let mut n = dated("2020-01-02T03:04:05Z");
    let expected = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(n.to_value().unwrap(), &Value::Date(expected));
    assert_eq!(n.date_value().unwrap(), expected);
}

#[test]
fn json_date_keeps_millis() {
    let mut n = dated("2020-01-02T03:04:05.678Z");
    let date = n.date_value().unwrap();
    assert_eq!(date.timestamp_millis(), 1_577_934_245_678);
    assert_eq!(date.nanosecond(), 678_000_000);
    assert_eq!(n.to_value().unwrap().as_date(), Some(&date));
}

#[test]
fn offsets_are_normalized_to_utc() {
    let n = dated("2020-01-02T03:04:05+02:00");
    assert_eq!(
        n.date_value().unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 2, 1, 4, 5).unwrap()
    );
    let n = dated("2020-01-01T23:30:00-01:00");
    assert_eq!(
        n.date_value().unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 2, 0, 30, 0).unwrap()
    );
}

#[rstest]
#[case("hello")]
#[case("2020-13-02T03:04:05Z")]
#[case("2020-02-30T03:04:05Z")]
#[case("2020-01-02 03:04:05Z")]
#[case("abcdefghijklmnop:xyz")]
fn declined_dates_fall_back_to_strings(#[case] text: &str) {
    let mut n = dated(text);
    assert_eq!(n.to_value().unwrap(), &Value::String(text.to_string()));
    let err = n.date_value().unwrap_err();
    assert!(matches!(
        err,
        ValueError::Conversion(ConversionError::NotADate { text: ref t }) if t == text
    ));
}

#[test]
fn detection_off_keeps_the_string() {
    let mut n = node(string_kind(false, false), "2020-01-02T03:04:05Z");
    assert_eq!(
        n.to_value().unwrap(),
        &Value::String("2020-01-02T03:04:05Z".to_string())
    );
    // The explicit accessor ignores the detection flag.
    assert_eq!(
        n.date_value().unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()
    );
}

#[test]
fn integers_are_epoch_millis() {
    let n = node(ValueKind::Integer, "1577934245000");
    assert_eq!(
        n.date_value().unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()
    );
    let n = node(ValueKind::Integer, "-1000");
    assert_eq!(
        n.date_value().unwrap(),
        Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap()
    );
}

#[test]
fn unrepresentable_millis() {
    let err = node(ValueKind::Integer, "9223372036854775807")
        .date_value()
        .unwrap_err();
    assert!(matches!(
        err,
        ValueError::Conversion(ConversionError::TimestampOutOfRange { millis: i64::MAX })
    ));
}

#[test]
fn non_numeric_date_source_is_a_format_error() {
    assert!(matches!(
        node(ValueKind::Boolean, "true").date_value(),
        Err(ValueError::Format(_))
    ));
}
