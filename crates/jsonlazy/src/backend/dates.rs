//! Date heuristics and parsers for string tokens.
//!
//! Two layouts are recognized:
//!
//! - JSON date: `yyyy-MM-ddTHH:mm:ss.SSSZ` (24 bytes).
//! - ISO-8601: `yyyy-MM-ddTHH:mm:ssZ` (20 bytes) or
//!   `yyyy-MM-ddTHH:mm:ss±hh:mm` (25 bytes).
//!
//! The quick check only looks at the length and one separator; the strict
//! predicates check every separator and digit position.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

const SHORT_ISO_8601_LEN: usize = 20;
const JSON_DATE_LEN: usize = 24;
const LONG_ISO_8601_LEN: usize = 25;

/// Cheap structural test: could this slice be an ISO-8601 timestamp?
pub(crate) fn looks_like_iso8601(text: &[u8]) -> bool {
    matches!(
        text.len(),
        SHORT_ISO_8601_LEN | JSON_DATE_LEN | LONG_ISO_8601_LEN
    ) || (text.len() >= 17 && text[16] == b':')
}

fn has_date_time_separators(text: &[u8]) -> bool {
    text.len() >= 19
        && text[4] == b'-'
        && text[7] == b'-'
        && text[10] == b'T'
        && text[13] == b':'
        && text[16] == b':'
}

fn all_digits(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_digit)
}

fn date_time_digits(text: &[u8]) -> bool {
    all_digits(&text[0..4])
        && all_digits(&text[5..7])
        && all_digits(&text[8..10])
        && all_digits(&text[11..13])
        && all_digits(&text[14..16])
        && all_digits(&text[17..19])
}

pub(crate) fn is_json_date(text: &[u8]) -> bool {
    text.len() == JSON_DATE_LEN
        && has_date_time_separators(text)
        && date_time_digits(text)
        && text[19] == b'.'
        && all_digits(&text[20..23])
        && text[23] == b'Z'
}

pub(crate) fn is_iso8601(text: &[u8]) -> bool {
    let zone_ok = match text.len() {
        SHORT_ISO_8601_LEN => text[19] == b'Z',
        LONG_ISO_8601_LEN => {
            matches!(text[19], b'+' | b'-')
                && all_digits(&text[20..22])
                && text[22] == b':'
                && all_digits(&text[23..25])
        }
        _ => false,
    };
    zone_ok && has_date_time_separators(text) && date_time_digits(text)
}

// Callers have already checked that `text` is all digits.
fn number(text: &[u8]) -> u32 {
    text.iter().fold(0, |acc, &b| acc * 10 + u32::from(b - b'0'))
}

fn naive_fields(text: &[u8]) -> Option<NaiveDateTime> {
    let year = i32::try_from(number(&text[0..4])).ok()?;
    NaiveDate::from_ymd_opt(year, number(&text[5..7]), number(&text[8..10]))?.and_hms_opt(
        number(&text[11..13]),
        number(&text[14..16]),
        number(&text[17..19]),
    )
}

/// Parses a slice previously accepted by [`is_json_date`].
///
/// Returns `None` for impossible calendar values.
pub(crate) fn parse_json_date(text: &[u8]) -> Option<DateTime<Utc>> {
    if !is_json_date(text) {
        return None;
    }
    let millis = number(&text[20..23]);
    let naive = naive_fields(text)?.with_nanosecond(millis * 1_000_000)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Parses a slice previously accepted by [`is_iso8601`].
///
/// Returns `None` for impossible calendar values or offsets.
pub(crate) fn parse_iso8601(text: &[u8]) -> Option<DateTime<Utc>> {
    if !is_iso8601(text) {
        return None;
    }
    let naive = naive_fields(text)?;
    if text.len() == SHORT_ISO_8601_LEN {
        return Some(Utc.from_utc_datetime(&naive));
    }
    let magnitude =
        i32::try_from(number(&text[20..22]) * 3600 + number(&text[23..25]) * 60).ok()?;
    let seconds = if text[19] == b'-' { -magnitude } else { magnitude };
    let offset = FixedOffset::east_opt(seconds)?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(local.with_timezone(&Utc))
}

pub(crate) fn utc_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
