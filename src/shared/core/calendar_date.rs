// Calendar dates as they travel over the wire.
//
// Purpose
// - Convert between `YYYY-MM-DD` strings and `NaiveDate` without any timezone shift.
//
// Responsibilities
// - A date always means "that calendar day at local midnight". Only the year, month and
//   day fields are read or written, so `2025-08-01` stays `2025-08-01` on every host.
// - Provide the inclusive day bounds used by date range filtering.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use thiserror::Error;

const WIRE_FORMAT: &str = "%Y-%m-%d";
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid calendar date `{0}`, expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

/// Parses a wire date. A trailing time component (`2025-08-01T00:00:00Z`) is ignored, the
/// calendar fields are taken as written.
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate, InvalidDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, WIRE_FORMAT).map_err(|_| InvalidDate(raw.to_string()))
}

pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// `date` at 00:00:00.000.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `date` at 23:59:59.999.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + TimeDelta::milliseconds(MILLIS_PER_DAY - 1)
}

/// Serde adapter for optional wire dates. `null`, a missing field and an empty string all
/// read as `None`.
pub mod optional_wire_date {
    use super::{format_wire_date, parse_wire_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format_wire_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_wire_date(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod calendar_date_tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2025-08-01", date(2025, 8, 1))]
    #[case("2025-8-1", date(2025, 8, 1))]
    #[case(" 2025-12-31 ", date(2025, 12, 31))]
    #[case("2025-08-01T00:00:00.000Z", date(2025, 8, 1))]
    #[case("2025-08-01T23:30:00-05:00", date(2025, 8, 1))]
    fn it_should_parse_the_calendar_fields_as_written(#[case] raw: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_wire_date(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("01-08-2025")]
    #[case("2025-02-30")]
    #[case("yesterday")]
    fn it_should_reject_malformed_dates(#[case] raw: &str) {
        assert_eq!(parse_wire_date(raw), Err(InvalidDate(raw.to_string())));
    }

    #[rstest]
    fn it_should_format_with_zero_padding() {
        assert_eq!(format_wire_date(date(2025, 8, 1)), "2025-08-01");
    }

    #[rstest]
    fn it_should_span_the_whole_day_inclusively() {
        let day = date(2025, 8, 1);
        assert_eq!(start_of_day(day).to_string(), "2025-08-01 00:00:00");
        assert_eq!(end_of_day(day).to_string(), "2025-08-01 23:59:59.999");
        assert!(end_of_day(day) < start_of_day(date(2025, 8, 2)));
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Holder {
        #[serde(default, with = "optional_wire_date")]
        day: Option<NaiveDate>,
    }

    #[rstest]
    #[case(r#"{"day":"1990-05-15"}"#, Some(date(1990, 5, 15)))]
    #[case(r#"{"day":null}"#, None)]
    #[case(r#"{"day":""}"#, None)]
    #[case(r#"{}"#, None)]
    fn it_should_read_optional_wire_dates(#[case] json: &str, #[case] expected: Option<NaiveDate>) {
        let holder: Holder = serde_json::from_str(json).unwrap();
        assert_eq!(holder.day, expected);
    }

    #[rstest]
    fn it_should_write_optional_wire_dates() {
        let json = serde_json::to_string(&Holder { day: Some(date(2022, 1, 15)) }).unwrap();
        assert_eq!(json, r#"{"day":"2022-01-15"}"#);
        let json = serde_json::to_string(&Holder { day: None }).unwrap();
        assert_eq!(json, r#"{"day":null}"#);
    }
}
