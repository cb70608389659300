use crate::error::{ProcessingError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp layouts accepted for naive (offset-free) values, tried in order
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, interpreted as midnight
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// Parse a timestamp from text.
///
/// Accepts RFC 3339 values with an offset (normalized to UTC), naive
/// date-times and plain dates. A plain date becomes midnight of that day.
///
/// ```
/// use air_quality_processor::utils::parse_timestamp;
///
/// let ts = parse_timestamp("2024-01-05T12:30:00Z").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-05 12:30:00");
/// ```
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    // Offsets written with a space separator, e.g. "2024-01-05 12:30:00+02:00"
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(ProcessingError::DateParse {
        value: text.to_string(),
        row: None,
    })
}

/// A date-like filter boundary: an existing timestamp, a calendar date,
/// or text still to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum DateBound {
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
}

impl DateBound {
    pub fn resolve(&self) -> Result<NaiveDateTime> {
        match self {
            DateBound::Timestamp(ts) => Ok(*ts),
            DateBound::Date(date) => Ok(date.and_time(NaiveTime::MIN)),
            DateBound::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<NaiveDateTime> for DateBound {
    fn from(value: NaiveDateTime) -> Self {
        DateBound::Timestamp(value)
    }
}

impl From<NaiveDate> for DateBound {
    fn from(value: NaiveDate) -> Self {
        DateBound::Date(value)
    }
}

impl From<&str> for DateBound {
    fn from(value: &str) -> Self {
        DateBound::Text(value.to_string())
    }
}

impl From<String> for DateBound {
    fn from(value: String) -> Self {
        DateBound::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_plain_date_is_midnight() {
        assert_eq!(parse_timestamp("2024-01-05").unwrap(), ts(2024, 1, 5, 0, 0));
        assert_eq!(parse_timestamp("2024/01/05").unwrap(), ts(2024, 1, 5, 0, 0));
        assert_eq!(parse_timestamp(" 20240105 ").unwrap(), ts(2024, 1, 5, 0, 0));
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_timestamp("2024-01-05 13:45:00").unwrap(),
            ts(2024, 1, 5, 13, 45)
        );
        assert_eq!(
            parse_timestamp("2024-01-05T13:45").unwrap(),
            ts(2024, 1, 5, 13, 45)
        );
    }

    #[test]
    fn test_parse_offset_is_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-05T13:45:00+02:00").unwrap(),
            ts(2024, 1, 5, 11, 45)
        );
        assert_eq!(
            parse_timestamp("2024-01-05 13:45:00+02:00").unwrap(),
            ts(2024, 1, 5, 11, 45)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, ProcessingError::DateParse { row: None, .. }));
    }

    #[test]
    fn test_date_bound_resolution() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(DateBound::from(date).resolve().unwrap(), ts(2024, 3, 1, 0, 0));
        assert_eq!(
            DateBound::from("2024-03-01 06:00:00").resolve().unwrap(),
            ts(2024, 3, 1, 6, 0)
        );
        assert!(DateBound::from("not a date").resolve().is_err());
    }
}
