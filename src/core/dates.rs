use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Empty date")]
    Empty,

    #[error("Unrecognized date format: {0}")]
    Unrecognized(String),
}

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse the date shapes found on profiles and postings
///
/// Dates without an offset are read as UTC. Partial dates (`2021-09`, `2021`)
/// resolve to the first day of the period.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01-01", text), "%Y-%m-%d").ok());

    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| DateParseError::Unrecognized(text.to_string()))
}

/// Length of `[start, end]` in 365-day years; negative when `end` precedes `start`
pub fn years_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.0;
    (end - start).num_milliseconds() as f64 / MILLIS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_date("2020-01-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 1, 15));
    }

    #[test]
    fn test_parse_rfc3339() {
        let date = parse_date("2021-06-01T12:00:00+02:00").unwrap();
        assert_eq!(date.to_rfc3339(), "2021-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_partial_dates() {
        let month = parse_date("2021-09").unwrap();
        assert_eq!((month.year(), month.month(), month.day()), (2021, 9, 1));

        let year = parse_date("2019").unwrap();
        assert_eq!((year.year(), year.month(), year.day()), (2019, 1, 1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), Err(DateParseError::Empty));
        assert!(matches!(parse_date("last summer"), Err(DateParseError::Unrecognized(_))));
    }

    #[test]
    fn test_years_between() {
        let start = parse_date("2020-01-01").unwrap();
        let end = parse_date("2020-12-31").unwrap();
        assert!((years_between(start, end) - 1.0).abs() < 1e-9);
        assert!(years_between(end, start) < 0.0);
    }
}
