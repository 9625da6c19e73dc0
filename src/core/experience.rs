use chrono::{DateTime, Utc};

use crate::core::dates::{parse_date, years_between, DateParseError};
use crate::models::TeachingExperience;

/// Points for meeting the minimum: 15 base, +2 per extra year, capped at 20
#[inline]
pub fn experience_points(years: f64, minimum: f64) -> Option<f64> {
    if years >= minimum {
        Some((15.0 + (years - minimum) * 2.0).min(20.0))
    } else {
        None
    }
}

/// Duration of one teaching experience entry in years
///
/// Returns `Ok(None)` when either date is missing. An end date of `present`
/// (any case) runs until `now`.
pub fn entry_years(
    entry: &TeachingExperience,
    now: DateTime<Utc>,
) -> Result<Option<f64>, DateParseError> {
    let (Some(start), Some(end)) = (entry.start_date.as_deref(), entry.end_date.as_deref()) else {
        return Ok(None);
    };
    if start.trim().is_empty() || end.trim().is_empty() {
        return Ok(None);
    }

    let start = parse_date(start)?;
    let end = if end.trim().eq_ignore_ascii_case("present") {
        now
    } else {
        parse_date(end)?
    };

    Ok(Some(years_between(start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: Option<&str>, end: Option<&str>) -> TeachingExperience {
        TeachingExperience {
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            student_age_groups: vec![],
        }
    }

    fn now() -> DateTime<Utc> {
        parse_date("2025-01-01").unwrap()
    }

    #[test]
    fn test_points_capped() {
        assert_eq!(experience_points(50.0, 1.0), Some(20.0));
        assert_eq!(experience_points(2.0, 2.0), Some(15.0));
        assert_eq!(experience_points(3.0, 2.0), Some(17.0));
        assert_eq!(experience_points(1.0, 2.0), None);
    }

    #[test]
    fn test_present_runs_until_now() {
        let years = entry_years(&entry(Some("2024-01-02"), Some("Present")), now())
            .unwrap()
            .unwrap();
        assert!((years - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_dates_skipped() {
        assert_eq!(entry_years(&entry(None, Some("present")), now()), Ok(None));
        assert_eq!(entry_years(&entry(Some("2020-01-01"), Some("")), now()), Ok(None));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        assert!(entry_years(&entry(Some("soon"), Some("present")), now()).is_err());
    }
}
