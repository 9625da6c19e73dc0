use chrono::{DateTime, Duration, Months, Utc};

use crate::core::dates::parse_date;
use crate::models::{Availability, TeacherProfile};

/// Classify how soon a teacher could start
///
/// Rules, first match wins:
/// 1. keywords in the teacher's availability text
/// 2. the teacher's start date against now / +30 days / +3 months
/// 3. the job's start date against the same thresholds
/// 4. unknown
pub fn classify_availability(
    teacher: &TeacherProfile,
    job_start_date: Option<&str>,
    now: DateTime<Utc>,
) -> Availability {
    if let Some(found) = teacher.availability.as_deref().and_then(from_keywords) {
        return found;
    }

    let thresholds = Thresholds::from(now);

    [teacher.start_date.as_deref(), job_start_date]
        .into_iter()
        .flatten()
        .find_map(|date| match parse_date(date) {
            Ok(date) => thresholds.bucket(date),
            Err(e) => {
                tracing::debug!("Ignoring start date {:?}: {}", date, e);
                None
            }
        })
        .unwrap_or(Availability::Unknown)
}

fn from_keywords(text: &str) -> Option<Availability> {
    let text = text.to_lowercase();
    if text.contains("immediate") || text.contains("now") {
        Some(Availability::Now)
    } else if text.contains("30 days") || text.contains("within 30") {
        Some(Availability::ThirtyDays)
    } else if text.contains("3 months") || text.contains("within 3") {
        Some(Availability::ThreeMonths)
    } else {
        None
    }
}

struct Thresholds {
    now: DateTime<Utc>,
    thirty_days: DateTime<Utc>,
    three_months: DateTime<Utc>,
}

impl From<DateTime<Utc>> for Thresholds {
    fn from(now: DateTime<Utc>) -> Self {
        let thirty_days = now + Duration::days(30);
        let three_months = now
            .checked_add_months(Months::new(3))
            .unwrap_or(now + Duration::days(90));
        Self {
            now,
            thirty_days,
            three_months,
        }
    }
}

impl Thresholds {
    /// `None` for dates beyond three months, so the next rule gets a chance
    fn bucket(&self, date: DateTime<Utc>) -> Option<Availability> {
        if date <= self.now {
            Some(Availability::Now)
        } else if date <= self.thirty_days {
            Some(Availability::ThirtyDays)
        } else if date <= self.three_months {
            Some(Availability::ThreeMonths)
        } else {
            None
        }
    }
}
