use serde_json::Value;
use thiserror::Error;

use crate::models::JobRequirements;

/// Errors that can occur while reading a job's stored requirements
#[derive(Debug, Error)]
pub enum RequirementsError {
    #[error("Malformed requirements JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Requirements must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Parse requirements stored either as a JSON string or as an inline object
///
/// `None`, `null` and blank strings are treated as "no requirements".
pub fn parse_requirements(raw: Option<&Value>) -> Result<JobRequirements, RequirementsError> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(JobRequirements::default()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(JobRequirements::default()),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s)?,
        Some(other) => other.clone(),
    };

    if value.is_object() {
        Ok(serde_json::from_value(value)?)
    } else if value.is_null() {
        Ok(JobRequirements::default())
    } else {
        Err(RequirementsError::NotAnObject(json_kind(&value)))
    }
}

impl JobRequirements {
    /// Lenient entry point used by the scorer: malformed input means no requirements
    pub fn from_raw(raw: Option<&Value>) -> Self {
        parse_requirements(raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring job requirements: {}", e);
            JobRequirements::default()
        })
    }

    /// Minimum years of teaching experience, when the posting states one
    pub fn minimum_experience_years(&self) -> Option<i64> {
        self.minimum_teaching_experience
            .as_deref()
            .map(|raw| parse_leading_int(raw).unwrap_or(0))
    }

    pub fn visa_option(&self) -> Option<VisaOption> {
        self.visa_support.as_deref().map(VisaOption::from_text)
    }
}

/// Visa support categories offered by the posting form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisaOption {
    /// Candidate must already hold the right to work
    MustAlreadyHave,
    CanProvide,
    NotRequired,
    Other(String),
}

impl VisaOption {
    pub fn from_text(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if lowered.contains("must already have") {
            VisaOption::MustAlreadyHave
        } else if lowered.contains("can provide") {
            VisaOption::CanProvide
        } else if lowered.contains("not required") {
            VisaOption::NotRequired
        } else {
            VisaOption::Other(text.to_string())
        }
    }
}

/// Integer prefix of a string, the way form values such as "3+ years" are read
///
/// Leading whitespace and a sign are allowed; returns `None` when no digit follows.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_from_string() {
        let raw = json!(r#"{"tefl": true, "celta": "true", "minimumTeachingExperience": "2"}"#);
        let req = parse_requirements(Some(&raw)).unwrap();
        assert!(req.tefl);
        assert!(req.celta);
        assert!(!req.tesol);
        assert_eq!(req.minimum_experience_years(), Some(2));
    }

    #[test]
    fn test_parse_from_object() {
        let raw = json!({"bachelorsDegree": true, "visaSupport": "Can provide visa"});
        let req = parse_requirements(Some(&raw)).unwrap();
        assert!(req.bachelors_degree);
        assert_eq!(req.visa_option(), Some(VisaOption::CanProvide));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let raw = json!("{invalid json");
        assert!(matches!(
            parse_requirements(Some(&raw)),
            Err(RequirementsError::Malformed(_))
        ));
        assert_eq!(JobRequirements::from_raw(Some(&raw)), JobRequirements::default());
    }

    #[test]
    fn test_non_object_is_an_error() {
        let raw = json!("[1, 2]");
        assert!(matches!(
            parse_requirements(Some(&raw)),
            Err(RequirementsError::NotAnObject(_))
        ));
        assert_eq!(JobRequirements::from_raw(Some(&json!(42))), JobRequirements::default());
    }

    #[test]
    fn test_missing_requirements() {
        assert_eq!(parse_requirements(None).unwrap(), JobRequirements::default());
        assert_eq!(parse_requirements(Some(&Value::Null)).unwrap(), JobRequirements::default());
        assert_eq!(parse_requirements(Some(&json!("  "))).unwrap(), JobRequirements::default());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int("  3+ years"), Some(3));
        assert_eq!(parse_leading_int("2.5"), Some(2));
        assert_eq!(parse_leading_int("-1"), Some(-1));
        assert_eq!(parse_leading_int("none"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_unparseable_minimum_defaults_to_zero() {
        let req = JobRequirements {
            minimum_teaching_experience: Some("some".to_string()),
            ..Default::default()
        };
        assert_eq!(req.minimum_experience_years(), Some(0));
    }

    #[test]
    fn test_numeric_zero_minimum_is_unset() {
        let req = parse_requirements(Some(&json!({"minimumTeachingExperience": 0}))).unwrap();
        assert_eq!(req.minimum_experience_years(), None);

        let req = parse_requirements(Some(&json!({"minimumTeachingExperience": "0"}))).unwrap();
        assert_eq!(req.minimum_experience_years(), Some(0));
    }

    #[test]
    fn test_visa_option_text() {
        assert_eq!(
            VisaOption::from_text("Must already have a valid work visa"),
            VisaOption::MustAlreadyHave
        );
        assert_eq!(VisaOption::from_text("Not required (EU only)"), VisaOption::NotRequired);
        assert_eq!(
            VisaOption::from_text("Negotiable"),
            VisaOption::Other("Negotiable".to_string())
        );
    }
}
