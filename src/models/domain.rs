use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient::{embedded_list, flag, number_or_none, string_list, text_or_none, text_or_number};

/// Job posting, reduced to the fields that take part in matching
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, deserialize_with = "text_or_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub city: Option<String>,
    #[serde(rename = "studentAgeGroupMin", default, deserialize_with = "number_or_none")]
    pub student_age_group_min: Option<f64>,
    #[serde(rename = "studentAgeGroupMax", default, deserialize_with = "number_or_none")]
    pub student_age_group_max: Option<f64>,
    #[serde(rename = "subjectsTaught", default, deserialize_with = "text_or_none")]
    pub subjects_taught: Option<String>,
    #[serde(rename = "startDate", default, deserialize_with = "text_or_none")]
    pub start_date: Option<String>,
    /// Raw requirements as stored: a JSON string, an object, or nothing
    #[serde(default)]
    pub requirements: Option<Value>,
}

impl Job {
    /// Subjects listed in `subjectsTaught`, in posting order
    pub fn subjects(&self) -> Vec<&str> {
        self.subjects_taught
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Student age range, only when both bounds are set
    pub fn age_range(&self) -> Option<(f64, f64)> {
        match (self.student_age_group_min, self.student_age_group_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// Requirements a school attaches to a posting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default, deserialize_with = "flag")]
    pub tefl: bool,
    #[serde(default, deserialize_with = "flag")]
    pub celta: bool,
    #[serde(default, deserialize_with = "flag")]
    pub tesol: bool,
    #[serde(default, deserialize_with = "flag")]
    pub delta: bool,
    #[serde(rename = "bachelorsDegree", default, deserialize_with = "flag")]
    pub bachelors_degree: bool,
    #[serde(rename = "minimumTeachingExperience", default, deserialize_with = "text_or_number")]
    pub minimum_teaching_experience: Option<String>,
    #[serde(rename = "visaSupport", default, deserialize_with = "text_or_number")]
    pub visa_support: Option<String>,
    #[serde(rename = "classroomExperience", default, deserialize_with = "flag")]
    pub classroom_experience: bool,
    #[serde(rename = "onlineExperience", default, deserialize_with = "flag")]
    pub online_experience: bool,
}

impl JobRequirements {
    /// Certificates the posting asks for, in fixed TEFL/CELTA/TESOL/DELTA order
    pub fn selected_qualifications(&self) -> Vec<&'static str> {
        [
            ("TEFL", self.tefl),
            ("CELTA", self.celta),
            ("TESOL", self.tesol),
            ("DELTA", self.delta),
        ]
        .into_iter()
        .filter(|(_, selected)| *selected)
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "text_or_none")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeachingExperience {
    #[serde(rename = "startDate", default, deserialize_with = "text_or_none")]
    pub start_date: Option<String>,
    /// A date, or the literal `present`
    #[serde(rename = "endDate", default, deserialize_with = "text_or_none")]
    pub end_date: Option<String>,
    #[serde(rename = "studentAgeGroups", default, deserialize_with = "string_list")]
    pub student_age_groups: Vec<String>,
}

/// Teacher profile, reduced to the fields that take part in matching
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(default, deserialize_with = "text_or_none")]
    pub id: Option<String>,
    #[serde(rename = "firstName", default, deserialize_with = "text_or_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, deserialize_with = "text_or_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "embedded_list")]
    pub education: Vec<Education>,
    #[serde(rename = "experienceYears", default, deserialize_with = "number_or_none")]
    pub experience_years: Option<f64>,
    #[serde(rename = "teachingExperience", default, deserialize_with = "embedded_list")]
    pub teaching_experience: Vec<TeachingExperience>,
    #[serde(rename = "ageGroups", default, deserialize_with = "string_list")]
    pub age_groups: Vec<String>,
    #[serde(rename = "visaStatus", default, deserialize_with = "text_or_none")]
    pub visa_status: Option<String>,
    #[serde(rename = "workAuthorization", default, deserialize_with = "string_list")]
    pub work_authorization: Vec<String>,
    #[serde(rename = "willingToRelocate", default, deserialize_with = "flag")]
    pub willing_to_relocate: bool,
    #[serde(rename = "preferredLocations", default, deserialize_with = "string_list")]
    pub preferred_locations: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub subjects: Vec<String>,
    /// Free text such as "Immediately" or "Within 3 months"
    #[serde(default, deserialize_with = "text_or_none")]
    pub availability: Option<String>,
    #[serde(rename = "startDate", default, deserialize_with = "text_or_none")]
    pub start_date: Option<String>,
}

const DEGREE_KEYWORDS: [&str; 4] = ["bachelor", "master", "phd", "degree"];

impl TeacherProfile {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{} {}", first, last).trim().to_string()
    }

    fn degrees(&self) -> impl Iterator<Item = &str> {
        self.education.iter().filter_map(|edu| edu.degree.as_deref())
    }

    /// Whether a certification or a degree mentions `name` (case-insensitive)
    pub fn holds_qualification(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.certifications
            .iter()
            .map(String::as_str)
            .chain(self.degrees())
            .any(|text| text.to_lowercase().contains(&needle))
    }

    /// First education entry that reads like an academic degree
    pub fn academic_degree(&self) -> Option<&str> {
        self.degrees().find(|degree| {
            let degree = degree.to_lowercase();
            DEGREE_KEYWORDS.iter().any(|keyword| degree.contains(keyword))
        })
    }

    /// Profile age groups plus those recorded on teaching experience, deduplicated
    pub fn all_age_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        let experience_groups = self
            .teaching_experience
            .iter()
            .flat_map(|exp| exp.student_age_groups.iter());

        for group in self.age_groups.iter().chain(experience_groups) {
            if !groups.contains(&group.as_str()) {
                groups.push(group.as_str());
            }
        }
        groups
    }
}

/// Scoring categories, in the order they are evaluated and reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Qualifications,
    Degree,
    Experience,
    AgeGroups,
    Subjects,
    Visa,
    Location,
}

/// Which categories a scorer evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySet {
    /// Qualifications, degree, experience, age groups and location
    Standard,
    /// Standard plus subjects and visa support
    #[default]
    Extended,
}

impl CategorySet {
    pub fn categories(&self) -> &'static [Category] {
        match self {
            CategorySet::Standard => &[
                Category::Qualifications,
                Category::Degree,
                Category::Experience,
                Category::AgeGroups,
                Category::Location,
            ],
            CategorySet::Extended => &[
                Category::Qualifications,
                Category::Degree,
                Category::Experience,
                Category::AgeGroups,
                Category::Subjects,
                Category::Visa,
                Category::Location,
            ],
        }
    }
}

/// Points and reasoning for a single category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    #[serde(rename = "maxScore")]
    pub max_score: f64,
    pub details: Vec<String>,
}

impl CategoryScore {
    /// A category that counts toward the total with `max_score` points available
    pub fn scored(max_score: f64) -> Self {
        Self {
            score: 0.0,
            max_score,
            details: Vec::new(),
        }
    }

    /// A category the job does not ask for; excluded from the total
    pub fn not_scored(reason: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            max_score: 0.0,
            details: vec![reason.into()],
        }
    }

    pub fn award(&mut self, points: f64, detail: impl Into<String>) {
        self.score += points;
        self.details.push(detail.into());
    }

    pub fn note(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }
}

/// Compatibility of one teacher with one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    #[serde(rename = "maxScore")]
    pub max_score: f64,
    pub percentage: u8,
    pub breakdown: BTreeMap<Category, CategoryScore>,
}

impl MatchResult {
    pub fn from_breakdown(breakdown: BTreeMap<Category, CategoryScore>) -> Self {
        let score: f64 = breakdown.values().map(|c| c.score).sum();
        let max_score: f64 = breakdown.values().map(|c| c.max_score).sum();

        Self {
            score,
            max_score,
            percentage: percentage(score, max_score),
            breakdown,
        }
    }

    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_percentage(self.percentage)
    }
}

/// `round(100 * score / max_score)`, or 0 when nothing was scored
pub fn percentage(score: f64, max_score: f64) -> u8 {
    if max_score <= 0.0 {
        return 0;
    }
    (100.0 * score / max_score).round().clamp(0.0, 100.0) as u8
}

/// Coarse label for a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStrength {
    Strong,
    Medium,
    Partial,
    BelowThreshold,
}

impl MatchStrength {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            MatchStrength::Strong
        } else if percentage >= 60 {
            MatchStrength::Medium
        } else if percentage >= 40 {
            MatchStrength::Partial
        } else {
            MatchStrength::BelowThreshold
        }
    }
}

/// How soon a teacher could start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "now")]
    Now,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Scored teacher in a batch match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherMatch {
    #[serde(rename = "teacherId")]
    pub teacher_id: Option<String>,
    #[serde(rename = "teacherName")]
    pub teacher_name: String,
    #[serde(rename = "matchStrength")]
    pub match_strength: u8,
    pub strength: MatchStrength,
    pub availability: Availability,
}

/// Matching options
#[derive(Debug, Clone, Copy)]
pub struct MatchingOptions {
    pub category_set: CategorySet,
    /// Batch results below this percentage are dropped
    pub min_percentage: u8,
    /// Batch results returned after filtering
    pub max_results: usize,
}

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            category_set: CategorySet::Extended,
            min_percentage: 40,
            max_results: 100,
        }
    }
}
