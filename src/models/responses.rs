use serde::{Deserialize, Serialize};

use crate::models::domain::{Availability, MatchResult, MatchStrength, TeacherMatch};

/// Response for the single score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatchResponse {
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    pub strength: MatchStrength,
    pub availability: Availability,
}

/// Response for the batch match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMatchResponse {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "byAvailability")]
    pub by_availability: AvailabilityCounts,
    #[serde(rename = "byStrength")]
    pub by_strength: StrengthCounts,
    pub matches: Vec<TeacherMatch>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCounts {
    pub now: usize,
    #[serde(rename = "within30Days")]
    pub within_30_days: usize,
    #[serde(rename = "within3Months")]
    pub within_3_months: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthCounts {
    pub strong: usize,
    pub medium: usize,
    pub partial: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
