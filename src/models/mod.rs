// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, Category, CategoryScore, CategorySet, Education, Job, JobRequirements,
    MatchResult, MatchStrength, MatchingOptions, TeacherMatch, TeacherProfile, TeachingExperience,
};
pub use requests::{BatchMatchRequest, ScoreMatchRequest};
pub use responses::{
    AvailabilityCounts, BatchMatchResponse, ErrorResponse, HealthResponse, ScoreMatchResponse,
    StrengthCounts,
};
