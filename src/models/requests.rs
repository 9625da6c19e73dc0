use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CategorySet, Job, TeacherProfile};

/// Largest number of teachers accepted in one batch request
pub const MAX_BATCH_TEACHERS: usize = 5000;
const MAX_BATCH_TEACHERS_U64: u64 = MAX_BATCH_TEACHERS as u64;

/// Request to score one teacher against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatchRequest {
    pub job: Job,
    pub teacher: TeacherProfile,
    /// Overrides the configured category set for this request
    #[serde(alias = "category_set", rename = "categorySet", default)]
    pub category_set: Option<CategorySet>,
}

/// Request to score many teachers against one job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchMatchRequest {
    pub job: Job,
    #[validate(length(max = MAX_BATCH_TEACHERS_U64))]
    #[serde(default)]
    pub teachers: Vec<TeacherProfile>,
}
