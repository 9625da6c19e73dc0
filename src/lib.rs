//! Teacher Match - compatibility scoring between job postings and teacher profiles
//!
//! This library provides the match scorer used by the schools job board, the
//! availability classifier used by batch matching, and the HTTP routes that
//! expose both. Scoring is pure: callers supply the job and the teacher.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{calculate_match_score, classify_availability, Matcher};
pub use models::{CategorySet, Job, MatchResult, MatchStrength, MatchingOptions, TeacherProfile};
