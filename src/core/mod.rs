// Core algorithm exports
pub mod age_groups;
pub mod availability;
pub mod dates;
pub mod experience;
pub mod matcher;
pub mod requirements;
pub mod scoring;

pub use age_groups::{age_range, AgeRange};
pub use availability::classify_availability;
pub use matcher::{BatchMatches, Matcher};
pub use requirements::{parse_requirements, RequirementsError, VisaOption};
pub use scoring::calculate_match_score;
