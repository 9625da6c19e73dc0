use chrono::{DateTime, Utc};

use crate::core::{availability::classify_availability, scoring::calculate_match_score};
use crate::models::{
    Availability, AvailabilityCounts, CategorySet, Job, MatchResult, MatchStrength,
    MatchingOptions, StrengthCounts, TeacherMatch, TeacherProfile,
};

/// Result of matching one job against many teachers
#[derive(Debug)]
pub struct BatchMatches {
    pub matches: Vec<TeacherMatch>,
    pub total_candidates: usize,
    /// Matches at or above the threshold, before truncation
    pub total_matches: usize,
    pub by_availability: AvailabilityCounts,
    pub by_strength: StrengthCounts,
}

/// Match orchestrator
///
/// Holds only immutable options, so a single instance is shared across workers.
///
/// # Batch pipeline
/// 1. Score every teacher against the job
/// 2. Classify availability against the job start date
/// 3. Drop results below the minimum percentage
/// 4. Group, rank and truncate
#[derive(Debug, Clone)]
pub struct Matcher {
    options: MatchingOptions,
}

impl Matcher {
    pub fn new(options: MatchingOptions) -> Self {
        Self { options }
    }

    pub fn with_default_options() -> Self {
        Self {
            options: MatchingOptions::default(),
        }
    }

    pub fn options(&self) -> &MatchingOptions {
        &self.options
    }

    /// Score with the configured category set
    pub fn score(&self, job: &Job, teacher: &TeacherProfile) -> MatchResult {
        self.score_at(job, teacher, self.options.category_set, Utc::now())
    }

    pub fn score_at(
        &self,
        job: &Job,
        teacher: &TeacherProfile,
        category_set: CategorySet,
        now: DateTime<Utc>,
    ) -> MatchResult {
        calculate_match_score(job, teacher, category_set, now)
    }

    pub fn availability(&self, job: &Job, teacher: &TeacherProfile) -> Availability {
        classify_availability(teacher, job.start_date.as_deref(), Utc::now())
    }

    /// Score every teacher against `job` and keep those worth showing
    pub fn match_teachers(&self, job: &Job, teachers: &[TeacherProfile]) -> BatchMatches {
        self.match_teachers_at(job, teachers, Utc::now())
    }

    pub fn match_teachers_at(
        &self,
        job: &Job,
        teachers: &[TeacherProfile],
        now: DateTime<Utc>,
    ) -> BatchMatches {
        let total_candidates = teachers.len();
        let job_start = job.start_date.as_deref();

        let mut matches: Vec<TeacherMatch> = teachers
            .iter()
            .filter_map(|teacher| {
                let result = calculate_match_score(job, teacher, self.options.category_set, now);
                if result.percentage < self.options.min_percentage {
                    tracing::trace!(
                        "Teacher {:?} below threshold at {}%",
                        teacher.id,
                        result.percentage
                    );
                    return None;
                }

                Some(TeacherMatch {
                    teacher_id: teacher.id.clone(),
                    teacher_name: teacher.full_name(),
                    match_strength: result.percentage,
                    strength: result.strength(),
                    availability: classify_availability(teacher, job_start, now),
                })
            })
            .collect();

        // Highest percentage first, then teacher id for a stable order
        matches.sort_by(|a, b| {
            b.match_strength
                .cmp(&a.match_strength)
                .then_with(|| a.teacher_id.cmp(&b.teacher_id))
        });

        let total_matches = matches.len();
        let by_availability = count_availability(&matches);
        let by_strength = count_strength(&matches);

        matches.truncate(self.options.max_results);

        BatchMatches {
            matches,
            total_candidates,
            total_matches,
            by_availability,
            by_strength,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_options()
    }
}

fn count_availability(matches: &[TeacherMatch]) -> AvailabilityCounts {
    matches
        .iter()
        .fold(AvailabilityCounts::default(), |mut counts, m| {
            match m.availability {
                Availability::Now => counts.now += 1,
                Availability::ThirtyDays => counts.within_30_days += 1,
                Availability::ThreeMonths => counts.within_3_months += 1,
                Availability::Unknown => counts.unknown += 1,
            }
            counts
        })
}

fn count_strength(matches: &[TeacherMatch]) -> StrengthCounts {
    matches.iter().fold(StrengthCounts::default(), |mut counts, m| {
        match m.strength {
            MatchStrength::Strong => counts.strong += 1,
            MatchStrength::Medium => counts.medium += 1,
            MatchStrength::Partial => counts.partial += 1,
            MatchStrength::BelowThreshold => {}
        }
        counts
    })
}
