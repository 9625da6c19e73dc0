use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::core::age_groups::age_range;
use crate::core::experience::{entry_years, experience_points};
use crate::core::requirements::VisaOption;
use crate::models::{Category, CategoryScore, CategorySet, Job, JobRequirements, MatchResult, TeacherProfile};

pub const QUALIFICATION_POINTS: f64 = 20.0;
pub const DEGREE_POINTS: f64 = 15.0;
pub const EXPERIENCE_POINTS: f64 = 20.0;
pub const AGE_GROUP_POINTS: f64 = 15.0;
pub const SUBJECT_POINTS: f64 = 15.0;
pub const VISA_POINTS: f64 = 10.0;
pub const LOCATION_POINTS: f64 = 5.0;

/// Score a teacher against a job (0-100%) with a per-category breakdown
///
/// Only categories the job actually specifies count toward `max_score`, so
/// the denominator varies between postings. Degree and location always count.
///
/// | category       | points | scored when                          |
/// |----------------|--------|--------------------------------------|
/// | qualifications | 20     | any of TEFL/CELTA/TESOL/DELTA set    |
/// | degree         | 15     | always                               |
/// | experience     | 20     | minimum experience given             |
/// | age groups     | 15     | both student age bounds given        |
/// | subjects       | 15     | `subjectsTaught` given (extended)    |
/// | visa           | 10     | visa support given (extended)        |
/// | location       | 5      | always                               |
///
/// `now` resolves "present" end dates on teaching experience.
pub fn calculate_match_score(
    job: &Job,
    teacher: &TeacherProfile,
    category_set: CategorySet,
    now: DateTime<Utc>,
) -> MatchResult {
    let requirements = JobRequirements::from_raw(job.requirements.as_ref());
    tracing::trace!("Job requirements parsed: {:?}", requirements);

    let breakdown: BTreeMap<Category, CategoryScore> = category_set
        .categories()
        .iter()
        .map(|&category| {
            let entry = match category {
                Category::Qualifications => score_qualifications(&requirements, teacher),
                Category::Degree => score_degree(&requirements, teacher),
                Category::Experience => score_experience(&requirements, teacher, now),
                Category::AgeGroups => score_age_groups(job, teacher),
                Category::Subjects => score_subjects(job, teacher),
                Category::Visa => score_visa(&requirements, job, teacher),
                Category::Location => score_location(job, teacher),
            };
            tracing::debug!(
                "{:?}: {:.2}/{:.2} for teacher {:?}",
                category,
                entry.score,
                entry.max_score,
                teacher.id
            );
            (category, entry)
        })
        .collect();

    MatchResult::from_breakdown(breakdown)
}

/// Proportional: each selected certificate is worth an equal share of 20 points
fn score_qualifications(requirements: &JobRequirements, teacher: &TeacherProfile) -> CategoryScore {
    let selected = requirements.selected_qualifications();
    if selected.is_empty() {
        return CategoryScore::not_scored("No qualifications required (not scored)");
    }

    let per_qualification = QUALIFICATION_POINTS / selected.len() as f64;
    let mut entry = CategoryScore::scored(QUALIFICATION_POINTS);
    entry.note(format!(
        "Selected qualifications in job: {} ({})",
        selected.len(),
        selected.join(", ")
    ));
    entry.note(format!(
        "Points per qualification: {:.2} ({} total / {} qualifications)",
        per_qualification,
        QUALIFICATION_POINTS,
        selected.len()
    ));

    let mut matched = 0;
    for name in &selected {
        if teacher.holds_qualification(name) {
            matched += 1;
            entry.award(
                per_qualification,
                format!("{}: found (+{:.2} points)", name, per_qualification),
            );
        } else {
            entry.note(format!("{}: required but not found (0 points)", name));
        }
    }

    entry.note(format!(
        "Summary: {}/{} qualifications matched",
        matched,
        selected.len()
    ));
    entry
}

/// Any academic degree earns the points, required or not
fn score_degree(requirements: &JobRequirements, teacher: &TeacherProfile) -> CategoryScore {
    let mut entry = CategoryScore::scored(DEGREE_POINTS);

    match (requirements.bachelors_degree, teacher.academic_degree()) {
        (true, Some(degree)) => entry.award(
            DEGREE_POINTS,
            format!("Degree found: \"{}\" (+{} points)", degree, DEGREE_POINTS),
        ),
        (true, None) => entry.note("Bachelor's degree: required but not found (0 points)"),
        (false, Some(degree)) => entry.award(
            DEGREE_POINTS,
            format!(
                "No degree requirement, but teacher has: \"{}\" (overskilled, +{} points)",
                degree, DEGREE_POINTS
            ),
        ),
        (false, None) => entry.note("No degree requirement and no degree on profile (0 points)"),
    }

    entry
}

fn score_experience(
    requirements: &JobRequirements,
    teacher: &TeacherProfile,
    now: DateTime<Utc>,
) -> CategoryScore {
    let Some(minimum) = requirements.minimum_experience_years() else {
        return CategoryScore::not_scored("No minimum experience requirement (not scored)");
    };

    let minimum = minimum as f64;
    let mut entry = CategoryScore::scored(EXPERIENCE_POINTS);
    entry.note(format!("Job requires: {} years minimum", minimum));

    let years = match teacher.experience_years {
        Some(years) => {
            entry.note(format!("Teacher experienceYears field: {} years", years));
            years
        }
        None => {
            entry.note(format!(
                "experienceYears not set, checking {} teaching experience entries",
                teacher.teaching_experience.len()
            ));
            summed_teaching_years(teacher, now, &mut entry)
        }
    };

    match experience_points(years, minimum) {
        Some(points) => {
            entry.note(format!(
                "Meets requirement (exceeds by {:.1} years)",
                years - minimum
            ));
            entry.award(
                points,
                format!(
                    "Score calculation: 15 base + ({:.1} x 2), capped at {} = {:.1} points",
                    years - minimum,
                    EXPERIENCE_POINTS,
                    points
                ),
            );
        }
        None => entry.note(format!(
            "Insufficient: {:.1} < {} (0 points)",
            years, minimum
        )),
    }

    entry
}

fn summed_teaching_years(
    teacher: &TeacherProfile,
    now: DateTime<Utc>,
    entry: &mut CategoryScore,
) -> f64 {
    let mut total = 0.0;

    for (idx, exp) in teacher.teaching_experience.iter().enumerate() {
        match entry_years(exp, now) {
            Ok(Some(years)) if years > 0.0 => {
                total += years;
                entry.note(format!(
                    "  Entry {}: {} to {} = {:.1} years",
                    idx + 1,
                    exp.start_date.as_deref().unwrap_or_default(),
                    exp.end_date.as_deref().unwrap_or_default(),
                    years
                ));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Skipping teaching experience entry {}: {}", idx + 1, e);
                entry.note(format!("  Entry {}: skipped ({})", idx + 1, e));
            }
        }
    }

    entry.note(format!("Total calculated experience: {:.1} years", total));
    total
}

fn score_age_groups(job: &Job, teacher: &TeacherProfile) -> CategoryScore {
    let Some((job_min, job_max)) = job.age_range() else {
        return CategoryScore::not_scored("No age group requirement (not scored)");
    };

    let mut entry = CategoryScore::scored(AGE_GROUP_POINTS);
    entry.note(format!("Job age range: {}-{} years", job_min, job_max));

    let groups = teacher.all_age_groups();
    if groups.is_empty() {
        entry.note("Teacher has no age groups on profile or experience");
    }

    let mut overlap = false;
    for label in groups {
        match age_range(label) {
            Some(range) if range.overlaps(job_min, job_max) => {
                overlap = true;
                entry.note(format!(
                    "{}: [{}, {}] overlaps job range",
                    label, range.min, range.max
                ));
            }
            Some(range) => entry.note(format!(
                "{}: [{}, {}] no overlap",
                label, range.min, range.max
            )),
            None => {
                tracing::debug!("Unknown age group format: {:?}", label);
                entry.note(format!("Unknown age group format: \"{}\" (ignored)", label));
            }
        }
    }

    if overlap {
        entry.award(
            AGE_GROUP_POINTS,
            format!("Age group match (+{} points)", AGE_GROUP_POINTS),
        );
    } else {
        entry.note("No overlap found (0 points)");
    }

    entry
}

/// Whole words in a subject that mark English as a foreign language
const ENGLISH_TEACHING_WORDS: [&str; 2] = ["esl", "efl"];

fn teaches_english(subject: &str) -> bool {
    let lowered = subject.to_lowercase();
    lowered.contains("english")
        || lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| ENGLISH_TEACHING_WORDS.contains(&word))
}

fn score_subjects(job: &Job, teacher: &TeacherProfile) -> CategoryScore {
    let subjects = job.subjects();
    if subjects.is_empty() {
        return CategoryScore::not_scored("No subjects listed (not scored)");
    }

    let mut entry = CategoryScore::scored(SUBJECT_POINTS);
    entry.note(format!("Job subjects: {}", subjects.join(", ")));

    let teacher_subjects: Vec<String> = teacher
        .subjects
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if subjects[0].to_lowercase().contains("english") {
        if let Some(subject) = teacher.subjects.iter().find(|s| teaches_english(s)) {
            entry.award(
                SUBJECT_POINTS,
                format!(
                    "English is the primary subject and teacher teaches \"{}\" (+{} points)",
                    subject, SUBJECT_POINTS
                ),
            );
            return entry;
        }
    }

    let per_subject = SUBJECT_POINTS / subjects.len() as f64;
    let mut matched = 0;
    for subject in &subjects {
        let wanted = subject.to_lowercase();
        let covered = teacher_subjects
            .iter()
            .any(|t| t.contains(&wanted) || wanted.contains(t.as_str()));
        if covered {
            matched += 1;
            entry.award(
                per_subject,
                format!("{}: covered (+{:.2} points)", subject, per_subject),
            );
        } else {
            entry.note(format!("{}: not covered (0 points)", subject));
        }
    }

    entry.note(format!(
        "Summary: {}/{} subjects covered",
        matched,
        subjects.len()
    ));
    entry
}

/// Phrases in a visa status that show an existing right to work
const RIGHT_TO_WORK_PHRASES: [&str; 6] = [
    "citizen",
    "permanent resident",
    "work visa",
    "work permit",
    "authorized",
    "authorised",
];

fn shows_right_to_work(statement: &str, country: Option<&str>) -> bool {
    let lowered = statement.to_lowercase();
    if lowered.contains("need") || lowered.contains("require") {
        return false;
    }

    let names_country = country
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .is_some_and(|c| lowered.contains(&c));

    names_country || RIGHT_TO_WORK_PHRASES.iter().any(|p| lowered.contains(p))
}

fn score_visa(requirements: &JobRequirements, job: &Job, teacher: &TeacherProfile) -> CategoryScore {
    let Some(option) = requirements.visa_option() else {
        return CategoryScore::not_scored("No visa support requirement (not scored)");
    };

    let mut entry = CategoryScore::scored(VISA_POINTS);
    match option {
        VisaOption::CanProvide => entry.award(
            VISA_POINTS,
            format!("School can provide a visa (+{} points)", VISA_POINTS),
        ),
        VisaOption::NotRequired => entry.award(
            VISA_POINTS,
            format!("Visa not required (+{} points)", VISA_POINTS),
        ),
        VisaOption::MustAlreadyHave => {
            let evidence = teacher
                .visa_status
                .iter()
                .chain(teacher.work_authorization.iter())
                .find(|statement| shows_right_to_work(statement, job.country.as_deref()));

            match evidence {
                Some(statement) => entry.award(
                    VISA_POINTS,
                    format!(
                        "Existing right to work: \"{}\" (+{} points)",
                        statement, VISA_POINTS
                    ),
                ),
                None => entry.note("Visa required up front but teacher shows none (0 points)"),
            }
        }
        VisaOption::Other(text) => {
            tracing::debug!("Unrecognized visa support option: {:?}", text);
            entry.note(format!("Unrecognized visa option \"{}\" (0 points)", text));
        }
    }

    entry
}

/// Substring match that never matches on a blank job location
fn names_place(location: &str, place: Option<&str>) -> bool {
    match place.map(str::trim) {
        Some(place) if !place.is_empty() => location.to_lowercase().contains(&place.to_lowercase()),
        _ => false,
    }
}

fn score_location(job: &Job, teacher: &TeacherProfile) -> CategoryScore {
    let mut entry = CategoryScore::scored(LOCATION_POINTS);
    entry.note(format!(
        "Job location: {}, {}",
        job.city.as_deref().unwrap_or("?"),
        job.country.as_deref().unwrap_or("?")
    ));

    if teacher.willing_to_relocate {
        entry.award(
            LOCATION_POINTS,
            format!("Willing to relocate (+{} points)", LOCATION_POINTS),
        );
        return entry;
    }

    let preferred = teacher.preferred_locations.iter().find(|loc| {
        names_place(loc, job.country.as_deref()) || names_place(loc, job.city.as_deref())
    });

    match preferred {
        Some(location) => entry.award(
            LOCATION_POINTS,
            format!(
                "Preferred location matches: \"{}\" (+{} points)",
                location, LOCATION_POINTS
            ),
        ),
        None => entry.note("No location match (0 points)"),
    }

    entry
}
