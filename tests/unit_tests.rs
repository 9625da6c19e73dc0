// Unit tests for Teacher Match

use chrono::{DateTime, Utc};
use serde_json::json;
use teacher_match::core::{
    age_groups::age_range,
    availability::classify_availability,
    dates::parse_date,
    scoring::calculate_match_score,
};
use teacher_match::models::{
    Availability, Category, CategorySet, Education, Job, MatchStrength, TeacherProfile,
    TeachingExperience,
};

fn fixed_now() -> DateTime<Utc> {
    parse_date("2025-09-01").unwrap()
}

fn esl_job(requirements: serde_json::Value) -> Job {
    Job {
        id: Some("job_esl".to_string()),
        title: Some("ESL Teacher".to_string()),
        country: Some("Vietnam".to_string()),
        city: Some("Hanoi".to_string()),
        requirements: Some(requirements),
        ..Default::default()
    }
}

fn tefl_teacher() -> TeacherProfile {
    TeacherProfile {
        id: Some("teacher_1".to_string()),
        first_name: Some("Jamie".to_string()),
        last_name: Some("Rivera".to_string()),
        certifications: vec!["TEFL Certificate 2020".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_tefl_only_job_full_qualification_points() {
    let job = esl_job(json!({"tefl": true}));
    let result = calculate_match_score(&job, &tefl_teacher(), CategorySet::Standard, fixed_now());

    let qualifications = &result.breakdown[&Category::Qualifications];
    assert_eq!(qualifications.score, 20.0);
    assert_eq!(qualifications.max_score, 20.0);
}

#[test]
fn test_two_required_one_matched_is_half() {
    let job = esl_job(json!({"tefl": true, "tesol": "true"}));
    let result = calculate_match_score(&job, &tefl_teacher(), CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::Qualifications].score, 10.0);
}

#[test]
fn test_fifty_years_capped_at_twenty() {
    let job = esl_job(json!({"minimumTeachingExperience": "1"}));
    let mut teacher = tefl_teacher();
    teacher.experience_years = Some(50.0);
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::Experience].score, 20.0);
}

#[test]
fn test_experience_years_field_preferred_over_history() {
    let job = esl_job(json!({"minimumTeachingExperience": 5}));
    let mut teacher = tefl_teacher();
    teacher.experience_years = Some(1.0);
    teacher.teaching_experience = vec![TeachingExperience {
        start_date: Some("2010-01-01".to_string()),
        end_date: Some("present".to_string()),
        student_age_groups: vec![],
    }];
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::Experience].score, 0.0);
}

#[test]
fn test_numeric_zero_minimum_not_scored() {
    let job = esl_job(json!({"minimumTeachingExperience": 0}));
    let result = calculate_match_score(&job, &TeacherProfile::default(), CategorySet::Standard, fixed_now());

    let experience = &result.breakdown[&Category::Experience];
    assert_eq!(experience.score, 0.0);
    assert_eq!(experience.max_score, 0.0);
    assert_eq!(result.max_score, 20.0);
    assert_eq!(result.percentage, 0);
}

#[test]
fn test_string_zero_minimum_is_scored() {
    let job = esl_job(json!({"minimumTeachingExperience": "0"}));
    let result = calculate_match_score(&job, &TeacherProfile::default(), CategorySet::Standard, fixed_now());

    // No history counts as 0 years, which meets a 0-year minimum
    let experience = &result.breakdown[&Category::Experience];
    assert_eq!(experience.score, 15.0);
    assert_eq!(experience.max_score, 20.0);
}

#[test]
fn test_shared_boundary_is_overlap() {
    let range = age_range("12-14").unwrap();
    assert!(range.overlaps(14.0, 18.0));

    let mut job = esl_job(json!({}));
    job.student_age_group_min = Some(14.0);
    job.student_age_group_max = Some(18.0);
    let mut teacher = tefl_teacher();
    teacher.age_groups = vec!["12-14".to_string()];
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::AgeGroups].score, 15.0);
}

#[test]
fn test_missing_age_range_not_scored() {
    let job = esl_job(json!({}));
    let result = calculate_match_score(&job, &tefl_teacher(), CategorySet::Standard, fixed_now());

    let age_groups = &result.breakdown[&Category::AgeGroups];
    assert_eq!(age_groups.score, 0.0);
    assert_eq!(age_groups.max_score, 0.0);
}

#[test]
fn test_invalid_requirements_json_treated_as_empty() {
    let job = esl_job(json!("{invalid json"));
    let result = calculate_match_score(&job, &tefl_teacher(), CategorySet::Extended, fixed_now());

    // Only degree and location apply
    assert_eq!(result.max_score, 20.0);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.percentage, 0);
}

#[test]
fn test_unconditional_categories_always_present() {
    let job = Job::default();
    let teacher = TeacherProfile::default();
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::Degree].max_score, 15.0);
    assert_eq!(result.breakdown[&Category::Location].max_score, 5.0);
    assert_eq!(result.max_score, 20.0);
}

#[test]
fn test_percentage_within_bounds() {
    let jobs = vec![
        esl_job(json!({})),
        esl_job(json!({"tefl": true, "celta": true, "tesol": true, "delta": true})),
        esl_job(json!({"bachelorsDegree": true, "minimumTeachingExperience": 0})),
        esl_job(json!({"visaSupport": "Must already have work visa"})),
    ];
    let mut strong = tefl_teacher();
    strong.willing_to_relocate = true;
    strong.experience_years = Some(10.0);
    strong.education = vec![Education {
        degree: Some("PhD Linguistics, DELTA".to_string()),
        institution: None,
    }];
    let teachers = vec![TeacherProfile::default(), tefl_teacher(), strong];

    for job in &jobs {
        for teacher in &teachers {
            for set in [CategorySet::Standard, CategorySet::Extended] {
                let result = calculate_match_score(job, teacher, set, fixed_now());
                assert!(result.percentage <= 100);
                assert!(result.score <= result.max_score);
            }
        }
    }
}

#[test]
fn test_strength_matches_percentage() {
    let mut teacher = tefl_teacher();
    teacher.willing_to_relocate = true;
    teacher.education = vec![Education {
        degree: Some("Bachelor of Science".to_string()),
        institution: None,
    }];
    let job = esl_job(json!({"tefl": true}));
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.percentage, 100);
    assert_eq!(result.strength(), MatchStrength::Strong);
}

#[test]
fn test_availability_priority() {
    let teacher = TeacherProfile {
        availability: Some("Available now".to_string()),
        start_date: Some("2030-01-01".to_string()),
        ..Default::default()
    };
    assert_eq!(
        classify_availability(&teacher, Some("2030-01-01"), fixed_now()),
        Availability::Now
    );

    let teacher = TeacherProfile::default();
    assert_eq!(
        classify_availability(&teacher, Some("2025-10-15"), fixed_now()),
        Availability::ThreeMonths
    );
}

#[test]
fn test_teacher_json_with_embedded_history() {
    let teacher: TeacherProfile = serde_json::from_value(json!({
        "id": "t9",
        "certifications": ["CELTA"],
        "education": [{"degree": "Master of Arts"}],
        "experienceYears": null,
        "teachingExperience": "[{\"startDate\":\"2019-09-01\",\"endDate\":\"2023-09-01\",\"studentAgeGroups\":[\"Teens (13-17)\"]}]",
        "ageGroups": null,
        "willingToRelocate": false,
        "preferredLocations": ["Northern Vietnam"]
    }))
    .unwrap();

    let mut job = esl_job(json!({"celta": true, "minimumTeachingExperience": "3 years"}));
    job.student_age_group_min = Some(15.0);
    job.student_age_group_max = Some(17.0);
    let result = calculate_match_score(&job, &teacher, CategorySet::Standard, fixed_now());

    assert_eq!(result.breakdown[&Category::Qualifications].score, 20.0);
    assert_eq!(result.breakdown[&Category::Degree].score, 15.0);
    assert!(result.breakdown[&Category::Experience].score > 15.0);
    assert_eq!(result.breakdown[&Category::AgeGroups].score, 15.0);
    assert_eq!(result.breakdown[&Category::Location].score, 5.0);
}
