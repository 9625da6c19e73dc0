use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Matcher;
use crate::models::requests::MAX_BATCH_TEACHERS;
use crate::models::{
    BatchMatchRequest, BatchMatchResponse, ErrorResponse, HealthResponse, ScoreMatchRequest,
    ScoreMatchResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_match))
        .route("/matches/batch", web::post().to(batch_match));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one teacher against one job
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "job": { "country": "Japan", "requirements": "{\"tefl\": true}" },
///   "teacher": { "certifications": ["TEFL"] },
///   "categorySet": "standard"
/// }
/// ```
async fn score_match(
    state: web::Data<AppState>,
    req: web::Json<ScoreMatchRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let category_set = req
        .category_set
        .unwrap_or(state.matcher.options().category_set);

    let result = state
        .matcher
        .score_at(&req.job, &req.teacher, category_set, chrono::Utc::now());
    let availability = state.matcher.availability(&req.job, &req.teacher);

    tracing::info!(
        "Scored teacher {:?} against job {:?}: {}% ({}/{})",
        req.teacher.id,
        req.job.id,
        result.percentage,
        result.score,
        result.max_score
    );

    HttpResponse::Ok().json(ScoreMatchResponse {
        strength: result.strength(),
        availability,
        match_result: result,
    })
}

/// Score many teachers against one job
///
/// POST /api/v1/matches/batch
///
/// Request body:
/// ```json
/// {
///   "job": { "id": "job_1", "startDate": "2025-09-01" },
///   "teachers": [{ "id": "t1", "firstName": "Ana" }]
/// }
/// ```
async fn batch_match(
    state: web::Data<AppState>,
    req: web::Json<BatchMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for batch request with {} teachers: {:?}",
            req.teachers.len(),
            errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: format!(
                "At most {} teachers per request: {}",
                MAX_BATCH_TEACHERS, errors
            ),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let result = state.matcher.match_teachers(&req.job, &req.teachers);

    tracing::info!(
        "Returning {} matches for job {:?} (from {} candidates)",
        result.matches.len(),
        req.job.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(BatchMatchResponse {
        job_id: req.job.id,
        total_candidates: result.total_candidates,
        total_matches: result.total_matches,
        by_availability: result.by_availability,
        by_strength: result.by_strength,
        matches: result.matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_reports_crate_version() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
