use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, Matcher};
use crate::models::{
    Candidate, ErrorResponse, HealthResponse, ScoreRequest, SurveyMatchRequest, TopMatchesRequest,
    TopMatchesResponse,
};
use crate::services::SurveyRow;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/top", web::post().to(find_top_matches))
        .route("/matches/survey", web::post().to(find_survey_matches));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn match_error(err: MatchError) -> HttpResponse {
    match err {
        MatchError::IncompleteSubject(_) => HttpResponse::UnprocessableEntity().json(ErrorResponse {
            error: "Incomplete subject".to_string(),
            message: err.to_string(),
            status_code: 422,
        }),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score a single pair
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "subject": { "id": "string", "personality": 2, "lifestyle": [3, 3, 3, 3, 3, 3, 3, 3], "preferences": {} },
///   "candidate": { "id": "string", ... }
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: {:?}", errors);
        return validation_error(errors);
    }

    let scored = state.matcher.score_pair(&req.subject, &req.candidate);

    tracing::debug!(
        "Scored candidate {} for subject {}: {:.2}",
        scored.id,
        req.subject.id,
        scored.score
    );

    HttpResponse::Ok().json(scored)
}

/// Rank a candidate pool for a subject
///
/// POST /api/v1/matches/top
///
/// Request body:
/// ```json
/// {
///   "subject": { "id": "string", ... },
///   "pool": [{ "id": "string", ... }],
///   "limit": 3
/// }
/// ```
async fn find_top_matches(
    state: web::Data<AppState>,
    req: web::Json<TopMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for top matches request: {:?}", errors);
        return validation_error(errors);
    }

    let limit = state.matching.resolve_limit(req.limit);
    respond_with_matches(&state.matcher, &req.subject, &req.pool, limit)
}

/// Rank mentors for a mentee from raw survey rows
///
/// POST /api/v1/matches/survey
///
/// Request body:
/// ```json
/// {
///   "mentee": { "userId": "1", "topType": "[\"2\"]", "q1": 3, "sportsActivities": "[\"Running\"]" },
///   "mentors": [{ "userId": "2", "firstName": "Ada", ... }],
///   "limit": 3
/// }
/// ```
async fn find_survey_matches(
    state: web::Data<AppState>,
    req: web::Json<SurveyMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for survey match request: {:?}", errors);
        return validation_error(errors);
    }

    let limit = state.matching.resolve_limit(req.limit);
    let SurveyMatchRequest { mentee, mentors, .. } = req.into_inner();

    let subject = mentee.into_candidate();
    let pool: Vec<Candidate> = mentors.into_iter().map(SurveyRow::into_candidate).collect();

    respond_with_matches(&state.matcher, &subject, &pool, limit)
}

fn respond_with_matches(
    matcher: &Matcher,
    subject: &Candidate,
    pool: &[Candidate],
    limit: usize,
) -> HttpResponse {
    tracing::info!("Finding matches for subject: {}, pool: {}, limit: {}", subject.id, pool.len(), limit);

    let matches = match matcher.try_top_matches(subject, pool, limit) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Rejected match request: {}", e);
            return match_error(e);
        }
    };

    let response = TopMatchesResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        matches,
        total_candidates: pool.len(),
    };

    tracing::info!(
        "Returning {} matches for subject {} (from {} candidates)",
        response.matches.len(),
        subject.id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
