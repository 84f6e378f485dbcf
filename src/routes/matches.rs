use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::core::Matcher;
use crate::models::{HealthResponse, SlotMatchingRequest, SlotMatchingResponse};
use crate::routes::error_response;
use crate::services::{find_common_slots, MatchError, PostgresClient};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
}

/// Configure health and slot matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/slot", web::post().to(match_slots));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Slot matching endpoint
///
/// POST /api/v1/slot
///
/// Request body:
/// ```json
/// {
///   "candidate": { "id": 1 },
///   "interviewers": [{ "id": 2 }, { "id": 3 }]
/// }
/// ```
///
/// Responds with an array of single-weekday slots, each at most one chunk
/// long.
async fn match_slots(
    state: web::Data<AppState>,
    req: web::Json<SlotMatchingRequest>,
) -> impl Responder {
    let candidate_id = req.candidate.id;

    tracing::info!(
        "Matching slots for candidate {} with {} interviewers",
        candidate_id,
        req.interviewers.len()
    );

    match find_common_slots(state.postgres.as_ref(), &state.matcher, &req).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} slots for candidate {} ({} of {} candidate slots matched)",
                result.slots.len(),
                candidate_id,
                result.surviving_slots,
                result.candidate_slots
            );
            HttpResponse::Ok().json(SlotMatchingResponse { slots: result.slots })
        }
        Err(e) => match_error_response(candidate_id, e),
    }
}

/// 422 for stored availability that does not parse, 500 when it cannot be read
fn match_error_response(candidate_id: i32, err: MatchError) -> HttpResponse {
    match err {
        MatchError::Parse(e) => {
            tracing::warn!("Malformed availability for candidate {}: {}", candidate_id, e);
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Malformed availability", e)
        }
        MatchError::Repository(e) => {
            tracing::error!("Failed to load availability for candidate {}: {}", candidate_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load availability", e)
        }
    }
}
