// Route exports
pub mod matches;
pub mod people;
pub mod slots;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::models::{Candidate, ErrorResponse, Interviewer};
use crate::services::PostgresError;
use validator::ValidationErrors;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(people::configure::<Candidate>)
            .configure(people::configure::<Interviewer>)
            .configure(slots::configure::<Candidate>)
            .configure(slots::configure::<Interviewer>),
    );
}

/// JSON error body with a matching status line
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Map a storage failure onto 404 or 500
pub(crate) fn storage_error(action: &str, err: PostgresError) -> HttpResponse {
    match err {
        PostgresError::NotFound(what) => {
            tracing::info!("{}: {} not found", action, what);
            error_response(StatusCode::NOT_FOUND, "Not found", format!("{} does not exist", what))
        }
        other => {
            tracing::error!("{}: {}", action, other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, action, other)
        }
    }
}

/// 400 for a request body that failed validation
pub(crate) fn validation_error(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Rejected request body: {}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
}

/// 204 once a delete went through
pub(crate) fn deleted(action: &str, result: Result<(), PostgresError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => storage_error(action, e),
    }
}
