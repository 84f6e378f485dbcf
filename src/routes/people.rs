use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Person, PersonPayload};
use crate::services::PostgresError;
use crate::routes::{deleted, matches::AppState, storage_error, validation_error};

/// Register CRUD routes for one kind of person under `/{label}`
pub fn configure<P: Person>(cfg: &mut web::ServiceConfig) {
    let collection = format!("/{}", P::PARTY.label());
    let item = format!("/{}/{{id}}", P::PARTY.label());

    cfg
        .route(&collection, web::get().to(list_people::<P>))
        .route(&collection, web::post().to(create_person::<P>))
        .route(&item, web::get().to(get_person::<P>))
        .route(&item, web::put().to(update_person::<P>))
        .route(&item, web::delete().to(delete_person::<P>));
}

/// GET /api/v1/{candidate|interviewer}
///
/// Answers 204 when nobody is stored yet.
async fn list_people<P: Person>(state: web::Data<AppState>) -> impl Responder {
    people_response(state.postgres.list_people::<P>().await)
}

fn people_response<P: Person>(result: Result<Vec<P>, PostgresError>) -> HttpResponse {
    match result {
        Ok(people) if people.is_empty() => HttpResponse::NoContent().finish(),
        Ok(people) => HttpResponse::Ok().json(people),
        Err(e) => storage_error("Failed to list people", e),
    }
}

/// POST /api/v1/{candidate|interviewer}
///
/// Request body:
/// ```json
/// { "name": "string" }
/// ```
async fn create_person<P: Person>(
    state: web::Data<AppState>,
    req: web::Json<PersonPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.postgres.create_person::<P>(&req.name).await {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => storage_error("Failed to create person", e),
    }
}

async fn get_person<P: Person>(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.get_person::<P>(path.into_inner()).await {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => storage_error("Failed to fetch person", e),
    }
}

async fn update_person<P: Person>(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<PersonPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.postgres.update_person::<P>(path.into_inner(), &req.name).await {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => storage_error("Failed to update person", e),
    }
}

async fn delete_person<P: Person>(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    deleted(
        "Failed to delete person",
        state.postgres.delete_person(P::PARTY, path.into_inner()).await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Interviewer};
    use actix_web::http::StatusCode;

    #[test]
    fn test_empty_listing_is_no_content() {
        let resp = people_response::<Candidate>(Ok(vec![]));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_listing_returns_people() {
        let resp = people_response(Ok(vec![Interviewer::from_parts(2, "Grace".to_string())]));
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let people: Vec<Interviewer> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(people, vec![Interviewer { id: 2, name: "Grace".to_string() }]);
    }
}
