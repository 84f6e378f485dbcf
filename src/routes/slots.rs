use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Person, SlotPayload};
use crate::routes::{deleted, matches::AppState, storage_error, validation_error};

/// Register availability routes under `/{label}/{id}/slot`
pub fn configure<P: Person>(cfg: &mut web::ServiceConfig) {
    let collection = format!("/{}/{{id}}/slot", P::PARTY.label());
    let item = format!("/{}/{{id}}/slot/{{slot_id}}", P::PARTY.label());

    cfg
        .route(&collection, web::get().to(list_slots::<P>))
        .route(&collection, web::post().to(add_slot::<P>))
        .route(&item, web::put().to(update_slot::<P>))
        .route(&item, web::delete().to(delete_slot::<P>));
}

async fn list_slots<P: Person>(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_slots(P::PARTY, path.into_inner()).await {
        Ok(slots) => HttpResponse::Ok().json(slots),
        Err(e) => storage_error("Failed to list slots", e),
    }
}

/// POST /api/v1/{candidate|interviewer}/{id}/slot
///
/// Request body:
/// ```json
/// {
///   "initial": "09:00:00",
///   "final": "12:00:00",
///   "weekdays": [1, 3]
/// }
/// ```
async fn add_slot<P: Person>(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<SlotPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.postgres.add_slot(P::PARTY, path.into_inner(), &req).await {
        Ok(slot) => HttpResponse::Ok().json(slot),
        Err(e) => storage_error("Failed to add slot", e),
    }
}

async fn update_slot<P: Person>(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    req: web::Json<SlotPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let (owner_id, slot_id) = path.into_inner();
    match state.postgres.update_slot(P::PARTY, owner_id, slot_id, &req).await {
        Ok(slot) => HttpResponse::Ok().json(slot),
        Err(e) => storage_error("Failed to update slot", e),
    }
}

async fn delete_slot<P: Person>(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (owner_id, slot_id) = path.into_inner();
    deleted(
        "Failed to delete slot",
        state.postgres.delete_slot(P::PARTY, owner_id, slot_id).await,
    )
}
