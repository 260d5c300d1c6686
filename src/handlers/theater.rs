use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::{Performance, PlaceListing};
use crate::store::ReservationStore;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;

#[derive(Serialize)]
struct PerformancesBody {
    performances: Vec<Performance>,
}

#[derive(Serialize)]
struct PlacesBody {
    places: Vec<PlaceListing>,
}

pub async fn list_performances(
    State(store): State<ReservationStore>,
) -> Result<Response, AppError> {
    let performances = store.performances().await?;
    Ok(Json(PerformancesBody { performances }).into_response())
}

pub async fn list_places(
    State(store): State<ReservationStore>,
    Path(perform_id): Path<i64>,
) -> Result<Response, AppError> {
    let places = store.places(perform_id).await?;
    Ok(Json(PlacesBody { places }).into_response())
}

/// Price as plain text, or 404 when no seat matches both ids.
pub async fn place_price(
    State(store): State<ReservationStore>,
    Path((perform_id, place_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    match store.place_price(perform_id, place_id).await? {
        Some(price) => Ok(price.to_string().into_response()),
        None => Err(AppError::NotFound(format!(
            "Place '{place_id}' of performance '{perform_id}' was not found"
        ))),
    }
}

pub async fn reserve(
    State(store): State<ReservationStore>,
    Path((perform_id, place_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let outcome = store.reserve(perform_id, place_id).await?;
    let message = if outcome.applied() {
        "Place reserved"
    } else {
        "Place not reserved: unavailable"
    };
    Ok(empty_success(message).into_response())
}

pub async fn cancel(
    State(store): State<ReservationStore>,
    Path((perform_id, place_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let outcome = store.cancel(perform_id, place_id).await?;
    let message = if outcome.applied() {
        "Reservation cancelled"
    } else {
        "Nothing to cancel"
    };
    Ok(empty_success(message).into_response())
}

/// Both halves of the swap report independently; either can no-op.
pub async fn swap(
    State(store): State<ReservationStore>,
    Path((old_place, new_place)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let (released, taken) = store.swap(old_place, new_place).await?;
    let message = format!(
        "Swap: old place {}, new place {}",
        if released.applied() { "released" } else { "unchanged" },
        if taken.applied() { "reserved" } else { "unchanged" },
    );
    Ok(empty_success(message).into_response())
}
