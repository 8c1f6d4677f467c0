//! Booking route handlers.
//!
//! Each handler parses its input, makes exactly one store call and maps the
//! outcome to a response.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::booking::{Booking, BookingError, BookingFilter};
use crate::http::request::{BookingPayload, ListQuery};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub bookings: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        bookings: state.store.len(),
    })
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Booking>> {
    let filter = BookingFilter::from(ListQuery::from_pairs(pairs));
    Json(state.store.list(&filter))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.store.get(parse_id(&id)?)?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let new = BookingPayload::from_body(&body)?.into_new_booking()?;
    let booking = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Booking>, ApiError> {
    let id = parse_id(&id)?;
    // A missing id is reported before anything about the body.
    state.store.get(id)?;
    let patch = BookingPayload::from_body(&body)?.into_patch()?;
    let booking = state.store.update(id, patch)?;
    Ok(Json(booking))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn box_schedule(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.store.schedule(&box_id)?))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Ids that are not UUIDs cannot exist in the store.
fn parse_id(raw: &str) -> Result<Uuid, BookingError> {
    Uuid::parse_str(raw).map_err(|_| BookingError::NotFound(raw.to_string()))
}
