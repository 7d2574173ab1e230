use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{AdminBooking, BookingStatus},
    services::{auth::AuthService, bookings::BookingService},
    AppState,
};

use super::auth::OkResponse;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub ok: bool,
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let auth_service = AuthService::new(state.db.clone(), (*state.config).clone());
    let token = auth_service.admin_login(&req.password)?;

    Ok(Json(AdminLoginResponse { ok: true, token }))
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub status: Option<BookingStatus>,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> AppResult<Json<Vec<AdminBooking>>> {
    let booking_service = BookingService::new(state.db.clone());
    let bookings = booking_service.list_for_admin(query.status).await?;

    Ok(Json(bookings))
}

pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let booking_service = BookingService::new(state.db.clone());
    booking_service.confirm(&id).await?;

    Ok(Json(OkResponse { ok: true }))
}

pub async fn deliver_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let booking_service = BookingService::new(state.db.clone());
    booking_service.mark_delivered(&id).await?;

    Ok(Json(OkResponse { ok: true }))
}
