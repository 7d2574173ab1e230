use axum::{extract::Multipart, extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    services::{
        auth::Claims,
        bookings::{BookingService, NewBooking},
    },
    AppState,
};

use super::super::middleware::get_user_id;

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub ok: bool,
    pub id: String,
}

/// Multipart booking form: text fields plus an optional `paymentProof` file
/// that is stored in the blob store before the row is written.
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> AppResult<Json<CreateBookingResponse>> {
    let user_id = get_user_id(&claims)?;

    let mut product_id = String::new();
    let mut category = String::new();
    let mut mrp: i64 = 0;
    let mut booking_amount: i64 = 0;
    let mut balance: i64 = 0;
    let mut transaction_id = String::new();
    let mut referrer_code: Option<String> = None;
    let mut payment_proof_url: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "productId" => product_id = text_field(field, &name).await?,
            "category" => category = text_field(field, &name).await?,
            "mrp" => mrp = amount_field(field, &name).await?,
            "bookingAmount" => booking_amount = amount_field(field, &name).await?,
            "balance" => balance = amount_field(field, &name).await?,
            "transactionId" => transaction_id = text_field(field, &name).await?,
            "referrerCode" => {
                let code = text_field(field, &name).await?;
                if !code.is_empty() {
                    referrer_code = Some(code);
                }
            }
            "paymentProof" => {
                let name_hint = field
                    .file_name()
                    .unwrap_or("payment-proof.bin")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file: {}", e))
                })?;
                if !data.is_empty() {
                    payment_proof_url =
                        Some(state.blobs.store(data, &name_hint, &content_type).await?);
                }
            }
            _ => {}
        }
    }

    let booking_service = BookingService::new(state.db.clone());
    let id = booking_service
        .create(
            user_id,
            NewBooking {
                product_id,
                category,
                mrp,
                booking_amount,
                balance,
                transaction_id,
                payment_proof_url,
                referral_code_used: referrer_code,
            },
        )
        .await?;

    Ok(Json(CreateBookingResponse { ok: true, id }))
}

async fn text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}

async fn amount_field(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<i64> {
    let text = text_field(field, name).await?;
    text.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a whole number", name)))
}
