use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppResult, services::auth::AuthService, AppState};

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

/// Issues a login code and acknowledges. The code itself travels out-of-band
/// only.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(req): Json<RequestOtpRequest>,
) -> AppResult<Json<OkResponse>> {
    let auth_service = AuthService::new(state.db.clone(), (*state.config).clone());
    auth_service.request_code(&req.email).await?;

    Ok(Json(OkResponse { ok: true }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub referral_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub ok: bool,
    pub token: String,
    pub user: UserSummary,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<VerifyOtpResponse>> {
    let auth_service = AuthService::new(state.db.clone(), (*state.config).clone());
    let (user, token) = auth_service.login(&req.email, &req.code).await?;

    Ok(Json(VerifyOtpResponse {
        ok: true,
        token,
        user: UserSummary {
            id: user.id,
            email: user.email,
            referral_code: user.referral_code,
        },
    }))
}
