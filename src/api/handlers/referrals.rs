use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    services::{
        auth::Claims,
        referrals::{ReferralEligibility, ReferralProgress, ReferralService},
    },
    AppState,
};

use super::super::middleware::get_user_id;

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ReferralProgress>> {
    let user_id = get_user_id(&claims)?;

    let referral_service = ReferralService::new(state.db.clone(), state.config.referral.clone());
    let progress = referral_service.progress_for_user(user_id).await?;

    Ok(Json(progress))
}

pub async fn get_eligibility(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ReferralEligibility>> {
    let user_id = get_user_id(&claims)?;

    let referral_service = ReferralService::new(state.db.clone(), state.config.referral.clone());
    let eligibility = referral_service.eligibility(user_id).await?;

    Ok(Json(eligibility))
}
