use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::ReferralConfig,
    error::{AppError, AppResult},
    models::{BookingStatus, User},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralProgress {
    pub successful: i64,
    pub goal: i64,
    pub min_booking: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralEligibility {
    pub eligible: bool,
    #[serde(flatten)]
    pub progress: ReferralProgress,
}

/// Derives a referrer's progress from the booking ledger. Policy numbers
/// come from config, never from data.
pub struct ReferralService {
    db: PgPool,
    policy: ReferralConfig,
}

impl ReferralService {
    pub fn new(db: PgPool, policy: ReferralConfig) -> Self {
        Self { db, policy }
    }

    /// Counts bookings made with this user's referral code that reached the
    /// confirmed state. Delivered bookings keep counting: delivery implies a
    /// prior confirmation.
    pub async fn progress_for_user(&self, user_id: Uuid) -> AppResult<ReferralProgress> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        let user = user.ok_or(AppError::UserNotFound)?;

        let Some(code) = user.referral_code else {
            return Ok(self.zero_progress());
        };

        let successful: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE referral_code_used = $1 AND status IN ($2, $3)",
        )
        .bind(&code)
        .bind(BookingStatus::Confirmed)
        .bind(BookingStatus::Delivered)
        .fetch_one(&self.db)
        .await?;

        Ok(ReferralProgress {
            successful,
            goal: self.policy.goal,
            min_booking: self.policy.min_booking,
        })
    }

    /// The advertised per-booking minimum is not enforced here: eligibility
    /// is purely the confirmed-referral count against the goal.
    pub async fn eligibility(&self, user_id: Uuid) -> AppResult<ReferralEligibility> {
        let progress = self.progress_for_user(user_id).await?;
        Ok(ReferralEligibility {
            eligible: progress.successful >= progress.goal,
            progress,
        })
    }

    fn zero_progress(&self) -> ReferralProgress {
        ReferralProgress {
            successful: 0,
            goal: self.policy.goal,
            min_booking: self.policy.min_booking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_serializes_with_camel_case_keys() {
        let progress = ReferralProgress {
            successful: 2,
            goal: 3,
            min_booking: 10_000,
        };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["successful"], 2);
        assert_eq!(json["goal"], 3);
        assert_eq!(json["minBooking"], 10_000);
    }

    #[test]
    fn eligibility_flattens_progress() {
        let eligibility = ReferralEligibility {
            eligible: true,
            progress: ReferralProgress {
                successful: 3,
                goal: 3,
                min_booking: 10_000,
            },
        };
        let json = serde_json::to_value(&eligibility).unwrap();
        assert_eq!(json["eligible"], true);
        assert_eq!(json["successful"], 3);
    }
}
