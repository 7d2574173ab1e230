use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer identity, anchored by a unique email. Created on first OTP
/// request for an email; the referral code is attached exactly once at the
/// first successful login and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub referral_code: Option<String>,
    pub created_at: DateTime<Utc>,
}
