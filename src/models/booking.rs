use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product-deposit record tied to one owning user. Monetary amounts are in
/// whole rupees. Only `status` (and `delivery_free` alongside it) mutate
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: Uuid,
    pub product_id: String,
    pub category: String,
    pub mrp: i64,
    pub booking_amount: i64,
    pub balance: i64,
    pub transaction_id: String,
    pub payment_proof_url: Option<String>,
    pub referral_code_used: Option<String>,
    pub status: BookingStatus,
    pub delivery_free: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Delivered,
}

impl BookingStatus {
    /// The lifecycle is linear: pending -> confirmed -> delivered. Skipping
    /// straight from pending to delivered is rejected.
    pub fn can_transition(self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Confirmed, BookingStatus::Delivered)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking joined with its owner's contact fields, as shown in the admin
/// console.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminBooking {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub referral_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_transitions_are_allowed() {
        assert!(BookingStatus::Pending.can_transition(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition(BookingStatus::Delivered));
    }

    #[test]
    fn skipping_and_reversing_are_rejected() {
        assert!(!BookingStatus::Pending.can_transition(BookingStatus::Delivered));
        assert!(!BookingStatus::Confirmed.can_transition(BookingStatus::Pending));
        assert!(!BookingStatus::Delivered.can_transition(BookingStatus::Confirmed));
        assert!(!BookingStatus::Delivered.can_transition(BookingStatus::Pending));
    }

    #[test]
    fn no_self_transitions() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Delivered,
        ] {
            assert!(!status.can_transition(status));
        }
    }
}
