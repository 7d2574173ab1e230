use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AdminBooking, Booking, BookingStatus},
};

/// Caller-supplied fields for a new booking. Amounts arrive verbatim from
/// the form; `validate` is the only gate.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub product_id: String,
    pub category: String,
    pub mrp: i64,
    pub booking_amount: i64,
    pub balance: i64,
    pub transaction_id: String,
    pub payment_proof_url: Option<String>,
    pub referral_code_used: Option<String>,
}

impl NewBooking {
    pub fn validate(&self) -> AppResult<()> {
        if self.product_id.is_empty() {
            return Err(AppError::Validation("productId is required".to_string()));
        }
        if self.category.is_empty() {
            return Err(AppError::Validation("category is required".to_string()));
        }
        if self.transaction_id.is_empty() {
            return Err(AppError::Validation(
                "transactionId is required".to_string(),
            ));
        }
        if self.mrp <= 0 {
            return Err(AppError::Validation("mrp must be positive".to_string()));
        }
        if self.booking_amount <= 0 || self.booking_amount > self.mrp {
            return Err(AppError::Validation(
                "bookingAmount must be positive and at most mrp".to_string(),
            ));
        }
        if self.balance != self.mrp - self.booking_amount {
            return Err(AppError::Validation(
                "balance must equal mrp minus bookingAmount".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct BookingService {
    db: PgPool,
}

impl BookingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a booking in the pending state with a fresh human-readable
    /// id. The referral code used and all monetary fields are immutable
    /// after this point.
    pub async fn create(&self, user_id: Uuid, fields: NewBooking) -> AppResult<String> {
        fields.validate()?;

        let id = generate_booking_id();
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, product_id, category, mrp, booking_amount, balance,
                 transaction_id, payment_proof_url, referral_code_used, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&fields.product_id)
        .bind(&fields.category)
        .bind(fields.mrp)
        .bind(fields.booking_amount)
        .bind(fields.balance)
        .bind(&fields.transaction_id)
        .bind(&fields.payment_proof_url)
        .bind(&fields.referral_code_used)
        .bind(BookingStatus::Pending)
        .execute(&self.db)
        .await?;

        Ok(id)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(booking)
    }

    pub async fn confirm(&self, id: &str) -> AppResult<()> {
        self.transition(id, BookingStatus::Confirmed).await
    }

    /// Delivery also grants the free-delivery flag, in the same statement.
    pub async fn mark_delivered(&self, id: &str) -> AppResult<()> {
        self.transition(id, BookingStatus::Delivered).await
    }

    /// Validated status transition. Illegal moves are rejected with a typed
    /// error instead of the unconditional overwrite of earlier revisions.
    async fn transition(&self, id: &str, to: BookingStatus) -> AppResult<()> {
        let booking = self.get_by_id(id).await?.ok_or(AppError::BookingNotFound)?;

        if !booking.status.can_transition(to) {
            return Err(AppError::InvalidTransition {
                from: booking.status,
                to,
            });
        }

        // Guard on the observed status so a concurrent transition loses
        // cleanly instead of overwriting.
        let updated = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $1,
                delivery_free = delivery_free OR $2
            WHERE id = $3 AND status = $4
            "#,
        )
        .bind(to)
        .bind(to == BookingStatus::Delivered)
        .bind(id)
        .bind(booking.status)
        .execute(&self.db)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::InvalidTransition {
                from: booking.status,
                to,
            });
        }

        Ok(())
    }

    /// Bookings joined with owner contact fields, newest first, optionally
    /// restricted to one status.
    pub async fn list_for_admin(
        &self,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<AdminBooking>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as(
                    r#"
                    SELECT b.*, u.email, u.name, u.phone, u.referral_code
                    FROM bookings b
                    JOIN users u ON b.user_id = u.id
                    WHERE b.status = $1
                    ORDER BY b.created_at DESC
                    "#,
                )
                .bind(status)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT b.*, u.email, u.name, u.phone, u.referral_code
                    FROM bookings b
                    JOIN users u ON b.user_id = u.id
                    ORDER BY b.created_at DESC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows)
    }
}

/// `DLS-<last six digits of epoch millis>-<4 random uppercase alphanumerics>`.
fn generate_booking_id() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    let millis = Utc::now().timestamp_millis();
    format!("DLS-{:06}-{}", millis % 1_000_000, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> NewBooking {
        NewBooking {
            product_id: "ac-1234".to_string(),
            category: "AC".to_string(),
            mrp: 35_000,
            booking_amount: 10_000,
            balance: 25_000,
            transaction_id: "TXN-001".to_string(),
            payment_proof_url: None,
            referral_code_used: None,
        }
    }

    #[test]
    fn booking_ids_have_the_expected_shape() {
        let id = generate_booking_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "DLS");
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn valid_fields_pass_validation() {
        assert!(valid_fields().validate().is_ok());
    }

    #[test]
    fn balance_must_match_mrp_minus_deposit() {
        let mut fields = valid_fields();
        fields.balance = 24_000;
        assert!(matches!(
            fields.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut fields = valid_fields();
        fields.product_id.clear();
        assert!(fields.validate().is_err());

        let mut fields = valid_fields();
        fields.category.clear();
        assert!(fields.validate().is_err());

        let mut fields = valid_fields();
        fields.transaction_id.clear();
        assert!(fields.validate().is_err());
    }

    #[test]
    fn deposit_cannot_exceed_list_price() {
        let mut fields = valid_fields();
        fields.booking_amount = 40_000;
        fields.balance = -5_000;
        assert!(fields.validate().is_err());
    }
}
