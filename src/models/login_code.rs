use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Ephemeral one-time login credential. The email is the primary key, so
/// issuing a new code replaces any prior unconsumed one. Rows are deleted on
/// successful verification or superseding issuance, never updated in place.
#[derive(Debug, Clone, FromRow)]
pub struct LoginCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl LoginCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn code_expiring_at(expires_at: DateTime<Utc>) -> LoginCode {
        LoginCode {
            email: "a@x.com".to_string(),
            code: "123456".to_string(),
            expires_at,
            created_at: expires_at - Duration::minutes(10),
        }
    }

    #[test]
    fn valid_before_expiry() {
        let now = Utc::now();
        let code = code_expiring_at(now + Duration::minutes(5));
        assert!(!code.is_expired(now));
    }

    #[test]
    fn still_valid_at_the_exact_expiry_instant() {
        let now = Utc::now();
        let code = code_expiring_at(now);
        assert!(!code.is_expired(now));
    }

    #[test]
    fn expired_once_the_ttl_has_elapsed() {
        let now = Utc::now();
        let code = code_expiring_at(now - Duration::seconds(1));
        assert!(code.is_expired(now));
    }
}
