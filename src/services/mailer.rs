use crate::error::AppResult;

/// Out-of-band delivery of login codes. In development the code is written
/// to the log instead of sent; outside development an absent transport is a
/// server error, never a silent success.
#[derive(Clone)]
pub struct Mailer {
    environment: String,
}

impl Mailer {
    pub fn new(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
        }
    }

    pub async fn send_login_code(&self, email: &str, code: &str) -> AppResult<()> {
        if self.environment == "development" {
            tracing::info!("Email OTP to {}: {}", email, code);
            return Ok(());
        }

        // TODO: wire an SMTP transport for production deployments
        tracing::error!("No mail transport configured; cannot deliver login code");
        Err(anyhow::anyhow!("mail transport not configured").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn development_logs_instead_of_sending() {
        let mailer = Mailer::new("development");
        assert!(mailer.send_login_code("a@x.com", "123456").await.is_ok());
    }

    #[tokio::test]
    async fn production_without_a_transport_is_an_error() {
        let mailer = Mailer::new("production");
        assert!(mailer.send_login_code("a@x.com", "123456").await.is_err());
    }
}
