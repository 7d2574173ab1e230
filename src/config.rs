use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub admin: AdminConfig,
    pub referral: ReferralConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub proofs_bucket: String,
    pub public_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub user_token_ttl: Duration,
    pub admin_token_ttl: Duration,
    pub issuer: String,
}

#[derive(Debug, Clone)]
pub struct OtpConfig {
    pub ttl: Duration,
}

/// Shared-secret admin credential plus the optional email whose owner is
/// also granted admin access.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Referral promotion policy. Fixed constants, never derived from data.
#[derive(Debug, Clone)]
pub struct ReferralConfig {
    pub goal: i64,
    pub min_booking: i64,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            },
            database: DatabaseConfig {
                host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("DB_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5432),
                user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
                password: env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
                database: env::var("DB_NAME").unwrap_or_else(|_| "dls_store".to_string()),
                ssl_mode: env::var("DB_SSL_MODE").unwrap_or_else(|_| "disable".to_string()),
                max_connections: env::var("DB_MAX_CONNS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(25),
            },
            storage: StorageConfig {
                endpoint: env::var("MINIO_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:9000".to_string()),
                access_key: env::var("MINIO_ACCESS_KEY")
                    .unwrap_or_else(|_| "minioadmin".to_string()),
                secret_key: env::var("MINIO_SECRET_KEY")
                    .unwrap_or_else(|_| "minioadmin".to_string()),
                region: env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                proofs_bucket: "payment-proofs".to_string(),
                public_url: env::var("MINIO_PUBLIC_URL").ok(),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev-secret-change-me".to_string()),
                user_token_ttl: Duration::from_secs(
                    env::var("JWT_USER_TOKEN_TTL")
                        .ok()
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(30 * 24 * 60 * 60), // 30 days
                ),
                admin_token_ttl: Duration::from_secs(
                    env::var("JWT_ADMIN_TOKEN_TTL")
                        .ok()
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(12 * 60 * 60), // 12 hours
                ),
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "dls-booking".to_string()),
            },
            otp: OtpConfig {
                ttl: Duration::from_secs(
                    env::var("OTP_TTL")
                        .ok()
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(10 * 60), // 10 minutes
                ),
            },
            admin: AdminConfig {
                password: env::var("ADMIN_PASSWORD").ok(),
                email: env::var("ADMIN_EMAIL").ok(),
            },
            referral: ReferralConfig {
                goal: env::var("REFERRAL_GOAL")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3),
                min_booking: env::var("REFERRAL_MIN_BOOKING")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(10_000),
            },
        }
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.database.user,
            self.database.password,
            self.database.host,
            self.database.port,
            self.database.database,
            self.database.ssl_mode
        )
    }
}
