use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which backing store holds outstanding OTP challenges.
///
/// `Memory` does not survive restarts and splits state across instances,
/// so it is only ever selected explicitly via `OTP_STORE=memory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStoreKind {
    Postgres,
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub google_client_id: String,
    pub brevo_api_key: String,
    pub email_sender: String,
    pub sms_sender: String,
    pub otp_store: OtpStoreKind,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let otp_store = match env::var("OTP_STORE").as_deref() {
            Ok("memory") => OtpStoreKind::Memory,
            _ => OtpStoreKind::Postgres,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .context("GOOGLE_CLIENT_ID must be set")?,
            brevo_api_key: env::var("BREVO_API_KEY").context("BREVO_API_KEY must be set")?,
            email_sender: env::var("EMAIL_SENDER").context("EMAIL_SENDER must be set")?,
            sms_sender: env::var("SMS_SENDER").unwrap_or_else(|_| "AstroMatch".to_string()),
            otp_store,
        })
    }
}
