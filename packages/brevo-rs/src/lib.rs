// Brevo (ex Sendinblue) transactional messaging client.
//
// Covers the two endpoints the platform uses: transactional email and
// transactional SMS. https://developers.brevo.com/reference

pub mod models;

use reqwest::{header, Client, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::models::{EmailResponse, SmsResponse};

const API_BASE: &str = "https://api.brevo.com/v3";

#[derive(Debug, Clone)]
pub struct BrevoOptions {
    pub api_key: String,
    /// From address for transactional email.
    pub email_sender: String,
    /// Alphanumeric sender id for SMS, max 11 characters.
    pub sms_sender: String,
}

#[derive(Debug, Error)]
pub enum BrevoError {
    #[error("brevo request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("brevo returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct BrevoService {
    options: BrevoOptions,
    client: Client,
}

impl BrevoService {
    pub fn new(options: BrevoOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send a plain-text transactional email.
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<EmailResponse, BrevoError> {
        let payload = json!({
            "sender": { "email": self.options.email_sender },
            "to": [{ "email": to }],
            "subject": subject,
            "textContent": body,
        });
        self.post("smtp/email", &payload).await
    }

    /// Send a transactional SMS.
    pub async fn send_sms(&self, to: &str, content: &str) -> Result<SmsResponse, BrevoError> {
        let payload = json!({
            "sender": self.options.sms_sender,
            "recipient": to,
            "content": content,
        });
        self.post("transactionalSMS/sms", &payload).await
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T, BrevoError> {
        let response = self
            .client
            .post(format!("{API_BASE}/{path}"))
            .header("api-key", &self.options.api_key)
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrevoError::Api { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}
