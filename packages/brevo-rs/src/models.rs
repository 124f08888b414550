use serde::Deserialize;

/// Response from `POST /v3/smtp/email`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailResponse {
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// Response from `POST /v3/transactionalSMS/sms`.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsResponse {
    pub reference: Option<String>,
    #[serde(rename = "messageId")]
    pub message_id: Option<i64>,
}
