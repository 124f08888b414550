//! Wire types for the auth endpoints.
//!
//! Requests carry their channel as a tag and are decoded exactly once into
//! the matching variant; all downstream dispatch is on the enum.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(tag = "signupMethod", rename_all = "lowercase")]
pub enum SignupRequest {
    Email {
        email: String,
        password: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        birthdate: Option<String>,
        #[serde(default, rename = "zodiacSign")]
        zodiac_sign: Option<String>,
    },
    Google {
        token: String,
    },
    Facebook {
        token: String,
    },
    Phone {
        phone: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        birthdate: Option<String>,
        #[serde(default, rename = "zodiacSign")]
        zodiac_sign: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "loginChannel", rename_all = "lowercase")]
pub enum LoginRequest {
    Password { email: String, password: String },
    Google { token: String },
    Facebook { token: String },
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            token: None,
        }
    }

    pub fn with_token(message: &str, token: &str) -> Self {
        Self {
            message: message.to_string(),
            token: Some(token.to_string()),
        }
    }
}
