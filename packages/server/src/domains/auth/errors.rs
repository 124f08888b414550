use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the identity subsystem
///
/// Every kind maps to a stable HTTP status. Nothing is retried internally;
/// `Upstream` is the only class where a client retry is meaningful.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid provider token")]
    InvalidProviderToken,

    #[error("invalid or expired OTP")]
    InvalidOrExpiredOtp,

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("password hashing failed")]
    Hashing,

    #[error("upstream failure: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidProviderToken | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Hashing => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_stable() {
        assert_eq!(
            AuthError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Conflict("email").status(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidOrExpiredOtp.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Upstream(anyhow::anyhow!("db down")).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
