//! Auth endpoints (public)
//!
//! Thin handlers: decode the body once, delegate to the domain action, map
//! the outcome to a response. Session issuance sets the HttpOnly `token`
//! cookie alongside the JSON body.

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::domains::auth::actions::{login, resend_otp, signup, verify_otp, SignupOutcome};
use crate::domains::auth::jwt::SESSION_LIFETIME_HOURS;
use crate::domains::auth::types::{
    AuthResponse, LoginRequest, ResendOtpRequest, SignupRequest, VerifyOtpRequest,
};
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;
use crate::server::middleware::SESSION_COOKIE;

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::BadRequest(rejection.body_text()))
}

/// Session response: cookie + JSON body carrying the same credential.
fn session_response(status: StatusCode, message: &str, token: &str) -> Response {
    let cookie = format!(
        "{SESSION_COOKIE}={token}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_LIFETIME_HOURS * 3600
    );
    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse::with_token(message, token)),
    )
        .into_response()
}

pub async fn signup_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let request = decode(payload)?;
    match signup(request, &deps).await? {
        SignupOutcome::PendingOtp => Ok((
            StatusCode::CREATED,
            Json(AuthResponse::message(
                "OTP sent. Verify to complete signup.",
            )),
        )
            .into_response()),
        SignupOutcome::SessionIssued {
            token,
            implicit_login,
            ..
        } => {
            let message = if implicit_login {
                "User logged in successfully"
            } else {
                "User registered successfully"
            };
            Ok(session_response(StatusCode::OK, message, &token))
        }
    }
}

pub async fn login_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let request = decode(payload)?;
    let (token, _) = login(request, &deps).await?;
    Ok(session_response(
        StatusCode::OK,
        "Login successful",
        &token,
    ))
}

pub async fn verify_otp_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let request = decode(payload)?;
    let (token, _) = verify_otp(request, &deps).await?;
    Ok(session_response(
        StatusCode::OK,
        "User verified successfully.",
        &token,
    ))
}

pub async fn resend_otp_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    payload: Result<Json<ResendOtpRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let request = decode(payload)?;
    resend_otp(request, &deps).await?;
    Ok(Json(AuthResponse::message("OTP sent.")).into_response())
}
