use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domains::auth::{AuthError, JwtService};

/// Cookie carrying the session credential.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated subject extracted from the session credential.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Session guard for protected routes.
///
/// Extracts the credential from the `token` cookie or the Authorization
/// header and validates it. Any failure short-circuits with 401 before the
/// handler runs; on success an AuthUser lands in the request extensions.
pub async fn require_session(
    jwt_service: Arc<JwtService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = extract_auth_user(&request, &jwt_service) else {
        return AuthError::Unauthorized.into_response();
    };

    debug!(user_id = %user.user_id, "authenticated request");
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extract and validate the session credential from a request
fn extract_auth_user(request: &Request<Body>, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = token_from_cookie(request).or_else(|| token_from_authorization(request))?;
    let user_id = jwt_service.validate(&token).ok()?;
    Some(AuthUser { user_id })
}

fn token_from_cookie(request: &Request<Body>) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn token_from_authorization(request: &Request<Body>) -> Option<String> {
    let auth = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    // Handle both "Bearer <token>" and raw token
    Some(auth.strip_prefix("Bearer ").unwrap_or(auth).to_string())
}
