//! Login action
//!
//! Password channel checks the stored hash; OAuth channels re-verify the
//! provider token and log in the matching account. Exactly one session is
//! minted per successful attempt.

use tracing::info;
use uuid::Uuid;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::password::verify_password;
use crate::domains::auth::types::LoginRequest;
use crate::kernel::{BaseTokenVerifier, ServerDeps};

pub async fn login(request: LoginRequest, deps: &ServerDeps) -> Result<(String, Uuid), AuthError> {
    match request {
        LoginRequest::Password { email, password } => {
            let user = deps
                .users
                .find_by_email(&email)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
            let hash = user
                .password_hash
                .as_deref()
                .ok_or(AuthError::InvalidCredentials)?;
            if !verify_password(&password, hash) {
                return Err(AuthError::InvalidCredentials);
            }

            let token = deps.jwt_service.issue(user.id)?;
            info!(user_id = %user.id, "login successful");
            Ok((token, user.id))
        }

        LoginRequest::Google { token } => oauth_login(deps.google.as_ref(), &token, deps).await,

        LoginRequest::Facebook { token } => {
            oauth_login(deps.facebook.as_ref(), &token, deps).await
        }
    }
}

async fn oauth_login(
    verifier: &dyn BaseTokenVerifier,
    provider_token: &str,
    deps: &ServerDeps,
) -> Result<(String, Uuid), AuthError> {
    let identity = verifier
        .verify(provider_token)
        .await
        .map_err(|_| AuthError::InvalidProviderToken)?;

    let user = deps
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let token = deps.jwt_service.issue(user.id)?;
    info!(user_id = %user.id, "login successful");
    Ok((token, user.id))
}
