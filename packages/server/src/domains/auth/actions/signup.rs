//! Signup orchestration
//!
//! One state machine per attempt: resolve the claimed identity, then either
//! suspend on a delivered OTP challenge (email/phone) or mint a session
//! immediately (OAuth). Session issuance is the only terminal success.

use tracing::info;
use uuid::Uuid;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{Identifier, User};
use crate::domains::auth::resolver::resolve_signup;
use crate::domains::auth::types::SignupRequest;
use crate::kernel::{ServerDeps, StoreError};

/// Result of a signup attempt
#[derive(Debug)]
pub enum SignupOutcome {
    /// Channel needs an OTP round-trip; the account exists unverified.
    PendingOtp,
    /// Session minted. `implicit_login` marks an OAuth retry that matched
    /// an existing account instead of creating a duplicate.
    SessionIssued {
        token: String,
        user_id: Uuid,
        implicit_login: bool,
    },
}

pub async fn signup(
    request: SignupRequest,
    deps: &ServerDeps,
) -> Result<SignupOutcome, AuthError> {
    let resolved = resolve_signup(request, deps).await?;

    if resolved.requires_otp {
        pending_signup(resolved.identifier, resolved.account, deps).await
    } else {
        attested_signup(resolved.identifier, resolved.account, deps).await
    }
}

/// Email / phone channel: unique identifier, unverified account, challenge.
async fn pending_signup(
    identifier: Identifier,
    account: User,
    deps: &ServerDeps,
) -> Result<SignupOutcome, AuthError> {
    let existing = match &identifier {
        Identifier::Email(email) => deps.users.find_by_email(email).await?,
        Identifier::Phone(phone) => deps.users.find_by_phone(phone).await?,
    };
    if existing.is_some() {
        return Err(AuthError::Conflict(identifier.kind()));
    }

    // The unique index is the real backstop for concurrent signups; a
    // duplicate-key rejection is the same outcome as the pre-check hit
    let account = deps.users.insert(account).await.map_err(|e| match e {
        StoreError::Duplicate => AuthError::Conflict(identifier.kind()),
        StoreError::Other(e) => AuthError::Upstream(e),
    })?;

    // A delivery failure from here on leaves the account unverified, which
    // is safe: resend-otp completes the flow later
    let engine = deps.otp_engine();
    let code = engine.issue(&identifier).await?;
    engine.deliver(&identifier, &code).await?;

    info!(user_id = %account.id, "signup pending verification");
    Ok(SignupOutcome::PendingOtp)
}

/// OAuth channel: provider already attested the identity. An existing
/// account for the email is an implicit login, never a duplicate.
async fn attested_signup(
    identifier: Identifier,
    account: User,
    deps: &ServerDeps,
) -> Result<SignupOutcome, AuthError> {
    let email = identifier.as_str();

    if let Some(existing) = deps.users.find_by_email(email).await? {
        let token = deps.jwt_service.issue(existing.id)?;
        info!(user_id = %existing.id, "existing account, logging in");
        return Ok(SignupOutcome::SessionIssued {
            token,
            user_id: existing.id,
            implicit_login: true,
        });
    }

    let account = match deps.users.insert(account).await {
        Ok(account) => account,
        // Lost a race with a concurrent signup for the same email; resolve
        // it the same way as the pre-check: log the existing account in
        Err(StoreError::Duplicate) => deps
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::Conflict("email"))?,
        Err(StoreError::Other(e)) => return Err(AuthError::Upstream(e)),
    };

    let token = deps.jwt_service.issue(account.id)?;
    info!(user_id = %account.id, "account registered");
    Ok(SignupOutcome::SessionIssued {
        token,
        user_id: account.id,
        implicit_login: false,
    })
}
