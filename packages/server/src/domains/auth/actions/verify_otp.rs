//! Verify OTP action
//!
//! Completes a pending signup: consume the challenge, flip the account to
//! verified, mint the session. Failure mutates nothing.

use tracing::{debug, info};
use uuid::Uuid;

use super::identifier_from_contact;
use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::Identifier;
use crate::domains::auth::types::VerifyOtpRequest;
use crate::kernel::ServerDeps;

pub async fn verify_otp(
    request: VerifyOtpRequest,
    deps: &ServerDeps,
) -> Result<(String, Uuid), AuthError> {
    if request.otp.is_empty() {
        return Err(AuthError::BadRequest("OTP is required".to_string()));
    }
    let identifier = identifier_from_contact(request.email.as_deref(), request.phone.as_deref())?;

    // Resolve the account first so an unknown identifier cannot burn a
    // challenge; the response stays the same either way (fails closed)
    let user = match &identifier {
        Identifier::Email(email) => deps.users.find_by_email(email).await?,
        Identifier::Phone(phone) => deps.users.find_by_phone(phone).await?,
    }
    .ok_or(AuthError::InvalidOrExpiredOtp)?;

    let verified = deps.otp_engine().verify(&identifier, &request.otp).await?;
    if !verified {
        return Err(AuthError::InvalidOrExpiredOtp);
    }

    let matched = deps.users.mark_verified(&identifier).await?;
    if !matched {
        // Already verified before this attempt; nothing to flip
        debug!(identifier = identifier.as_str(), "account was already verified");
    }

    let token = deps.jwt_service.issue(user.id)?;
    info!(user_id = %user.id, "account verified");
    Ok((token, user.id))
}
