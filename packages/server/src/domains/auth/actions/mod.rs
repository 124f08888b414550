mod login;
mod send_otp;
mod signup;
mod verify_otp;

pub use login::login;
pub use send_otp::resend_otp;
pub use signup::{signup, SignupOutcome};
pub use verify_otp::verify_otp;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::Identifier;

/// Identifier from the optional email / phone pair the verification
/// endpoints accept. Email wins when both are present.
fn identifier_from_contact(
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<Identifier, AuthError> {
    let raw = email
        .or(phone)
        .ok_or_else(|| AuthError::BadRequest("either email or phone is required".to_string()))?;
    Identifier::parse(raw)
        .ok_or_else(|| AuthError::BadRequest("invalid email or phone format".to_string()))
}
