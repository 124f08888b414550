//! Channel-specific identity resolution
//!
//! Turns a signup request into a normalized partial account plus the
//! verification requirement for its channel. OAuth channels arrive already
//! attested by the provider; email and phone channels stay soft until an
//! OTP round-trip completes.

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{Identifier, SignupMethod, User};
use crate::domains::auth::password::hash_password;
use crate::domains::auth::types::SignupRequest;
use crate::kernel::{BaseTokenVerifier, ServerDeps};

/// A claimed identity, normalized across channels.
#[derive(Debug)]
pub struct ResolvedIdentity {
    pub account: User,
    /// OTP target; for OAuth channels this is the provider-attested email.
    pub identifier: Identifier,
    pub requires_otp: bool,
}

pub async fn resolve_signup(
    request: SignupRequest,
    deps: &ServerDeps,
) -> Result<ResolvedIdentity, AuthError> {
    match request {
        SignupRequest::Email {
            email,
            password,
            name,
            birthdate,
            zodiac_sign,
        } => {
            let identifier = Identifier::parse(&email)
                .filter(Identifier::is_email)
                .ok_or_else(|| AuthError::BadRequest("invalid email format".to_string()))?;
            if password.is_empty() {
                return Err(AuthError::BadRequest("password is required".to_string()));
            }
            let password_hash = hash_password(&password)?;
            let account = User::new_pending(
                &identifier,
                Some(password_hash),
                name,
                birthdate,
                zodiac_sign,
            );
            Ok(ResolvedIdentity {
                account,
                identifier,
                requires_otp: true,
            })
        }

        SignupRequest::Phone {
            phone,
            name,
            birthdate,
            zodiac_sign,
        } => {
            // Format check only; the identity stays soft until the OTP
            // round-trip proves control of the number
            let identifier = match Identifier::parse(&phone) {
                Some(identifier @ Identifier::Phone(_)) => identifier,
                _ => {
                    return Err(AuthError::BadRequest(
                        "invalid phone number".to_string(),
                    ))
                }
            };
            let account = User::new_pending(&identifier, None, name, birthdate, zodiac_sign);
            Ok(ResolvedIdentity {
                account,
                identifier,
                requires_otp: true,
            })
        }

        SignupRequest::Google { token } => {
            resolve_provider(deps.google.as_ref(), &token, SignupMethod::Google).await
        }

        SignupRequest::Facebook { token } => {
            resolve_provider(deps.facebook.as_ref(), &token, SignupMethod::Facebook).await
        }
    }
}

async fn resolve_provider(
    verifier: &dyn BaseTokenVerifier,
    token: &str,
    signup_method: SignupMethod,
) -> Result<ResolvedIdentity, AuthError> {
    let identity = verifier
        .verify(token)
        .await
        .map_err(|_| AuthError::InvalidProviderToken)?;

    let identifier = Identifier::Email(identity.email.clone());
    let account = User::from_provider(identity, signup_method);
    Ok(ResolvedIdentity {
        account,
        identifier,
        requires_otp: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockTokenVerifier, TestDeps};

    #[tokio::test]
    async fn phone_signup_requires_otp() {
        let test = TestDeps::new();
        let resolved = resolve_signup(
            SignupRequest::Phone {
                phone: "9999999999".to_string(),
                name: None,
                birthdate: None,
                zodiac_sign: None,
            },
            &test.deps(),
        )
        .await
        .unwrap();

        assert!(resolved.requires_otp);
        assert!(!resolved.account.is_verified);
        assert_eq!(resolved.identifier.as_str(), "9999999999");
    }

    #[tokio::test]
    async fn short_phone_number_is_rejected() {
        let test = TestDeps::new();
        let result = resolve_signup(
            SignupRequest::Phone {
                phone: "12345".to_string(),
                name: None,
                birthdate: None,
                zodiac_sign: None,
            },
            &test.deps(),
        )
        .await;

        assert!(matches!(result, Err(AuthError::BadRequest(_))));
    }

    #[tokio::test]
    async fn google_signup_is_provider_attested() {
        let test = TestDeps::with_google(
            MockTokenVerifier::new().with_identity("good-token", "g@b.com", "Gee"),
        );
        let resolved = resolve_signup(
            SignupRequest::Google {
                token: "good-token".to_string(),
            },
            &test.deps(),
        )
        .await
        .unwrap();

        assert!(!resolved.requires_otp);
        assert!(resolved.account.is_verified);
        assert_eq!(resolved.account.email.as_deref(), Some("g@b.com"));
    }

    #[tokio::test]
    async fn bad_provider_token_is_rejected() {
        let test = TestDeps::new();
        let result = resolve_signup(
            SignupRequest::Google {
                token: "bad-token".to_string(),
            },
            &test.deps(),
        )
        .await;

        assert!(matches!(result, Err(AuthError::InvalidProviderToken)));
    }
}
