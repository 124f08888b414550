//! Resend OTP action
//!
//! Completes signups whose original delivery failed: re-issue a fresh
//! challenge (replacing any outstanding one) and deliver it again. Only
//! unverified accounts qualify.

use tracing::info;

use super::identifier_from_contact;
use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::Identifier;
use crate::domains::auth::types::ResendOtpRequest;
use crate::kernel::ServerDeps;

pub async fn resend_otp(request: ResendOtpRequest, deps: &ServerDeps) -> Result<(), AuthError> {
    let identifier = identifier_from_contact(request.email.as_deref(), request.phone.as_deref())?;

    let user = match &identifier {
        Identifier::Email(email) => deps.users.find_by_email(email).await?,
        Identifier::Phone(phone) => deps.users.find_by_phone(phone).await?,
    }
    .ok_or(AuthError::NotFound("account"))?;

    if user.is_verified {
        return Err(AuthError::BadRequest(
            "account is already verified".to_string(),
        ));
    }

    let engine = deps.otp_engine();
    let code = engine.issue(&identifier).await?;
    engine.deliver(&identifier, &code).await?;

    info!(user_id = %user.id, "OTP reissued");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::{signup, verify_otp};
    use crate::domains::auth::types::{SignupRequest, VerifyOtpRequest};
    use crate::kernel::test_dependencies::TestDeps;

    fn phone_signup(phone: &str) -> SignupRequest {
        SignupRequest::Phone {
            phone: phone.to_string(),
            name: None,
            birthdate: None,
            zodiac_sign: None,
        }
    }

    fn resend(phone: &str) -> ResendOtpRequest {
        ResendOtpRequest {
            email: None,
            phone: Some(phone.to_string()),
        }
    }

    #[tokio::test]
    async fn resend_replaces_the_outstanding_challenge() {
        let test = TestDeps::new();
        let deps = test.deps();
        signup(phone_signup("9999999999"), &deps).await.unwrap();
        let first_code = test.otp.code_for("9999999999").unwrap();

        resend_otp(resend("9999999999"), &deps).await.unwrap();
        let second_code = test.otp.code_for("9999999999").unwrap();

        // Two deliveries, and only the latest outstanding code verifies
        assert_eq!(test.sms.sent().len(), 2);
        if first_code != second_code {
            let stale = verify_otp(
                VerifyOtpRequest {
                    email: None,
                    phone: Some("9999999999".to_string()),
                    otp: first_code,
                },
                &deps,
            )
            .await;
            assert!(stale.is_err());
        }
        let fresh = verify_otp(
            VerifyOtpRequest {
                email: None,
                phone: Some("9999999999".to_string()),
                otp: second_code,
            },
            &deps,
        )
        .await;
        assert!(fresh.is_ok());
    }

    #[tokio::test]
    async fn resend_completes_a_signup_whose_delivery_failed() {
        let test = TestDeps::new();
        let deps = test.deps();

        test.sms.set_failing(true);
        assert!(signup(phone_signup("9999999999"), &deps).await.is_err());

        // Transport recovers; the degraded account can still finish
        test.sms.set_failing(false);
        resend_otp(resend("9999999999"), &deps).await.unwrap();

        let code = test.otp.code_for("9999999999").unwrap();
        verify_otp(
            VerifyOtpRequest {
                email: None,
                phone: Some("9999999999".to_string()),
                otp: code,
            },
            &deps,
        )
        .await
        .unwrap();

        assert!(test.users.all()[0].is_verified);
    }

    #[tokio::test]
    async fn resend_for_an_unknown_identifier_is_not_found() {
        let test = TestDeps::new();
        let result = resend_otp(resend("8888888888"), &test.deps()).await;
        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn resend_for_a_verified_account_is_rejected() {
        let test = TestDeps::new();
        let deps = test.deps();
        signup(phone_signup("9999999999"), &deps).await.unwrap();
        let code = test.otp.code_for("9999999999").unwrap();
        verify_otp(
            VerifyOtpRequest {
                email: None,
                phone: Some("9999999999".to_string()),
                otp: code,
            },
            &deps,
        )
        .await
        .unwrap();

        let result = resend_otp(resend("9999999999"), &deps).await;
        assert!(matches!(result, Err(AuthError::BadRequest(_))));
    }
}
