//! One-time passcode engine
//!
//! Generates, persists, delivers and consumes challenges. The backing store
//! decides the challenge TTL (5 minutes durable, 15 minutes for the
//! in-memory fallback); the engine decides the delivery channel from the
//! identifier's format.

use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{Identifier, OtpChallenge};
use crate::kernel::{BaseMailer, BaseOtpStore, BaseSmsSender};

/// Generate a 6-digit code, uniform over 000000-999999.
///
/// Codes are not unique across identifiers; per-identifier expiry and
/// consumption are what matter.
pub fn generate_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{code:06}")
}

pub struct OtpEngine {
    store: Arc<dyn BaseOtpStore>,
    mailer: Arc<dyn BaseMailer>,
    sms: Arc<dyn BaseSmsSender>,
}

impl OtpEngine {
    pub fn new(
        store: Arc<dyn BaseOtpStore>,
        mailer: Arc<dyn BaseMailer>,
        sms: Arc<dyn BaseSmsSender>,
    ) -> Self {
        Self { store, mailer, sms }
    }

    /// Generate and persist a challenge, replacing any outstanding one for
    /// the identifier. Returns the code for delivery.
    pub async fn issue(&self, identifier: &Identifier) -> Result<String, AuthError> {
        let code = generate_code();
        let challenge = OtpChallenge::new(
            identifier.as_str().to_string(),
            code.clone(),
            self.store.ttl(),
        );
        self.store.put(challenge).await?;
        Ok(code)
    }

    /// Deliver the code over email or SMS depending on the identifier's
    /// format. A transport failure is a hard failure of the attempt.
    pub async fn deliver(&self, identifier: &Identifier, code: &str) -> Result<(), AuthError> {
        match identifier {
            Identifier::Email(email) => {
                let body = format!("Your OTP is: {code}");
                self.mailer
                    .send_email(email, "AstroMatch Signup OTP", &body)
                    .await?;
            }
            Identifier::Phone(phone) => {
                let body = format!("Your AstroMatch OTP is: {code}");
                self.sms.send_sms(phone, &body).await?;
            }
        }
        info!(identifier = identifier.as_str(), "OTP delivered");
        Ok(())
    }

    /// Check and consume a submitted code. Fails closed: false unless a
    /// live challenge matches, and the match is deleted in the same store
    /// operation so the code cannot be replayed.
    pub async fn verify(&self, identifier: &Identifier, code: &str) -> Result<bool, AuthError> {
        Ok(self
            .store
            .consume(identifier.as_str(), code, Utc::now())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockMailer, MockOtpStore, MockSmsSender};
    use chrono::Duration;

    fn engine(store: Arc<MockOtpStore>) -> (OtpEngine, Arc<MockMailer>, Arc<MockSmsSender>) {
        let mailer = Arc::new(MockMailer::new());
        let sms = Arc::new(MockSmsSender::new());
        (
            OtpEngine::new(store, mailer.clone(), sms.clone()),
            mailer,
            sms,
        )
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn issue_stores_a_challenge_for_the_identifier() {
        let store = Arc::new(MockOtpStore::new());
        let (engine, _, _) = engine(store.clone());

        let identifier = Identifier::Phone("9999999999".to_string());
        let code = engine.issue(&identifier).await.unwrap();

        assert_eq!(store.code_for("9999999999"), Some(code));
    }

    #[tokio::test]
    async fn deliver_routes_email_identifiers_to_the_mailer() {
        let store = Arc::new(MockOtpStore::new());
        let (engine, mailer, sms) = engine(store);

        let identifier = Identifier::Email("a@b.com".to_string());
        engine.deliver(&identifier, "123456").await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert!(sent[0].body.contains("123456"));
        assert!(sms.sent().is_empty());
    }

    #[tokio::test]
    async fn deliver_routes_phone_identifiers_to_sms() {
        let store = Arc::new(MockOtpStore::new());
        let (engine, mailer, sms) = engine(store);

        let identifier = Identifier::Phone("9999999999".to_string());
        engine.deliver(&identifier, "123456").await.unwrap();

        let sent = sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "9999999999");
        assert!(sent[0].body.contains("123456"));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn verify_consumes_the_challenge() {
        let store = Arc::new(MockOtpStore::new());
        let (engine, _, _) = engine(store);

        let identifier = Identifier::Phone("9999999999".to_string());
        let code = engine.issue(&identifier).await.unwrap();

        assert!(engine.verify(&identifier, &code).await.unwrap());
        // Second attempt with the same pair fails: single use
        assert!(!engine.verify(&identifier, &code).await.unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_expired_challenges_regardless_of_code() {
        let store = Arc::new(MockOtpStore::new());
        store.seed(OtpChallenge::new(
            "a@b.com".to_string(),
            "123456".to_string(),
            Duration::minutes(-1),
        ));
        let (engine, _, _) = engine(store);

        let identifier = Identifier::Email("a@b.com".to_string());
        assert!(!engine.verify(&identifier, "123456").await.unwrap());
    }

    #[tokio::test]
    async fn verify_fails_closed_when_no_challenge_exists() {
        let store = Arc::new(MockOtpStore::new());
        let (engine, _, _) = engine(store);

        let identifier = Identifier::Phone("9999999999".to_string());
        assert!(!engine.verify(&identifier, "000000").await.unwrap());
    }
}
