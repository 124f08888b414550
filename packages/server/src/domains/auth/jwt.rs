use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Session credential lifetime in hours. Credentials are stateless, so
/// expiry is the only termination mechanism.
pub const SESSION_LIFETIME_HOURS: i64 = 72;

/// JWT Claims - data stored in the session credential
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // Subject (account id)
    pub iat: i64,  // Issued at timestamp
    pub exp: i64,  // Expiration timestamp
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("session credential expired")]
    Expired,
    #[error("session credential signature mismatch")]
    InvalidSignature,
    #[error("malformed session credential")]
    Malformed,
}

/// JWT Service - creates and verifies session credentials
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create new JWT service from the injected signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a credential for an account.
    ///
    /// Expires 72 hours after issuance.
    pub fn issue(&self, subject: Uuid) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_LIFETIME_HOURS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Validate a credential and return its subject.
    ///
    /// jsonwebtoken checks the signature before deserializing claims, so an
    /// unverified payload is never trusted. No expiry leeway.
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = JwtService::new("test_secret_key");
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id).unwrap();
        let subject = service.validate(&token).unwrap();

        assert_eq!(subject, account_id);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = JwtService::new("test_secret_key");
        assert_eq!(service.validate("not_a_jwt"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_wrong_secret_fails_signature_check() {
        let service1 = JwtService::new("secret1");
        let service2 = JwtService::new("secret2");

        let token = service1.issue(Uuid::new_v4()).unwrap();

        assert_eq!(
            service2.validate(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_signature_fails_even_with_valid_claims() {
        let service = JwtService::new("test_secret_key");
        let token = service.issue(Uuid::new_v4()).unwrap();

        // Flip the last character of the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(
            service.validate(&tampered),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new("test_secret_key");

        // Hand-craft a credential that expired an hour ago
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_is_72_hours_out() {
        let service = JwtService::new("test_secret_key");
        let token = service.issue(Uuid::new_v4()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test_secret_key"),
            &validation,
        )
        .unwrap();

        let lifetime = data.claims.exp - data.claims.iat;
        assert_eq!(lifetime, 72 * 3600);
    }
}
