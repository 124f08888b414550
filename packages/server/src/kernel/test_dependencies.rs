// TestDependencies - mock implementations for testing
//
// Provides in-memory collaborators that can be injected into ServerDeps for
// unit and integration tests. Mocks capture their calls so tests can assert
// on delivery and storage side effects.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domains::auth::models::{Identifier, OtpChallenge, ProfileUpdate, User};
use crate::domains::auth::JwtService;
use crate::domains::users::models::Preferences;
use crate::kernel::{
    BaseMailer, BaseOtpStore, BasePreferenceStore, BaseSmsSender, BaseTokenVerifier,
    BaseUserStore, ProviderIdentity, ServerDeps, StoreError,
};

// =============================================================================
// Mock User Store
// =============================================================================

pub struct MockUserStore {
    users: Mutex<Vec<User>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// Seed an account before the test runs
    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserStore for MockUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let duplicate = users.iter().any(|existing| {
            (user.email.is_some() && existing.email == user.email)
                || (user.phone.is_some() && existing.phone == user.phone)
        });
        if duplicate {
            return Err(StoreError::Duplicate);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, identifier: &Identifier) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let found = users.iter_mut().find(|u| match identifier {
            Identifier::Email(email) => u.email.as_deref() == Some(email) && !u.is_verified,
            Identifier::Phone(phone) => u.phone.as_deref() == Some(phone) && !u.is_verified,
        });
        match found {
            Some(user) => {
                user.is_verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileUpdate) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                if let Some(name) = changes.name {
                    user.name = Some(name);
                }
                if let Some(birthdate) = changes.birthdate {
                    user.birthdate = Some(birthdate);
                }
                if let Some(zodiac_sign) = changes.zodiac_sign {
                    user.zodiac_sign = Some(zodiac_sign);
                }
                if let Some(profile_pic) = changes.profile_pic {
                    user.profile_pic = Some(profile_pic);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_verified(&self) -> Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.is_verified)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Mock Preference Store
// =============================================================================

pub struct MockPreferenceStore {
    prefs: Mutex<HashMap<Uuid, Preferences>>,
}

impl MockPreferenceStore {
    pub fn new() -> Self {
        Self {
            prefs: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, user_id: Uuid) -> Option<Preferences> {
        self.prefs.lock().unwrap().get(&user_id).cloned()
    }
}

impl Default for MockPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePreferenceStore for MockPreferenceStore {
    async fn upsert(&self, prefs: Preferences) -> Result<()> {
        self.prefs.lock().unwrap().insert(prefs.user_id, prefs);
        Ok(())
    }
}

// =============================================================================
// Mock OTP Store
// =============================================================================

/// In-memory challenge store with inspection hooks: tests can read the
/// outstanding code for an identifier or force a challenge to expire.
pub struct MockOtpStore {
    challenges: Mutex<HashMap<String, OtpChallenge>>,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self {
            challenges: Mutex::new(HashMap::new()),
        }
    }

    /// Outstanding code for an identifier, if any
    pub fn code_for(&self, identifier: &str) -> Option<String> {
        self.challenges
            .lock()
            .unwrap()
            .get(identifier)
            .map(|c| c.code.clone())
    }

    /// Backdate the challenge so its expiry is in the past
    pub fn expire(&self, identifier: &str) {
        if let Some(challenge) = self.challenges.lock().unwrap().get_mut(identifier) {
            challenge.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    /// Insert a challenge directly, bypassing the engine
    pub fn seed(&self, challenge: OtpChallenge) {
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.identifier.clone(), challenge);
    }
}

impl Default for MockOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOtpStore for MockOtpStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<()> {
        self.seed(challenge);
        Ok(())
    }

    async fn consume(&self, identifier: &str, code: &str, now: DateTime<Utc>) -> Result<bool> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get(identifier) {
            Some(challenge) if challenge.expires_at <= now => {
                challenges.remove(identifier);
                Ok(false)
            }
            Some(challenge) if challenge.code == code => {
                challenges.remove(identifier);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// =============================================================================
// Mock Delivery
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    failing: Mutex<bool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
        }
    }

    /// Make every subsequent send fail (transport outage)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(anyhow!("smtp relay unavailable"));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

pub struct MockSmsSender {
    sent: Mutex<Vec<SentSms>>,
    failing: Mutex<bool>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsSender for MockSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(anyhow!("sms gateway unavailable"));
        }
        self.sent.lock().unwrap().push(SentSms {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Mock Token Verifier
// =============================================================================

/// Maps known tokens to identities; every other token is rejected.
pub struct MockTokenVerifier {
    identities: Mutex<HashMap<String, ProviderIdentity>>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_identity(self, token: &str, email: &str, name: &str) -> Self {
        self.identities.lock().unwrap().insert(
            token.to_string(),
            ProviderIdentity {
                email: email.to_string(),
                name: name.to_string(),
                picture: Some(format!("https://pics.example.com/{name}.jpg")),
            },
        );
        self
    }
}

impl Default for MockTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<ProviderIdentity> {
        self.identities
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| anyhow!("provider rejected token"))
    }
}

// =============================================================================
// TestDeps - assembled container with handles to every mock
// =============================================================================

pub struct TestDeps {
    pub users: Arc<MockUserStore>,
    pub preferences: Arc<MockPreferenceStore>,
    pub otp: Arc<MockOtpStore>,
    pub mailer: Arc<MockMailer>,
    pub sms: Arc<MockSmsSender>,
    pub google: Arc<MockTokenVerifier>,
    pub facebook: Arc<MockTokenVerifier>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDeps {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserStore::new()),
            preferences: Arc::new(MockPreferenceStore::new()),
            otp: Arc::new(MockOtpStore::new()),
            mailer: Arc::new(MockMailer::new()),
            sms: Arc::new(MockSmsSender::new()),
            google: Arc::new(MockTokenVerifier::new()),
            facebook: Arc::new(MockTokenVerifier::new()),
            jwt_service: Arc::new(JwtService::new("test_secret_key")),
        }
    }

    pub fn with_users(users: MockUserStore) -> Self {
        Self {
            users: Arc::new(users),
            ..Self::new()
        }
    }

    pub fn with_google(google: MockTokenVerifier) -> Self {
        Self {
            google: Arc::new(google),
            ..Self::new()
        }
    }

    /// The trait-object container the domain actions consume
    pub fn deps(&self) -> ServerDeps {
        ServerDeps {
            users: self.users.clone(),
            preferences: self.preferences.clone(),
            otp_store: self.otp.clone(),
            mailer: self.mailer.clone(),
            sms: self.sms.clone(),
            google: self.google.clone(),
            facebook: self.facebook.clone(),
            jwt_service: self.jwt_service.clone(),
        }
    }
}

impl Default for TestDeps {
    fn default() -> Self {
        Self::new()
    }
}
