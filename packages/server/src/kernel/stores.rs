//! Production store implementations.
//!
//! Postgres-backed stores delegate every query to the model layer
//! (all SQL lives in `domains/*/models/`). `InMemoryOtpStore` is the
//! explicit-opt-in fallback for environments without durable storage.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domains::auth::models::{Identifier, OtpChallenge, ProfileUpdate, User};
use crate::domains::users::models::Preferences;
use crate::kernel::{
    BaseOtpStore, BasePreferenceStore, BaseUserStore, StoreError,
};

// =============================================================================
// Postgres stores
// =============================================================================

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(email, &self.pool).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        User::find_by_phone(phone, &self.pool).await
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        User::insert(&user, &self.pool).await.map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                StoreError::Duplicate
            } else {
                StoreError::Other(e.into())
            }
        })
    }

    async fn mark_verified(&self, identifier: &Identifier) -> Result<bool> {
        User::mark_verified(identifier, &self.pool).await
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileUpdate) -> Result<bool> {
        User::update_profile(id, &changes, &self.pool).await
    }

    async fn list_verified(&self) -> Result<Vec<User>> {
        User::list_verified(&self.pool).await
    }
}

pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePreferenceStore for PgPreferenceStore {
    async fn upsert(&self, prefs: Preferences) -> Result<()> {
        Preferences::upsert(&prefs, &self.pool).await
    }
}

pub struct PgOtpStore {
    pool: PgPool,
}

impl PgOtpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseOtpStore for PgOtpStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<()> {
        // Opportunistic garbage collection; expiry itself is enforced at read
        OtpChallenge::sweep_expired(Utc::now(), &self.pool).await?;
        OtpChallenge::put(&challenge, &self.pool).await
    }

    async fn consume(&self, identifier: &str, code: &str, now: DateTime<Utc>) -> Result<bool> {
        OtpChallenge::consume(identifier, code, now, &self.pool).await
    }
}

// =============================================================================
// In-memory OTP fallback
// =============================================================================

/// Process-local challenge store. Survives neither restarts nor horizontal
/// scaling, hence the explicit `OTP_STORE=memory` opt-in and the longer TTL.
pub struct InMemoryOtpStore {
    challenges: Mutex<HashMap<String, OtpChallenge>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self {
            challenges: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOtpStore for InMemoryOtpStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<()> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.insert(challenge.identifier.clone(), challenge);
        Ok(())
    }

    async fn consume(&self, identifier: &str, code: &str, now: DateTime<Utc>) -> Result<bool> {
        // Single lock covers check and removal
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get(identifier) {
            Some(challenge) if challenge.expires_at <= now => {
                // Lazy expiry
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

    fn ttl(&self) -> Duration {
        Duration::minutes(15)
    }
}
