// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The signup and
// login flows are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseUserStore, BaseMailer)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domains::auth::models::{Identifier, OtpChallenge, ProfileUpdate, User};
use crate::domains::users::models::Preferences;

/// Storage failure the orchestration code must distinguish from plain I/O
/// errors: a unique-index rejection under concurrent signups for the same
/// identifier maps to the same outcome as a pre-check hit.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    Duplicate,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// =============================================================================
// Account Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>>;

    /// Insert a new account. Fails with `StoreError::Duplicate` when the
    /// email or phone unique index rejects the row.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Set `is_verified = true` on the unverified account owning the
    /// identifier. Returns false when no row matched.
    async fn mark_verified(&self, identifier: &Identifier) -> Result<bool>;

    /// Apply a partial profile update. Returns false when no row matched.
    async fn update_profile(&self, id: Uuid, changes: ProfileUpdate) -> Result<bool>;

    async fn list_verified(&self) -> Result<Vec<User>>;
}

#[async_trait]
pub trait BasePreferenceStore: Send + Sync {
    /// Update the user's preferences, inserting them when none exist yet.
    async fn upsert(&self, prefs: Preferences) -> Result<()>;
}

// =============================================================================
// OTP Challenge Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseOtpStore: Send + Sync {
    /// Store a challenge, replacing any outstanding one for the identifier.
    async fn put(&self, challenge: OtpChallenge) -> Result<()>;

    /// Consume the challenge matching identifier + code with
    /// `expires_at > now`. Check and delete happen as ONE store operation so
    /// a concurrent verification cannot reuse the code. Returns false when
    /// nothing matched.
    async fn consume(&self, identifier: &str, code: &str, now: DateTime<Utc>) -> Result<bool>;

    /// How long issued challenges live.
    fn ttl(&self) -> Duration {
        Duration::minutes(5)
    }
}

// =============================================================================
// Delivery Traits (Infrastructure - email / SMS)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[async_trait]
pub trait BaseSmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()>;
}

// =============================================================================
// OAuth Token Verifier Trait (Infrastructure)
// =============================================================================

/// Identity attested by a provider's token-introspection endpoint.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[async_trait]
pub trait BaseTokenVerifier: Send + Sync {
    /// Map an opaque provider token to a verified identity, or fail.
    /// Callers trust this verdict; no local signature checks happen.
    async fn verify(&self, token: &str) -> Result<ProviderIdentity>;
}
