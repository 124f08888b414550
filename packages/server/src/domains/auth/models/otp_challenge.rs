use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// OtpChallenge - one outstanding verification attempt
///
/// Keyed by identifier: issuing a new challenge replaces the previous one,
/// so at most one is authoritative at a time. Expiry is absolute.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OtpChallenge {
    pub identifier: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn new(identifier: String, code: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            identifier,
            code,
            created_at: now,
            expires_at: now + ttl,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl OtpChallenge {
    pub async fn put(challenge: &OtpChallenge, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO otp_challenges (identifier, code, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (identifier) DO UPDATE SET
                code = EXCLUDED.code,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&challenge.identifier)
        .bind(&challenge.code)
        .bind(challenge.created_at)
        .bind(challenge.expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Check and delete in one statement. The row is gone the moment a
    /// verification succeeds, so the same code cannot be replayed.
    pub async fn consume(
        identifier: &str,
        code: &str,
        now: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM otp_challenges WHERE identifier = $1 AND code = $2 AND expires_at > $3",
        )
        .bind(identifier)
        .bind(code)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn sweep_expired(now: DateTime<Utc>, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM otp_challenges WHERE expires_at <= $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
