use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Matchmaking preferences for one account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub user_id: Uuid,
    pub preferred_sign: Option<String>,
    pub max_distance: i32,
    pub interests: Vec<String>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Preferences {
    /// Update, inserting when no row matched.
    pub async fn upsert(prefs: &Preferences, pool: &PgPool) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE preferences
            SET preferred_sign = $2, max_distance = $3, interests = $4
            WHERE user_id = $1
            "#,
        )
        .bind(prefs.user_id)
        .bind(&prefs.preferred_sign)
        .bind(prefs.max_distance)
        .bind(&prefs.interests)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            sqlx::query(
                r#"
                INSERT INTO preferences (user_id, preferred_sign, max_distance, interests)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(prefs.user_id)
            .bind(&prefs.preferred_sign)
            .bind(prefs.max_distance)
            .bind(&prefs.interests)
            .execute(pool)
            .await?;
        }
        Ok(())
    }
}
