//! Preference actions

use serde::Deserialize;
use uuid::Uuid;

use crate::domains::auth::errors::AuthError;
use crate::domains::users::models::Preferences;
use crate::kernel::ServerDeps;

/// Preference payload; the owning account comes from the session, never
/// from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub preferred_sign: Option<String>,
    #[serde(default)]
    pub max_distance: i32,
    #[serde(default)]
    pub interests: Vec<String>,
}

pub async fn update_preferences(
    user_id: Uuid,
    update: PreferencesUpdate,
    deps: &ServerDeps,
) -> Result<(), AuthError> {
    let prefs = Preferences {
        user_id,
        preferred_sign: update.preferred_sign,
        max_distance: update.max_distance,
        interests: update.interests,
    };
    deps.preferences.upsert(prefs).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::TestDeps;

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let test = TestDeps::new();
        let deps = test.deps();
        let user_id = Uuid::new_v4();

        update_preferences(
            user_id,
            PreferencesUpdate {
                preferred_sign: Some("Leo".to_string()),
                max_distance: 25,
                interests: vec!["astrology".to_string()],
            },
            &deps,
        )
        .await
        .unwrap();
        assert_eq!(
            test.preferences.get(user_id).unwrap().preferred_sign.as_deref(),
            Some("Leo")
        );

        update_preferences(
            user_id,
            PreferencesUpdate {
                preferred_sign: Some("Virgo".to_string()),
                max_distance: 50,
                interests: vec![],
            },
            &deps,
        )
        .await
        .unwrap();

        let stored = test.preferences.get(user_id).unwrap();
        assert_eq!(stored.preferred_sign.as_deref(), Some("Virgo"));
        assert_eq!(stored.max_distance, 50);
    }
}
