//! Find matches action

use serde::Serialize;
use uuid::Uuid;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::User;
use crate::domains::matchmaking::compatibility_score;
use crate::kernel::ServerDeps;

/// A candidate scored against the requesting account.
#[derive(Debug, Serialize)]
pub struct MatchCandidate {
    pub user: User,
    pub score: u8,
}

/// Score every other verified account against the requester's sign,
/// best matches first. Candidates without a known sign are skipped.
pub async fn find_matches(
    user_id: Uuid,
    deps: &ServerDeps,
) -> Result<Vec<MatchCandidate>, AuthError> {
    let user = deps
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AuthError::NotFound("user"))?;
    let my_sign = user
        .zodiac_sign
        .as_deref()
        .ok_or_else(|| AuthError::BadRequest("account has no zodiac sign".to_string()))?;

    let mut matches: Vec<MatchCandidate> = deps
        .users
        .list_verified()
        .await?
        .into_iter()
        .filter(|candidate| candidate.id != user.id)
        .filter_map(|candidate| {
            let score = candidate
                .zodiac_sign
                .as_deref()
                .and_then(|sign| compatibility_score(my_sign, sign))?;
            Some(MatchCandidate {
                user: candidate,
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::models::Identifier;
    use crate::kernel::test_dependencies::{MockUserStore, TestDeps};

    fn verified_user(phone: &str, sign: Option<&str>) -> User {
        let identifier = Identifier::Phone(phone.to_string());
        let mut user =
            User::new_pending(&identifier, None, None, None, sign.map(str::to_string));
        user.is_verified = true;
        user
    }

    #[tokio::test]
    async fn candidates_are_scored_and_sorted_best_first() {
        let me = verified_user("1000000000", Some("Aries"));
        let my_id = me.id;
        let users = MockUserStore::new()
            .with_user(me)
            .with_user(verified_user("2000000000", Some("Scorpio"))) // 55
            .with_user(verified_user("3000000000", Some("Leo"))) // 90
            .with_user(verified_user("4000000000", Some("Gemini"))); // 85
        let test = TestDeps::with_users(users);

        let matches = find_matches(my_id, &test.deps()).await.unwrap();

        let scores: Vec<u8> = matches.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![90, 85, 55]);
        assert!(matches.iter().all(|m| m.user.id != my_id));
    }

    #[tokio::test]
    async fn unverified_and_signless_candidates_are_skipped() {
        let me = verified_user("1000000000", Some("Aries"));
        let my_id = me.id;
        let mut unverified = verified_user("2000000000", Some("Leo"));
        unverified.is_verified = false;
        let users = MockUserStore::new()
            .with_user(me)
            .with_user(unverified)
            .with_user(verified_user("3000000000", None));
        let test = TestDeps::with_users(users);

        let matches = find_matches(my_id, &test.deps()).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn requester_without_a_sign_is_a_bad_request() {
        let me = verified_user("1000000000", None);
        let my_id = me.id;
        let test = TestDeps::with_users(MockUserStore::new().with_user(me));

        let result = find_matches(my_id, &test.deps()).await;
        assert!(matches!(result, Err(AuthError::BadRequest(_))));
    }
}
