use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::Identifier;
use crate::kernel::ProviderIdentity;

/// Signup channel for an account. Exactly one per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "signup_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SignupMethod {
    Email,
    Google,
    Facebook,
    Phone,
}

/// User - one registered account
///
/// At least one of email / phone is always present; both are unique keys.
/// `is_verified` starts false for the email and phone channels and true for
/// OAuth channels, where the provider already attested the identity.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub profile_pic: Option<String>,
    pub birthdate: Option<String>,
    pub zodiac_sign: Option<String>,
    pub signup_method: SignupMethod,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub zodiac_sign: Option<String>,
    pub profile_pic: Option<String>,
}

impl User {
    /// Account awaiting an OTP round-trip (email or phone channel).
    pub fn new_pending(
        identifier: &Identifier,
        password_hash: Option<String>,
        name: Option<String>,
        birthdate: Option<String>,
        zodiac_sign: Option<String>,
    ) -> Self {
        let (email, phone, signup_method) = match identifier {
            Identifier::Email(email) => (Some(email.clone()), None, SignupMethod::Email),
            Identifier::Phone(phone) => (None, Some(phone.clone()), SignupMethod::Phone),
        };
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            profile_pic: None,
            birthdate,
            zodiac_sign,
            signup_method,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    /// Account attested by an OAuth provider; verified from the start.
    pub fn from_provider(identity: ProviderIdentity, signup_method: SignupMethod) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: (!identity.name.is_empty()).then_some(identity.name),
            email: Some(identity.email),
            phone: None,
            password_hash: None,
            profile_pic: identity.picture,
            birthdate: None,
            zodiac_sign: None,
            signup_method,
            is_verified: true,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Keeps the raw sqlx error so callers can classify unique violations.
    pub async fn insert(user: &User, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (id, name, email, phone, password_hash, profile_pic,
                 birthdate, zodiac_sign, signup_method, is_verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.profile_pic)
        .bind(&user.birthdate)
        .bind(&user.zodiac_sign)
        .bind(user.signup_method)
        .bind(user.is_verified)
        .bind(user.created_at)
        .fetch_one(pool)
        .await
    }

    /// Flip `is_verified` for the unverified account owning the identifier.
    pub async fn mark_verified(identifier: &Identifier, pool: &PgPool) -> Result<bool> {
        let (column, value) = match identifier {
            Identifier::Email(email) => ("email", email),
            Identifier::Phone(phone) => ("phone", phone),
        };
        let result = sqlx::query(&format!(
            "UPDATE users SET is_verified = TRUE WHERE {column} = $1 AND is_verified = FALSE"
        ))
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update_profile(
        id: Uuid,
        changes: &ProfileUpdate,
        pool: &PgPool,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                birthdate = COALESCE($3, birthdate),
                zodiac_sign = COALESCE($4, zodiac_sign),
                profile_pic = COALESCE($5, profile_pic)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.birthdate)
        .bind(&changes.zodiac_sign)
        .bind(&changes.profile_pic)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_verified(pool: &PgPool) -> Result<Vec<Self>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE is_verified = TRUE")
            .fetch_all(pool)
            .await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_email_account_is_unverified() {
        let identifier = Identifier::Email("a@b.com".to_string());
        let user = User::new_pending(&identifier, Some("$2b$14$hash".to_string()), None, None, None);

        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert!(user.phone.is_none());
        assert_eq!(user.signup_method, SignupMethod::Email);
        assert!(!user.is_verified);
    }

    #[test]
    fn pending_phone_account_is_unverified() {
        let identifier = Identifier::Phone("9999999999".to_string());
        let user = User::new_pending(&identifier, None, None, None, None);

        assert_eq!(user.phone.as_deref(), Some("9999999999"));
        assert!(user.email.is_none());
        assert_eq!(user.signup_method, SignupMethod::Phone);
        assert!(!user.is_verified);
    }

    #[test]
    fn provider_account_is_verified() {
        let user = User::from_provider(
            ProviderIdentity {
                email: "g@b.com".to_string(),
                name: "G".to_string(),
                picture: Some("https://pics.example.com/g.jpg".to_string()),
            },
            SignupMethod::Google,
        );

        assert!(user.is_verified);
        assert!(user.password_hash.is_none());
        assert_eq!(user.signup_method, SignupMethod::Google);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let identifier = Identifier::Email("a@b.com".to_string());
        let user = User::new_pending(&identifier, Some("$2b$14$hash".to_string()), None, None, None);

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["signupMethod"], "email");
    }
}
