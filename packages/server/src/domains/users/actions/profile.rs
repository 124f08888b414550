//! Profile actions

use uuid::Uuid;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{ProfileUpdate, User};
use crate::kernel::ServerDeps;

pub async fn get_profile(id: Uuid, deps: &ServerDeps) -> Result<User, AuthError> {
    deps.users
        .find_by_id(id)
        .await?
        .ok_or(AuthError::NotFound("user"))
}

pub async fn update_profile(
    id: Uuid,
    changes: ProfileUpdate,
    deps: &ServerDeps,
) -> Result<(), AuthError> {
    let matched = deps.users.update_profile(id, changes).await?;
    if !matched {
        return Err(AuthError::NotFound("user"));
    }
    Ok(())
}
