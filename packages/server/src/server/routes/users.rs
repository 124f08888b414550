//! User profile and preference endpoints (session-guarded)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domains::auth::models::ProfileUpdate;
use crate::domains::auth::AuthError;
use crate::domains::users::actions::{
    get_profile, update_preferences, update_profile, PreferencesUpdate,
};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

pub async fn get_user_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AuthError> {
    let user = get_profile(id, &deps).await?;
    Ok(Json(user))
}

pub async fn update_user_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let changes = payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::BadRequest(rejection.body_text()))?;
    update_profile(id, changes, &deps).await?;
    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn update_preferences_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<PreferencesUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let update = payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::BadRequest(rejection.body_text()))?;
    update_preferences(user.user_id, update, &deps).await?;
    Ok(Json(json!({ "message": "Preferences updated successfully" })))
}
