//! Matchmaking endpoints (session-guarded)

use axum::extract::Extension;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::domains::auth::AuthError;
use crate::domains::matchmaking::actions::find_matches;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

pub async fn find_matches_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AuthError> {
    let matches = find_matches(user.user_id, &deps).await?;
    Ok(Json(matches))
}
