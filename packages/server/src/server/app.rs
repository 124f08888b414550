//! Application setup and server configuration.

use std::sync::Arc;

use axum::extract::Extension;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::require_session;
use crate::server::routes::{
    find_matches_handler, get_user_handler, health_handler, login_handler, resend_otp_handler,
    signup_handler, update_preferences_handler, update_user_handler, verify_otp_handler,
};

/// Build the Axum application router
///
/// Auth endpoints are public by design; everything else sits behind the
/// session guard. CORS is permissive, matching the mobile clients.
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let jwt_service = deps.jwt_service.clone();

    let public = Router::new()
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/verify-otp", post(verify_otp_handler))
        .route("/api/auth/resend-otp", post(resend_otp_handler))
        .route("/health", get(health_handler));

    let protected = Router::new()
        .route("/api/match/find", get(find_matches_handler))
        .route("/api/v1/users/preferences", put(update_preferences_handler))
        .route(
            "/api/v1/users/:id",
            get(get_user_handler).put(update_user_handler),
        )
        .layer(middleware::from_fn(move |request, next| {
            require_session(jwt_service.clone(), request, next)
        }));

    public
        .merge(protected)
        .layer(Extension(deps))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
