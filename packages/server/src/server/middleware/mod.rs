mod jwt_auth;

pub use jwt_auth::{require_session, AuthUser, SESSION_COOKIE};
