mod auth;
mod health;
mod matchmaking;
mod users;

pub use auth::{login_handler, resend_otp_handler, signup_handler, verify_otp_handler};
pub use health::health_handler;
pub use matchmaking::find_matches_handler;
pub use users::{get_user_handler, update_preferences_handler, update_user_handler};
