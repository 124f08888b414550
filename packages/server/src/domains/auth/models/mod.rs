mod identifier;
mod otp_challenge;
mod user;

pub use identifier::Identifier;
pub use otp_challenge::OtpChallenge;
pub use user::{ProfileUpdate, SignupMethod, User};
