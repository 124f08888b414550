//! Password hashing and verification

use crate::domains::auth::errors::AuthError;

/// bcrypt work factor for stored hashes.
const BCRYPT_COST: u32 = 14;

/// One-way hash of a plaintext password.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AuthError::Hashing)
}

/// Compare a plaintext password against a stored hash.
///
/// Mismatches and malformed hashes both verify false; neither is an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
