//! MPIN hashing with Argon2id.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during MPIN operations.
#[derive(Debug, Error)]
pub enum MpinError {
    /// Failed to hash MPIN.
    #[error("failed to hash MPIN: {0}")]
    HashError(String),

    /// Failed to verify MPIN.
    #[error("failed to verify MPIN: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string.
    #[error("invalid MPIN hash format")]
    InvalidHash,
}

/// Hashes an MPIN using Argon2id, returning a PHC string.
///
/// # Example
///
/// ```
/// use expensa_core::auth::hash_mpin;
///
/// let hash = hash_mpin("4821").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_mpin(mpin: &str) -> Result<String, MpinError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(mpin.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MpinError::HashError(e.to_string()))
}

/// Verifies an MPIN against a stored hash.
///
/// Returns `Ok(false)` on mismatch. Errors are reserved for malformed hashes
/// and unexpected verifier failures.
pub fn verify_mpin(mpin: &str, hash: &str) -> Result<bool, MpinError> {
    let parsed = PasswordHash::new(hash).map_err(|_| MpinError::InvalidHash)?;

    match Argon2::default().verify_password(mpin.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(MpinError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_correct_mpin() {
        let hash = hash_mpin("4821").unwrap();
        assert!(verify_mpin("4821", &hash).unwrap());
        assert!(!verify_mpin("4822", &hash).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        assert_ne!(hash_mpin("0000").unwrap(), hash_mpin("0000").unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        assert!(matches!(
            verify_mpin("1234", "not-a-hash"),
            Err(MpinError::InvalidHash)
        ));
    }
}
