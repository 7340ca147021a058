//! Password hashing port and its Argon2 adapter.
//!
//! Use cases depend on [`PasswordHasher`] only; whether a hasher is
//! configured at all is a wiring decision.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Argon2,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::{AppError, AppResult};

/// Capability to hash secrets and compare a secret against a stored hash.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text secret for storage.
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Check a plain text secret against a stored hash.
    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id hasher with default parameters and a random salt per hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::hashing(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}
