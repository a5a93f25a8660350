//! Password validation and hashing.
//!
//! `ValidatedPassword` wraps a plaintext string that meets the minimum length.
//! `PasswordHash` turns a `ValidatedPassword` into a salted bcrypt hash; the
//! plaintext is dropped as soon as hashing finishes.

use crate::error::AppError;

/// Minimum number of characters accepted for a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A password that has been validated, but not yet hashed.
#[derive(Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Validate a raw password string.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [AppError::PasswordTooShort] if the password has fewer than
    /// [MIN_PASSWORD_LENGTH] characters.
    pub fn new(raw_password: &str) -> Result<Self, AppError> {
        if raw_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::PasswordTooShort);
        }

        Ok(Self(raw_password.to_string()))
    }
}

impl std::fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValidatedPassword(********)")
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Create a hashed password from a validated password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, AppError> {
        let hash = bcrypt::hash(&password.0, cost)?;
        Ok(Self(hash))
    }

    /// Wrap a hash that was loaded from storage.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches this hash.
    pub fn verify(&self, raw_password: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(raw_password, &self.0)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
