//! User service - registration, login and profile management.
//!
//! This service handles:
//! - Password length validation and bcrypt hashing
//! - Username/email uniqueness checks at registration
//! - Credential verification at login and password change
//!
//! Token issuance is not done here; the login handler wraps the returned user.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        password::{PasswordHash, ValidatedPassword},
        user::{NewUser, User},
    },
    repositories::UserStore,
};

/// Plaintext behind the hash checked when a login names an unknown user.
const DUMMY_PASSWORD: &str = "smartfin-dummy-password";

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    /// Hashed at `bcrypt_cost` on first use, so both login failures cost one verify
    dummy_hash: Arc<OnceCell<PasswordHash>>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new user.
    ///
    /// # Process
    ///
    /// 1. Check the password is at least 6 characters
    /// 2. Check username and email are not already taken
    /// 3. Hash the password (the plaintext is dropped here)
    /// 4. Insert the user
    ///
    /// # Errors
    ///
    /// - `PasswordTooShort`: Password has fewer than 6 characters
    /// - `UsernameExists`: Username is taken
    /// - `EmailExists`: Email is taken
    /// - `Database` / `PasswordHash`: Infrastructure failure
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password = ValidatedPassword::new(password)?;

        if self.store.exists_by_username(username).await? {
            return Err(AppError::UsernameExists);
        }

        if self.store.exists_by_email(email).await? {
            return Err(AppError::EmailExists);
        }

        let password_hash = self.hash(password).await?;

        let user = self
            .store
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered user {}", user.username);

        Ok(user)
    }

    /// Verify a username/password pair.
    ///
    /// # Errors
    ///
    /// - `UserNotFound`: No user has this username
    /// - `InvalidPassword`: The password does not match
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.store.get_by_username(username).await? else {
            self.verify_dummy(password).await?;
            return Err(AppError::UserNotFound);
        };

        if !self.verify(&user, password).await? {
            tracing::warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::InvalidPassword);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(user)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.store
            .get_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Overwrite username and email.
    ///
    /// Unlike `register`, no uniqueness pre-check is made against other users.
    /// The store still rejects a collision with `UsernameExists` or `EmailExists`.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> Result<(), AppError> {
        let mut user = self.get_profile(user_id).await?;

        user.username = username.to_string();
        user.email = email.to_string();
        user.updated_at = Utc::now();

        self.store.update(&user).await
    }

    /// Replace the password after verifying the old one.
    ///
    /// The stored hash is left untouched on any error.
    ///
    /// # Errors
    ///
    /// - `UserNotFound`: The user no longer exists
    /// - `InvalidPassword`: `old_password` does not match
    /// - `PasswordTooShort`: `new_password` has fewer than 6 characters
    pub async fn update_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut user = self.get_profile(user_id).await?;

        if !self.verify(&user, old_password).await? {
            return Err(AppError::InvalidPassword);
        }

        let new_password = ValidatedPassword::new(new_password)?;
        let password_hash = self.hash(new_password).await?;

        user.password_hash = password_hash.as_str().to_string();
        user.updated_at = Utc::now();

        self.store.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    /// Hashing runs on the blocking pool.
    async fn hash(&self, password: ValidatedPassword) -> Result<PasswordHash, AppError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || PasswordHash::new(password, cost)).await?
    }

    async fn verify(&self, user: &User, password: &str) -> Result<bool, AppError> {
        verify_blocking(user.password_hash(), password).await
    }

    /// Spend the same bcrypt work as a real verify; the result is discarded.
    async fn verify_dummy(&self, password: &str) -> Result<(), AppError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async {
                let password = ValidatedPassword::new(DUMMY_PASSWORD)?;
                self.hash(password).await
            })
            .await?
            .clone();

        verify_blocking(hash, password).await?;

        Ok(())
    }
}

async fn verify_blocking(hash: PasswordHash, password: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash.verify(&password)).await?
}
