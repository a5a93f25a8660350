//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - `NewUser`: Fields needed to insert a user
//! - Request bodies for registration, login and profile/password updates
//! - `UserResponse` / `LoginResponse`: Response bodies returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::password::PasswordHash;

/// Column widths of `users.username` and `users.email`.
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. `username` and `email` are each unique
/// (enforced by `users_username_key` and `users_email_key`).
///
/// The plaintext password is never stored; only the bcrypt hash is.
/// Not `Serialize`; responses go through [`UserResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn password_hash(&self) -> PasswordHash {
        PasswordHash::new_unchecked(&self.password_hash)
    }
}

/// A user that has passed validation and is ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

/// Request body for `POST /api/v1/user/register`.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct horse"
/// }
/// ```
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/user/login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /api/v1/user/profile`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
}

/// Request body for `POST /api/v1/user/password`.
#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Public projection of a user.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "username": "alice",
///   "email": "alice@example.com",
///   "created_at": "2026-01-15T10:30:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Convert database User to API UserResponse.
///
/// This removes the password hash and the update timestamp.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,

    /// Token expiry as a Unix timestamp (seconds)
    pub expires_at: i64,

    pub user: UserResponse,
}
