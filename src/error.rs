//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Numeric error codes returned in the `code` field of error bodies.
pub mod code {
    pub const SERVER_ERROR: u32 = 1001;
    pub const INVALID_PARAMS: u32 = 1002;

    pub const USER_NOT_FOUND: u32 = 2001;
    pub const USER_ALREADY_EXISTS: u32 = 2002;
    pub const PASSWORD_ERROR: u32 = 2003;
    pub const TOKEN_INVALID: u32 = 2004;
    pub const TOKEN_EXPIRED: u32 = 2005;

    pub const INVALID_AMOUNT: u32 = 4003;
    pub const INVALID_QUANTITY: u32 = 4004;
}

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: bad input shape, unknown enum value, non-positive numbers,
///   short passwords. Detected locally and never retried.
/// - **Conflict Errors**: username or email already taken
/// - **Not-Found Errors**: the referenced user does not exist
/// - **Authentication Errors**: bad password, missing/invalid/expired bearer token
/// - **Infrastructure Errors**: database, hashing and token encoding faults
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// bcrypt could not hash or verify a password.
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A blocking task (password hashing) panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A token could not be signed.
    #[error("Token encoding error: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Username already exists")]
    UsernameExists,

    #[error("Email already exists")]
    EmailExists,

    #[error("User not found")]
    UserNotFound,

    /// The supplied password does not match the stored hash.
    #[error("Invalid password")]
    InvalidPassword,

    /// Login failed. Deliberately does not say whether the username exists.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No `Authorization: Bearer <token>` header was supplied.
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    /// Token signature, issuer or shape is wrong.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Transaction type must be BUY or SELL")]
    InvalidType,

    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    #[error("Price must be greater than 0")]
    InvalidPrice,

    #[error("Fee must not be negative")]
    InvalidFee,

    /// `quantity * price` does not fit in a decimal without rounding.
    #[error("Amount cannot be represented exactly")]
    AmountNotRepresentable,

    /// Request body or parameters are invalid.
    ///
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    /// HTTP status and numeric error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, u32) {
        match self {
            AppError::PasswordTooShort | AppError::InvalidType | AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, code::INVALID_PARAMS)
            }
            AppError::InvalidQuantity => (StatusCode::BAD_REQUEST, code::INVALID_QUANTITY),
            AppError::InvalidPrice | AppError::InvalidFee | AppError::AmountNotRepresentable => {
                (StatusCode::BAD_REQUEST, code::INVALID_AMOUNT)
            }
            AppError::UsernameExists | AppError::EmailExists => {
                (StatusCode::CONFLICT, code::USER_ALREADY_EXISTS)
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, code::USER_NOT_FOUND),
            AppError::InvalidPassword | AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, code::PASSWORD_ERROR)
            }
            AppError::MissingToken | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, code::TOKEN_INVALID)
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, code::TOKEN_EXPIRED),
            AppError::Database(_)
            | AppError::PasswordHash(_)
            | AppError::Task(_)
            | AppError::TokenEncoding(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, code::SERVER_ERROR)
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "code": 2001,
///   "message": "User not found"
/// }
/// ```
///
/// Infrastructure errors are logged and answered with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "code": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
