//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query string, auth context)
//! 2. Calls the matching service
//! 3. Returns a `{"data": ...}` JSON response, or an `AppError`

use email_address::EmailAddress;

use crate::error::AppError;

/// Service liveness endpoint
pub mod health;
/// Transaction recording and listing endpoints
pub mod transactions;
/// Registration, login and profile endpoints
pub mod users;

/// Reject empty or whitespace-only required fields.
fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Reject values longer than the column that stores them.
///
/// Length is counted in characters, matching `VARCHAR(n)`.
fn require_max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::InvalidRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), AppError> {
    if !EmailAddress::is_valid(value) {
        return Err(AppError::InvalidRequest(
            "email is not a valid address".to_string(),
        ));
    }
    Ok(())
}
