//! User HTTP handlers.
//!
//! This module implements the user-related API endpoints:
//! - POST /api/v1/user/register - Create an account (public)
//! - POST /api/v1/user/login - Exchange credentials for a bearer token (public)
//! - GET /api/v1/user/profile - Current user's profile
//! - PUT /api/v1/user/profile - Change username and email
//! - POST /api/v1/user/password - Change password

use axum::{Extension, Json, extract::State, http::StatusCode};

use super::{require_email, require_max_length, require_non_blank};
use crate::{
    error::AppError,
    extract::AppJson,
    middleware::auth::AuthContext,
    models::{
        response::ApiResponse,
        user::{
            LoginRequest, LoginResponse, MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH, RegisterRequest,
            UpdatePasswordRequest, UpdateProfileRequest, UserResponse,
        },
    },
    state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"data": <UserResponse>}`
/// - **Error (400)**: Password shorter than 6 characters, blank or over-long field, or malformed email
/// - **Error (409)**: Username or email already registered
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    validate_identity(&request.username, &request.email)?;

    let user = state
        .users
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// Log in and receive a bearer token.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiJ9...",
///     "expires_at": 1768473000,
///     "user": { "id": "...", "username": "alice", "email": "...", "created_at": "..." }
///   }
/// }
/// ```
///
/// # Security
///
/// Unknown usernames and wrong passwords both return 401 with the same body,
/// so the endpoint cannot be used to discover which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let user = state
        .users
        .login(&request.username, &request.password)
        .await
        .map_err(|e| match e {
            AppError::UserNotFound | AppError::InvalidPassword => AppError::InvalidCredentials,
            other => other,
        })?;

    let issued = state.tokens.issue(user.id, &user.username)?;

    Ok(Json(ApiResponse::new(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at.timestamp(),
        user: user.into(),
    })))
}

/// Get the authenticated user's profile.
///
/// Returns 404 if the user was removed after the token was issued.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.users.get_profile(auth.user_id).await?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// Change the authenticated user's username and email.
///
/// Responds with `{"data": null}` on success. Existing tokens keep the old
/// username in their claims until they expire.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    validate_identity(&request.username, &request.email)?;

    state
        .users
        .update_profile(auth.user_id, &request.username, &request.email)
        .await?;

    Ok(Json(ApiResponse::new(())))
}

/// Change the authenticated user's password.
///
/// # Request Body
///
/// ```json
/// {
///   "old_password": "secret1",
///   "new_password": "secret2"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"data": null}`
/// - **Error (401)**: `old_password` is wrong
/// - **Error (400)**: `new_password` shorter than 6 characters
pub async fn update_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .users
        .update_password(auth.user_id, &request.old_password, &request.new_password)
        .await?;

    Ok(Json(ApiResponse::new(())))
}

/// Username and email checks shared by registration and profile updates.
fn validate_identity(username: &str, email: &str) -> Result<(), AppError> {
    require_non_blank("username", username)?;
    require_max_length("username", username, MAX_USERNAME_LENGTH)?;
    require_non_blank("email", email)?;
    require_max_length("email", email, MAX_EMAIL_LENGTH)?;
    require_email(email)
}
