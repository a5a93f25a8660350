//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Verify its signature, issuer and expiry
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! Validation is a pure in-memory check; no database lookup is made.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Authentication context attached to authenticated requests.
///
/// Route handlers extract this with `Extension<AuthContext>` to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated user
    ///
    /// Used to scope every query to the caller's own data
    pub user_id: Uuid,

    pub username: String,
}

/// Bearer token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Validate the token with the shared `TokenService`
/// 3. If valid: inject `AuthContext` into request, call next handler
/// 4. Otherwise: return 401 Unauthorized
///
/// # Errors
///
/// - `MissingToken`: header absent or not in `Bearer <token>` form
/// - `InvalidToken`: bad signature, issuer or shape
/// - `TokenExpired`: token is past its expiry
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingToken)?;

    let claims = state.tokens.validate(token)?;
    let context = AuthContext {
        user_id: claims.user_id,
        username: claims.username,
    };

    tracing::debug!(
        user_id = %context.user_id,
        username = %context.username,
        "Authenticated request"
    );

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        repositories::memory::{InMemoryTransactionStore, InMemoryUserStore},
        services::token_service::TokenService,
    };

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryTransactionStore::new()),
            TokenService::new(b"middleware-test-secret", Duration::minutes(30), "smartfin"),
            4,
        )
    }

    async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
        format!("{} {}", auth.user_id, auth.username)
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn call(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_exposes_user_id_and_username() {
        let state = state();
        let user_id = Uuid::new_v4();
        let issued = state.tokens.issue(user_id, "alice").unwrap();

        let (status, body) = call(app(state), Some(&format!("Bearer {}", issued.token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{user_id} alice"));
    }

    #[tokio::test]
    async fn missing_or_blank_bearer_is_rejected() {
        for header in [None, Some("Bearer "), Some("Basic abc")] {
            let (status, _) = call(app(state()), header).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }
}
