//! HTTP route table.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{health, transactions, users},
    middleware::auth::auth_middleware,
    state::AppState,
};

/// Build the application router.
///
/// Registration, login and health are public; every other route requires a
/// valid bearer token.
pub fn build_router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        .route(
            "/api/v1/user/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/api/v1/user/password", post(users::update_password))
        .route(
            "/api/v1/transactions",
            post(transactions::create_transaction).get(transactions::list_transactions),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/user/register", post(users::register))
        .route("/api/v1/user/login", post(users::login))
        .merge(authenticated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
