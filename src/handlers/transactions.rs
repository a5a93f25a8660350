//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /api/v1/transactions - Record a BUY or SELL
//! - GET /api/v1/transactions - List the caller's transactions (filtered, paginated)

use axum::{Extension, Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;

use super::{require_max_length, require_non_blank};
use crate::{
    error::AppError,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthContext,
    models::{
        response::ApiResponse,
        transaction::{
            CreateTransactionRequest, MAX_NAME_LENGTH, MAX_NOTES_LENGTH, MAX_SYMBOL_LENGTH,
            TransactionPage, TransactionQuery, TransactionResponse,
        },
    },
    services::transaction_service::CreateTransaction,
    state::AppState,
};

/// Record a transaction for the authenticated user.
///
/// # Request Body
///
/// ```json
/// {
///   "symbol": "AAPL",
///   "name": "Apple Inc.",
///   "type": "BUY",
///   "quantity": "3",
///   "price": "19.999",
///   "fee": "1.5",
///   "trade_time": "2024-01-15T10:30:00Z",
///   "notes": "opening position"
/// }
/// ```
///
/// # Response (201)
///
/// `{"data": <TransactionResponse>}` with `amount` computed server-side
/// (`"59.997"` for the body above).
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), AppError> {
    require_non_blank("symbol", &request.symbol)?;
    require_max_length("symbol", &request.symbol, MAX_SYMBOL_LENGTH)?;
    if let Some(name) = &request.name {
        require_max_length("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(notes) = &request.notes {
        require_max_length("notes", notes, MAX_NOTES_LENGTH)?;
    }

    let transaction = state
        .transactions
        .create(CreateTransaction {
            user_id: auth.user_id,
            symbol: request.symbol,
            name: request.name,
            transaction_type: request.transaction_type,
            quantity: request.quantity,
            price: request.price,
            fee: request.fee.unwrap_or(Decimal::ZERO),
            trade_time: request.trade_time,
            notes: request.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(transaction.into())),
    ))
}

/// List the authenticated user's transactions.
///
/// # Query Parameters
///
/// - `page` (default 1), `page_size` (default 20)
/// - `symbol`, `type` (`BUY`/`SELL`): exact-match filters
/// - `start_date`, `end_date` (`YYYY-MM-DD`): inclusive date range
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "data": {
///     "total": 25,
///     "page": 2,
///     "page_size": 20,
///     "list": [ ... ]
///   }
/// }
/// ```
///
/// Results are ordered by `trade_time`, most recent first.
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppQuery(query): AppQuery<TransactionQuery>,
) -> Result<Json<ApiResponse<TransactionPage>>, AppError> {
    let filter = query.into_filter(auth.user_id)?;

    let page = state.transactions.list(filter).await?;

    Ok(Json(ApiResponse::new(page)))
}
