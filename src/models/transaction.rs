//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a BUY or SELL record
//! - `TransactionType`: The two accepted trade directions
//! - `CreateTransactionRequest` / `TransactionQuery`: Request shapes
//! - `TransactionFilter`: The persistence-level query produced from a `TransactionQuery`
//! - `TransactionResponse` / `TransactionPage`: Response bodies returned to clients

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Column widths of `transactions.symbol`, `.name` and `.notes`.
pub const MAX_SYMBOL_LENGTH: usize = 20;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_NOTES_LENGTH: usize = 500;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact strings `BUY` and `SELL` are accepted.
impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            _ => Err(AppError::InvalidType),
        }
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Belongs to one user (via `user_id`)
/// - Stores quantity, price, amount and fee as exact `NUMERIC` values (never floats)
/// - Carries the user-supplied `trade_time`, separate from `created_at`
///
/// Records are immutable once written, so the `updated_at` column is not mapped.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,

    /// Instrument code, e.g. "AAPL"
    pub symbol: String,

    /// Optional display name, e.g. "Apple Inc."
    pub name: Option<String>,

    /// "BUY" or "SELL" (enforced by CHECK constraint)
    pub transaction_type: String,

    pub quantity: Decimal,
    pub price: Decimal,

    /// Always `quantity * price`, computed server-side
    pub amount: Decimal,

    pub fee: Decimal,

    /// When the trade actually happened
    pub trade_time: DateTime<Utc>,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated transaction, ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    pub fee: Decimal,
    pub trade_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Request body for `POST /api/v1/transactions`.
///
/// # JSON Example
///
/// ```json
/// {
///   "symbol": "AAPL",
///   "name": "Apple Inc.",
///   "type": "BUY",
///   "quantity": "3",
///   "price": "19.999",
///   "fee": "0.5",
///   "trade_time": "2024-01-15T10:30:00Z",
///   "notes": "first position"
/// }
/// ```
///
/// Any `amount` field sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub symbol: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Parsed by the service; anything but `BUY`/`SELL` is `InvalidType`.
    #[serde(rename = "type")]
    pub transaction_type: String,

    pub quantity: Decimal,
    pub price: Decimal,

    /// Defaults to zero when omitted
    #[serde(default)]
    pub fee: Option<Decimal>,

    /// RFC 3339 timestamp
    pub trade_time: DateTime<Utc>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string for `GET /api/v1/transactions`.
///
/// `?page=1&page_size=20&symbol=AAPL&type=BUY&start_date=2024-01-01&end_date=2024-01-31`
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,

    pub symbol: Option<String>,

    #[serde(rename = "type")]
    pub transaction_type: Option<String>,

    /// Inclusive, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<NaiveDate>,

    /// Inclusive of the whole day, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
}

/// `?page=` and `?page=  ` deserialize as `None` instead of failing.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Persistence-level filter for listing a user's transactions.
///
/// Optional fields are applied conjunctively only when present.
/// `start_time` is inclusive and `end_time` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub user_id: Uuid,
    pub symbol: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// 1-indexed
    pub page: i64,
    pub page_size: i64,
}

impl TransactionFilter {
    /// Unfiltered first page for `user_id`.
    #[cfg(test)]
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            symbol: None,
            transaction_type: None,
            start_time: None,
            end_time: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl TransactionQuery {
    /// Translate the query string into a filter scoped to `user_id`.
    ///
    /// - `page` and `page_size` fall back to 1 and 20 when missing or not positive
    /// - empty `symbol`/`type` mean "no filter"
    /// - `start_date` becomes midnight UTC of that day
    /// - `end_date` becomes midnight UTC of the following day, used as an exclusive bound
    pub fn into_filter(self, user_id: Uuid) -> Result<TransactionFilter, AppError> {
        let page = self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let page_size = self
            .page_size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let symbol = self.symbol.filter(|s| !s.trim().is_empty());

        let transaction_type = self
            .transaction_type
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.parse::<TransactionType>())
            .transpose()?;

        let start_time = self.start_date.map(start_of_day);

        let end_time = self
            .end_date
            .map(|date| {
                date.succ_opt()
                    .map(start_of_day)
                    .ok_or_else(|| AppError::InvalidRequest("end_date is out of range".to_string()))
            })
            .transpose()?;

        Ok(TransactionFilter {
            user_id,
            symbol,
            transaction_type,
            start_time,
            end_time,
            page,
            page_size,
        })
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Response returned for a single transaction.
///
/// Decimal fields serialize as strings so no precision is lost in transit.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "symbol": "AAPL",
///   "name": "Apple Inc.",
///   "type": "BUY",
///   "quantity": "3",
///   "price": "19.999",
///   "amount": "59.997",
///   "fee": "0",
///   "trade_time": "2024-01-15T10:30:00Z",
///   "notes": null,
///   "created_at": "2024-01-15T10:31:02Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    pub fee: Decimal,
    pub trade_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Convert database Transaction to API TransactionResponse.
///
/// This removes `user_id`.
impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            symbol: transaction.symbol,
            name: transaction.name,
            transaction_type: transaction.transaction_type,
            quantity: transaction.quantity,
            price: transaction.price,
            amount: transaction.amount,
            fee: transaction.fee,
            trade_time: transaction.trade_time,
            notes: transaction.notes,
            created_at: transaction.created_at,
        }
    }
}

/// One page of transactions plus the total across all pages.
#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub list: Vec<TransactionResponse>,
}
