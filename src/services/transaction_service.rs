//! Transaction service - Core business logic for BUY/SELL records.
//!
//! This service handles:
//! - Type, quantity, price and fee validation
//! - Server-side amount calculation (`quantity * price`) in exact decimal arithmetic
//! - Filtered, paginated listing scoped to the requesting user
//!
//! Every operation is a single insert or a single filtered read, so no
//! database transaction spans more than one statement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::transaction::{
        NewTransaction, Transaction, TransactionFilter, TransactionPage, TransactionType,
    },
    repositories::TransactionStore,
};

/// Input for [`TransactionService::create`].
///
/// `transaction_type` is the raw string from the request; it is parsed here
/// so that unknown values surface as [`AppError::InvalidType`].
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub user_id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    pub transaction_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fee: Decimal,
    pub trade_time: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Validate and record a transaction.
    ///
    /// # Process
    ///
    /// 1. Parse the type (`BUY` or `SELL`)
    /// 2. Check quantity > 0, price > 0 and fee >= 0
    /// 3. Compute amount = quantity * price
    /// 4. Insert the record
    ///
    /// # Errors
    ///
    /// - `InvalidType`: Type is not `BUY` or `SELL`
    /// - `InvalidQuantity`: Quantity is zero or negative
    /// - `InvalidPrice`: Price is zero or negative
    /// - `InvalidFee`: Fee is negative
    /// - `AmountNotRepresentable`: quantity * price cannot be stored without rounding
    /// - `Database`: Database error occurred
    pub async fn create(&self, input: CreateTransaction) -> Result<Transaction, AppError> {
        let transaction_type: TransactionType = input.transaction_type.parse()?;

        if input.quantity <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity);
        }

        if input.price <= Decimal::ZERO {
            return Err(AppError::InvalidPrice);
        }

        if input.fee < Decimal::ZERO {
            return Err(AppError::InvalidFee);
        }

        let amount = compute_amount(input.quantity, input.price)?;

        let transaction = self
            .store
            .create(NewTransaction {
                user_id: input.user_id,
                symbol: input.symbol,
                name: input.name,
                transaction_type,
                quantity: input.quantity,
                price: input.price,
                amount,
                fee: input.fee,
                trade_time: input.trade_time,
                notes: input.notes,
            })
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            "Recorded {} {} x {} @ {}",
            transaction.transaction_type,
            transaction.symbol,
            transaction.quantity,
            transaction.price
        );

        Ok(transaction)
    }

    /// List one page of the user's transactions, most recent trade first.
    ///
    /// `total` counts every row matching the filter, independent of the page window.
    pub async fn list(&self, filter: TransactionFilter) -> Result<TransactionPage, AppError> {
        let (transactions, total) = self.store.find_by_user(&filter).await?;

        Ok(TransactionPage {
            total,
            page: filter.page,
            page_size: filter.page_size,
            list: transactions.into_iter().map(Into::into).collect(),
        })
    }
}

/// Largest number of fractional digits a `Decimal` can hold.
const MAX_DECIMAL_SCALE: u32 = 28;

/// `quantity * price`, exact.
///
/// `Decimal` multiplication rounds when the true product needs more than 28
/// fractional digits or more than 96 bits of mantissa. Rather than store a
/// rounded amount, such products are rejected with
/// [`AppError::AmountNotRepresentable`].
pub fn compute_amount(quantity: Decimal, price: Decimal) -> Result<Decimal, AppError> {
    let quantity = quantity.normalize();
    let price = price.normalize();

    let exact_scale = quantity.scale() + price.scale();
    if exact_scale > MAX_DECIMAL_SCALE {
        return Err(AppError::AmountNotRepresentable);
    }

    let amount = quantity
        .checked_mul(price)
        .ok_or(AppError::AmountNotRepresentable)?;

    // A rounded product comes back with fewer fractional digits
    if amount.scale() != exact_scale {
        return Err(AppError::AmountNotRepresentable);
    }

    Ok(amount)
}
