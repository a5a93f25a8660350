//! Transaction persistence.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionFilter},
};

/// Insert and filtered listing of transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError>;

    /// One page of the user's transactions, most recent `trade_time` first,
    /// together with the number of rows matching the filter across all pages.
    async fn find_by_user(
        &self,
        filter: &TransactionFilter,
    ) -> Result<(Vec<Transaction>, i64), AppError>;
}

/// PostgreSQL-backed [`TransactionStore`].
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                user_id,
                symbol,
                name,
                transaction_type,
                quantity,
                price,
                amount,
                fee,
                trade_time,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(transaction.user_id)
        .bind(transaction.symbol)
        .bind(transaction.name)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.quantity)
        .bind(transaction.price)
        .bind(transaction.amount)
        .bind(transaction.fee)
        .bind(transaction.trade_time)
        .bind(transaction.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn find_by_user(
        &self,
        filter: &TransactionFilter,
    ) -> Result<(Vec<Transaction>, i64), AppError> {
        // Count over the same predicate, unaffected by LIMIT/OFFSET
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transactions");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM transactions");
        push_filter(&mut page_query, filter);
        page_query
            .push(" ORDER BY trade_time DESC, id DESC LIMIT ")
            .push_bind(filter.page_size)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let transactions = page_query
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        Ok((transactions, total))
    }
}

/// Append the `WHERE` clause for `filter`. Absent fields add no condition.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TransactionFilter) {
    builder.push(" WHERE user_id = ").push_bind(filter.user_id);

    if let Some(symbol) = &filter.symbol {
        builder.push(" AND symbol = ").push_bind(symbol.clone());
    }

    if let Some(transaction_type) = filter.transaction_type {
        builder
            .push(" AND transaction_type = ")
            .push_bind(transaction_type.as_str());
    }

    if let Some(start_time) = filter.start_time {
        builder.push(" AND trade_time >= ").push_bind(start_time);
    }

    if let Some(end_time) = filter.end_time {
        builder.push(" AND trade_time < ").push_bind(end_time);
    }
}
