//! In-memory stores with the same observable behaviour as the PostgreSQL ones.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        transaction::{NewTransaction, Transaction, TransactionFilter},
        user::{NewUser, User},
    },
    repositories::{TransactionStore, UserStore},
};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirrors the `users_username_key` and `users_email_key` constraints.
fn check_unique(users: &[User], id: Uuid, username: &str, email: &str) -> Result<(), AppError> {
    if users.iter().any(|u| u.id != id && u.username == username) {
        return Err(AppError::UsernameExists);
    }
    if users.iter().any(|u| u.id != id && u.email == email) {
        return Err(AppError::EmailExists);
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let id = Uuid::new_v4();
        check_unique(&users, id, &user.username, &user.email)?;

        let now = Utc::now();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        check_unique(&users, user.id, &user.username, &user.email)?;

        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::UserNotFound)?;
        existing.username = user.username.clone();
        existing.email = user.email.clone();
        existing.password_hash = user.password_hash.clone();
        existing.updated_at = user.updated_at;

        Ok(())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email == email))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(transaction: &Transaction, filter: &TransactionFilter) -> bool {
    transaction.user_id == filter.user_id
        && filter
            .symbol
            .as_ref()
            .is_none_or(|symbol| &transaction.symbol == symbol)
        && filter
            .transaction_type
            .is_none_or(|t| transaction.transaction_type == t.as_str())
        && filter
            .start_time
            .is_none_or(|start| transaction.trade_time >= start)
        && filter
            .end_time
            .is_none_or(|end| transaction.trade_time < end)
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: transaction.user_id,
            symbol: transaction.symbol,
            name: transaction.name,
            transaction_type: transaction.transaction_type.as_str().to_string(),
            quantity: transaction.quantity,
            price: transaction.price,
            amount: transaction.amount,
            fee: transaction.fee,
            trade_time: transaction.trade_time,
            notes: transaction.notes,
            created_at: Utc::now(),
        };
        self.transactions.lock().unwrap().push(transaction.clone());

        Ok(transaction)
    }

    async fn find_by_user(
        &self,
        filter: &TransactionFilter,
    ) -> Result<(Vec<Transaction>, i64), AppError> {
        let transactions = self.transactions.lock().unwrap();

        let mut matching: Vec<Transaction> = transactions
            .iter()
            .filter(|t| matches(t, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.trade_time.cmp(&a.trade_time).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size as usize)
            .collect();

        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::password::PasswordHash;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: PasswordHash::new_unchecked("$2b$04$hash"),
        }
    }

    #[tokio::test]
    async fn lookups_find_created_user() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("alice", "alice@example.com")).await.unwrap();

        assert_eq!(store.get_by_id(created.id).await.unwrap().unwrap().id, created.id);
        assert_eq!(
            store.get_by_email("alice@example.com").await.unwrap().unwrap().id,
            created.id
        );
        assert!(store.get_by_username("bob").await.unwrap().is_none());
        assert!(store.exists_by_username("alice").await.unwrap());
        assert!(!store.exists_by_email("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let mut user = store.create(new_user("alice", "alice@example.com")).await.unwrap();
        user.id = Uuid::new_v4();

        assert!(matches!(store.update(&user).await, Err(AppError::UserNotFound)));
    }
}
