//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    repositories::{TransactionStore, UserStore},
    services::{
        token_service::TokenService, transaction_service::TransactionService,
        user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub transactions: TransactionService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        transaction_store: Arc<dyn TransactionStore>,
        tokens: TokenService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users: UserService::new(user_store, bcrypt_cost),
            transactions: TransactionService::new(transaction_store),
            tokens,
        }
    }
}
