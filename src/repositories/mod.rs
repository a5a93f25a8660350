//! Persistence collaborators.
//!
//! Services depend on the narrow `UserStore` and `TransactionStore` traits and
//! receive a concrete store through their constructor. PostgreSQL implementations
//! are used by the server; tests use the in-memory implementations in `memory`.

pub mod transaction_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory;

pub use transaction_repository::{PgTransactionStore, TransactionStore};
pub use user_repository::{PgUserStore, UserStore};
