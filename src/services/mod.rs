//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! Each receives its store through its constructor.

pub mod token_service;
pub mod transaction_service;
pub mod user_service;
