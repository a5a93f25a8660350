//! Data models representing database entities and API payloads.

/// Password validation and bcrypt hashing
pub mod password;
/// Success envelope
pub mod response;
/// BUY/SELL transaction records, filters and pages
pub mod transaction;
/// Registered users and credential requests
pub mod user;
