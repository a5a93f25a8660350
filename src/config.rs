//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `JWT_SECRET` (required): key used to sign and verify bearer tokens
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8080
/// - `TOKEN_EXPIRY_MINUTES` (optional): token lifetime, defaults to 30
/// - `TOKEN_ISSUER` (optional): `iss` claim written into tokens, defaults to "smartfin"
/// - `BCRYPT_COST` (optional): bcrypt work factor, defaults to `bcrypt::DEFAULT_COST`
#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_token_expiry_minutes")]
    pub token_expiry_minutes: i64,

    #[serde(default = "default_token_issuer")]
    pub token_issuer: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_port() -> u16 {
    8080
}

fn default_token_expiry_minutes() -> i64 {
    30
}

fn default_token_issuer() -> String {
    "smartfin".to_string()
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

// Omits `database_url` and `jwt_secret`.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("token_expiry_minutes", &self.token_expiry_minutes)
            .field("token_issuer", &self.token_issuer)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}
