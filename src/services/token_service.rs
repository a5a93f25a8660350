//! Bearer token issuance and validation.
//!
//! Tokens are HS256-signed JWTs carrying the user's id and username. There is
//! no server-side session or revocation list: a token is valid until its `exp`
//! claim passes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Identity payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
    pub iss: String,
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies tokens with a key supplied at construction.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
    issuer: String,
}

impl TokenService {
    pub fn new(secret: &[u8], expiry: Duration, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `validate_at` against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiry,
            issuer,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Sign a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = now + self.expiry;
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(AppError::TokenEncoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_at(token, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// - [AppError::InvalidToken]: bad signature, wrong issuer, wrong algorithm or malformed token
    /// - [AppError::TokenExpired]: signature is valid but `now` is at or past `exp`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::minutes(30), "smartfin")
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn token_carries_identity_claims() {
        let user_id = Uuid::new_v4();
        let issued = service().issue_at(user_id, "alice", issued_at()).unwrap();

        let claims = service().validate_at(&issued.token, issued_at()).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "smartfin");
        assert_eq!(claims.iat, issued_at().timestamp());
        assert_eq!(issued.expires_at, issued_at() + Duration::minutes(30));
    }

    #[test]
    fn token_is_accepted_before_expiry() {
        let issued = service()
            .issue_at(Uuid::new_v4(), "alice", issued_at())
            .unwrap();

        let result = service().validate_at(&issued.token, issued_at() + Duration::minutes(29));

        assert!(result.is_ok());
    }

    #[test]
    fn token_is_rejected_after_expiry() {
        let issued = service()
            .issue_at(Uuid::new_v4(), "alice", issued_at())
            .unwrap();

        let result = service().validate_at(&issued.token, issued_at() + Duration::minutes(31));

        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenService::new(b"another-secret", Duration::minutes(30), "smartfin");
        let issued = other.issue_at(Uuid::new_v4(), "alice", issued_at()).unwrap();

        let result = service().validate_at(&issued.token, issued_at());

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_from_another_issuer_is_rejected() {
        let other = TokenService::new(SECRET, Duration::minutes(30), "someone-else");
        let issued = other.issue_at(Uuid::new_v4(), "alice", issued_at()).unwrap();

        let result = service().validate_at(&issued.token, issued_at());

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let issued = service()
            .issue_at(Uuid::new_v4(), "alice", issued_at())
            .unwrap();
        let forged = service()
            .issue_at(Uuid::new_v4(), "mallory", issued_at())
            .unwrap();

        // Payload of one token under the signature of another.
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged_parts: Vec<&str> = forged.token.split('.').collect();
        parts[1] = forged_parts[1];
        let tampered = parts.join(".");

        let result = service().validate_at(&tampered, issued_at());

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let result = service().validate_at("not-a-token", issued_at());

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
