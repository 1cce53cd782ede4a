//! JWT issuance and verification for the two token kinds.
//!
//! Access and refresh tokens are both HS256-signed JWTs carrying the same
//! [`Claims`] shape, but they are signed with DISTINCT secrets and tagged
//! with a `type` claim, so one kind can never be replayed as the other.
//! Verification here is stateless; refresh-token liveness is decided by the
//! allow-list in the database, not by the signature.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use openmusic_core::id::random_string;
use serde::{Deserialize, Serialize};

/// Type tag carried by access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Type tag carried by refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Refresh token lifetime is fixed at 7 days.
const REFRESH_EXPIRY_DAYS: i64 = 7;

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;

/// Length of the random `jti` claim.
const JTI_LEN: usize = 16;

/// Claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's public id.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Token kind: `"access"` or `"refresh"`.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Random token id. Guarantees two tokens issued in the same second
    /// for the same user are still distinct strings -- the refresh-token
    /// allow-list keys on the exact string.
    pub jti: String,
}

/// Why a token failed verification.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, expired, or not a JWT at all.
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Valid signature but the `type` claim does not match the expected
    /// kind (e.g. a refresh token presented as a bearer credential).
    #[error("Unexpected token type")]
    WrongType,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for access tokens.
    pub access_secret: String,
    /// HMAC secret for refresh tokens. Must differ from `access_secret`.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 30).
    pub access_expiry_mins: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `ACCESS_TOKEN_KEY`            | **yes**  | --      |
    /// | `REFRESH_TOKEN_KEY`           | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRE_MINUTES` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if either secret is not set or empty.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_KEY")
            .expect("ACCESS_TOKEN_KEY must be set in the environment");
        let refresh_secret = std::env::var("REFRESH_TOKEN_KEY")
            .expect("REFRESH_TOKEN_KEY must be set in the environment");
        assert!(!access_secret.is_empty(), "ACCESS_TOKEN_KEY must not be empty");
        assert!(!refresh_secret.is_empty(), "REFRESH_TOKEN_KEY must not be empty");

        let access_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_expiry_mins,
        }
    }
}

/// Sign a short-lived access token for the given user.
pub fn sign_access_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() + config.access_expiry_mins * 60;
    sign(user_id, exp, TOKEN_TYPE_ACCESS, &config.access_secret)
}

/// Sign a 7-day refresh token for the given user.
pub fn sign_refresh_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() + REFRESH_EXPIRY_DAYS * 24 * 3600;
    sign(user_id, exp, TOKEN_TYPE_REFRESH, &config.refresh_secret)
}

/// Verify an access token: signature, expiry, and type tag. Returns the
/// embedded user id.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Result<String, TokenError> {
    verify(token, &config.access_secret, TOKEN_TYPE_ACCESS)
}

/// Verify a refresh token: signature, expiry, and type tag. Returns the
/// embedded user id. Liveness (the allow-list row) is the caller's job.
pub fn verify_refresh_token(token: &str, config: &JwtConfig) -> Result<String, TokenError> {
    verify(token, &config.refresh_secret, TOKEN_TYPE_REFRESH)
}

fn sign(
    user_id: &str,
    exp: i64,
    token_type: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        user_id: user_id.to_string(),
        exp,
        token_type: token_type.to_string(),
        jti: random_string(JTI_LEN),
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn verify(token: &str, secret: &str, expected_type: &str) -> Result<String, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;

    if token_data.claims.token_type != expected_type {
        return Err(TokenError::WrongType);
    }
    Ok(token_data.claims.user_id)
}
