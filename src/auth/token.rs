//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs binding a user id to an expiry. Validity
//! is signature plus expiry, nothing else; there is no server-side session
//! record to consult.

use anyhow::{Context, Result};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id.
    pub sub: Uuid,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

/// Why a token was rejected. Both map to the same redirect at the guard;
/// the distinction only feeds diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    Expired,
    Invalid,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "expired token"),
            Self::Invalid => write!(f, "invalid token"),
        }
    }
}

/// Mint a session token for `user_id`, expiring `ttl_seconds` from now.
///
/// # Errors
/// Returns an error if the system clock is unavailable or signing fails.
pub fn issue(secret: &SecretString, user_id: Uuid, ttl_seconds: u64) -> Result<String> {
    issue_at(secret, user_id, ttl_seconds, unix_now()?)
}

fn issue_at(secret: &SecretString, user_id: Uuid, ttl_seconds: u64, now: u64) -> Result<String> {
    let exp = now
        .checked_add(ttl_seconds)
        .context("session ttl overflows the expiry timestamp")?;
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .context("failed to sign session token")
}

/// Verify signature and expiry of a session token, returning its claims.
///
/// # Errors
/// `VerifyError::Expired` when the expiry has passed, `VerifyError::Invalid`
/// for any other verification failure (bad signature, malformed token).
pub fn verify(secret: &SecretString, token: &str) -> Result<Claims, VerifyError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No clock-skew allowance: expired means expired.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => VerifyError::Expired,
        _ => VerifyError::Invalid,
    })
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before Unix epoch")?
        .as_secs())
}
