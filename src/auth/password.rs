//! One-way password hashing and verification.
//!
//! bcrypt is CPU-bound, so both operations run under `spawn_blocking` to
//! keep request workers free. Ordering within a request stays sequential:
//! callers await the result before continuing.

use anyhow::{Context, Result};
use tokio::task;

/// Hash a plaintext password with a per-hash random salt.
///
/// # Errors
/// Returns an error if hashing fails or the blocking task is cancelled.
pub async fn hash(password: String) -> Result<String> {
    task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// # Errors
/// Returns an error if the stored hash is malformed or the blocking task is
/// cancelled. A wrong password is `Ok(false)`, not an error.
pub async fn verify(password: String, password_hash: String) -> Result<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify password")
}
