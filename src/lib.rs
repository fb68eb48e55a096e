//! # Cofre Auth Service
//!
//! `cofre` is the authentication surface of the Cofre personal finance app:
//! signup, login, stateless JWT sessions carried by a cookie, and a route
//! guard protecting the dashboard paths.
//!
//! ## Sessions
//!
//! Sessions are stateless HS256 JWTs (claims `sub`/`iat`/`exp`, 7-day TTL
//! by default) set as a `SameSite=Strict` cookie named `token`. Validity is
//! signature plus expiry; there is no server-side session store or
//! revocation list.
//!
//! ## Password policy
//!
//! One centralized policy (length ≥ 8, upper, lower, digit, special) backs
//! signup validation, the login pre-check, and the strength meter the web
//! client renders. Passwords are stored as bcrypt hashes, never plaintext.
//!
//! ## Route guard
//!
//! Middleware gates every path under the configured protected prefix
//! (default `/dashboard`): missing, expired or invalid tokens redirect to
//! `/login`; the check is pure signature verification, never a database
//! round-trip.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
