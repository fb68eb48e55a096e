//! Credential validation and session issuance.
//!
//! Everything auth-shaped lives here: the password/email policy, display
//! name normalization, bcrypt hashing, JWT issuance/verification, the
//! session cookie carrier, and the route guard middleware.

pub mod guard;
pub mod name;
pub mod password;
pub mod policy;
pub mod session;
pub mod state;
pub mod token;

pub use state::{AuthConfig, AuthState};
