//! Route handlers for the Cofre auth API.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod login;
pub mod logout;
pub mod users;

pub use error::ApiError;
