//! Business logic services.

pub mod auth;
pub mod bootstrap;

#[allow(unused_imports)] // Re-exports for downstream use
pub use auth::{AuthError, AuthResult, AuthService};
