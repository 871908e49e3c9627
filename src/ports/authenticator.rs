//! Authenticator port: credential checks and account creation.
//!
//! The platform has no real identity backend; adapters decide what counts
//! as a valid login.

use crate::domain::{Credentials, Registration, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,
}

/// Trait for authenticating users.
pub trait Authenticator: Send + Sync {
    /// Check credentials and return the matching user.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if the login is rejected.
    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Create an account from a validated registration form.
    ///
    /// # Errors
    /// Returns [`AuthError::EmailTaken`] if the email is already registered.
    fn register(&self, registration: &Registration) -> Result<User, AuthError>;
}
