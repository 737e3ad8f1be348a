//! Driving port for account use-cases.
//!
//! Inbound adapters hand over raw form input; the implementation validates
//! it, talks to storage and returns the user id the adapter should bind to
//! the session.

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::{FieldErrors, UserId};

/// Message shown for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Message shown when sign-up hits an existing account.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "An account with this email already exists";

/// Raw sign-in form input.
#[derive(Debug, Clone, Default)]
pub struct SignInRequest {
    /// Submitted email.
    pub email: String,
    /// Submitted password.
    pub password: Zeroizing<String>,
}

/// Raw sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignUpRequest {
    /// Submitted email.
    pub email: String,
    /// Submitted password.
    pub password: Zeroizing<String>,
    /// Submitted confirmation.
    pub confirm_password: Zeroizing<String>,
}

/// Failures reported by [`AccountCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Input failed field validation.
    #[error("{0}")]
    Validation(FieldErrors),
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The email is already registered.
    #[error("duplicate account")]
    DuplicateAccount,
    /// Storage or hashing failed. The message is for logs only.
    #[error("account storage failed: {0}")]
    Storage(String),
}

/// Domain use-case port for authentication and registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Check credentials and return the authenticated user id.
    async fn sign_in(&self, request: SignInRequest) -> Result<UserId, AccountError>;

    /// Register a new account and return its id.
    async fn sign_up(&self, request: SignUpRequest) -> Result<UserId, AccountError>;
}
