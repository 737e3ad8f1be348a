//! Port for one-way password hashing.
//!
//! Hashing is deliberately slow, so the methods are async and adapters keep
//! the work off the request executor.

use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Digest could not be produced.
        Hash { message: String } => "password hashing failed: {message}",
        /// Stored digest is not in a recognised format.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Hashes and verifies passwords. Implementations must salt every digest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a digest for `password`.
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Whether `password` matches `digest`.
    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;
}
