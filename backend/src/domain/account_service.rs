//! Account domain service: sign-in and sign-up.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AccountCommand, AccountError, PasswordHasher, SignInRequest, SignUpRequest,
    UserPersistenceError, UserRepository,
};
use crate::domain::{SignInCredentials, SignUpCredentials, User, UserId};

fn storage_failure(operation: &str, err: impl fmt::Display) -> AccountError {
    error!(operation, error = %err, "account storage failed");
    AccountError::Storage(err.to_string())
}

/// Implements [`AccountCommand`] over a user repository and password hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn sign_in(&self, request: SignInRequest) -> Result<UserId, AccountError> {
        let credentials = SignInCredentials::try_from_parts(&request.email, &request.password)
            .map_err(AccountError::Validation)?;

        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| storage_failure("sign_in", err))?
        else {
            debug!("sign-in rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_digest())
            .await
            .map_err(|err| storage_failure("sign_in", err))?;
        if !matches {
            debug!(user_id = %user.id(), "sign-in rejected: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        info!(user_id = %user.id(), "user signed in");
        Ok(user.id().clone())
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<UserId, AccountError> {
        let credentials = SignUpCredentials::try_from_parts(
            &request.email,
            &request.password,
            &request.confirm_password,
        )
        .map_err(AccountError::Validation)?;

        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| storage_failure("sign_up", err))?;
        if existing.is_some() {
            debug!("sign-up rejected: email already registered");
            return Err(AccountError::DuplicateAccount);
        }

        let digest = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(|err| storage_failure("sign_up", err))?;
        let user = User::new(
            UserId::random(),
            credentials.email().clone(),
            digest,
            self.clock.utc(),
        );

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user signed up");
                Ok(user.id().clone())
            }
            Err(UserPersistenceError::Duplicate { .. }) => {
                debug!("sign-up lost an insert race on email");
                Err(AccountError::DuplicateAccount)
            }
            Err(err) => Err(storage_failure("sign_up", err)),
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
