//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User};

/// User store keyed by normalised email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let guard = self.users.lock().map_err(|_| poisoned())?;
        Ok(guard.get(email.as_ref()).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut guard = self.users.lock().map_err(|_| poisoned())?;
        let key = user.email().as_ref().to_owned();
        if guard.contains_key(&key) {
            return Err(UserPersistenceError::duplicate(key));
        }
        guard.insert(key, user.clone());
        Ok(())
    }
}
