//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Digests are PHC strings (`$argon2id$v=19$...`) carrying their own salt
//! and parameters, so verification keeps working after the cost settings
//! change. Hashing runs on tokio's blocking pool so a sign-in never stalls
//! the worker serving other connections.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::task::{JoinError, spawn_blocking};
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with a fresh random salt per digest.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
    PasswordDigest::new(phc.to_string()).map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &str,
    digest: &str,
) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::hash(err.to_string())),
    }
}

fn aborted(err: JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task aborted: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(aborted)?
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.as_ref().to_owned();
        spawn_blocking(move || verify_blocking(&argon2, &password, &digest))
            .await
            .map_err(aborted)?
    }
}
