//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`StorageProbe`]) are implemented by
//! outbound adapters. Driving ports ([`AccountCommand`], [`IssueCommand`],
//! [`IssueQuery`]) are implemented by domain services and called from
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod issue_command;
mod issue_repository;
mod password_hasher;
mod storage_probe;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{
    AccountCommand, AccountError, DUPLICATE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
    SignInRequest, SignUpRequest,
};
#[cfg(test)]
pub use issue_command::{MockIssueCommand, MockIssueQuery};
pub use issue_command::{IssueCommand, IssueError, IssueQuery};
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{IssuePersistenceError, IssueRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use storage_probe::MockStorageProbe;
pub use storage_probe::{StorageProbe, StorageProbeError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
