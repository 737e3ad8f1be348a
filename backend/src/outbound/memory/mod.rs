//! Process-local adapters used when no database is configured.
//!
//! State lives behind a `Mutex` and is lost on restart. Intended for local
//! development and the HTTP integration tests.

mod issue_repository;
mod user_repository;

pub use issue_repository::InMemoryIssueRepository;
pub use user_repository::InMemoryUserRepository;
