//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and issue repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the table
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures are mapped to the
//!   port error enums; driver text stays in debug logs.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselIssueRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/issues")).await?;
//! let issues = DieselIssueRepository::new(pool);
//! # let _ = issues;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_issue_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_issue_repository::DieselIssueRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
