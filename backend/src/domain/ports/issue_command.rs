//! Driving ports for issue use-cases.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Caller, FieldErrors, Issue, IssueChanges, IssueFields, IssueId};

/// Failures reported by [`IssueCommand`] and [`IssueQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// Input failed field validation.
    #[error("{0}")]
    Validation(FieldErrors),
    /// The caller is not allowed to mutate issues.
    #[error("authentication required")]
    Unauthorized,
    /// No issue has the given id.
    #[error("issue {0} not found")]
    NotFound(IssueId),
    /// Storage failed. The message is for logs only.
    #[error("issue storage failed: {0}")]
    Storage(String),
}

/// Mutating issue operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// Validate and insert a new issue.
    async fn create(&self, caller: &Caller, fields: IssueFields) -> Result<Issue, IssueError>;

    /// Validate and apply a partial update.
    async fn update(
        &self,
        caller: &Caller,
        id: IssueId,
        changes: IssueChanges,
    ) -> Result<Issue, IssueError>;

    /// Remove an issue.
    async fn delete(&self, caller: &Caller, id: IssueId) -> Result<(), IssueError>;
}

/// Read-only issue operations. Open to every caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueQuery: Send + Sync {
    /// Fetch one issue.
    async fn get(&self, id: IssueId) -> Result<Issue, IssueError>;

    /// Every issue ordered by id.
    async fn list(&self) -> Result<Vec<Issue>, IssueError>;
}
