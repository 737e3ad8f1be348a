//! Port for issue persistence.

use async_trait::async_trait;

use crate::domain::{Issue, IssueId, IssuePatch, NewIssue};

use super::define_port_error;

define_port_error! {
    /// Errors raised by issue repository adapters.
    pub enum IssuePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "issue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "issue repository query failed: {message}",
    }
}

/// Port for storing and reading issues.
///
/// Adapters assign identifiers and timestamps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Every issue ordered by id ascending.
    async fn list(&self) -> Result<Vec<Issue>, IssuePersistenceError>;

    /// Find a single issue.
    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError>;

    /// Insert a validated issue and return the stored record.
    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssuePersistenceError>;

    /// Write the fields present in `patch`. `None` when no row matched.
    async fn update(
        &self,
        id: IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssuePersistenceError>;

    /// Remove an issue. `false` when no row matched.
    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError>;
}
