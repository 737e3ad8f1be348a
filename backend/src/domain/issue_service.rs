//! Issue domain services.
//!
//! [`IssueCommandService`] gates every mutation on the caller; reads in
//! [`IssueQueryService`] are open. Neither checks issue ownership: any
//! caller allowed to mutate may touch any issue, and the acting caller is
//! logged with each write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    IssueCommand, IssueError, IssuePersistenceError, IssueQuery, IssueRepository,
};
use crate::domain::{Caller, Issue, IssueChanges, IssueFields, IssueId, IssuePatch, NewIssue};

fn map_repository_error(error: IssuePersistenceError) -> IssueError {
    error!(error = %error, "issue storage failed");
    IssueError::Storage(error.to_string())
}

fn authorise(caller: &Caller, operation: &'static str) -> Result<(), IssueError> {
    if caller.may_mutate() {
        Ok(())
    } else {
        warn!(operation, "rejected anonymous issue mutation");
        Err(IssueError::Unauthorized)
    }
}

/// Issue service implementing [`IssueCommand`].
#[derive(Clone)]
pub struct IssueCommandService<R> {
    issue_repo: Arc<R>,
}

impl<R> IssueCommandService<R> {
    /// Create a command service over the issue repository.
    pub fn new(issue_repo: Arc<R>) -> Self {
        Self { issue_repo }
    }
}

#[async_trait]
impl<R> IssueCommand for IssueCommandService<R>
where
    R: IssueRepository,
{
    async fn create(&self, caller: &Caller, fields: IssueFields) -> Result<Issue, IssueError> {
        authorise(caller, "create")?;
        let new_issue = NewIssue::validate(fields).map_err(IssueError::Validation)?;

        let issue = self
            .issue_repo
            .insert(&new_issue)
            .await
            .map_err(map_repository_error)?;
        info!(%caller, issue_id = %issue.id, "issue created");
        Ok(issue)
    }

    async fn update(
        &self,
        caller: &Caller,
        id: IssueId,
        changes: IssueChanges,
    ) -> Result<Issue, IssueError> {
        authorise(caller, "update")?;
        let patch = IssuePatch::validate(changes).map_err(IssueError::Validation)?;

        let updated = if patch.is_empty() {
            self.issue_repo.find_by_id(id).await
        } else {
            self.issue_repo.update(id, &patch).await
        }
        .map_err(map_repository_error)?
        .ok_or(IssueError::NotFound(id))?;

        info!(%caller, issue_id = %id, "issue updated");
        Ok(updated)
    }

    async fn delete(&self, caller: &Caller, id: IssueId) -> Result<(), IssueError> {
        authorise(caller, "delete")?;
        let removed = self
            .issue_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(IssueError::NotFound(id));
        }

        info!(%caller, issue_id = %id, "issue deleted");
        Ok(())
    }
}

/// Issue service implementing [`IssueQuery`].
#[derive(Clone)]
pub struct IssueQueryService<R> {
    issue_repo: Arc<R>,
}

impl<R> IssueQueryService<R> {
    /// Create a query service over the issue repository.
    pub fn new(issue_repo: Arc<R>) -> Self {
        Self { issue_repo }
    }
}

#[async_trait]
impl<R> IssueQuery for IssueQueryService<R>
where
    R: IssueRepository,
{
    async fn get(&self, id: IssueId) -> Result<Issue, IssueError> {
        self.issue_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or(IssueError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Issue>, IssueError> {
        self.issue_repo.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod tests;
