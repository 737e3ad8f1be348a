//! PostgreSQL-backed `IssueRepository` implementation using Diesel ORM.
//!
//! Rows are converted through the domain constructors so a row that slipped
//! past the CHECK constraints surfaces as a query error instead of an
//! invalid `Issue`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IssuePersistenceError, IssueRepository};
use crate::domain::{Issue, IssueId, IssuePatch, IssueTitle, NewIssue, OwnerId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IssueChangeset, IssueRow, NewIssueRow};
use super::pool::{DbPool, PoolError};
use super::schema::issues;

/// Diesel-backed implementation of the issue repository port.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IssuePersistenceError {
    map_basic_pool_error(error, IssuePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IssuePersistenceError {
    map_basic_diesel_error(
        error,
        IssuePersistenceError::query,
        IssuePersistenceError::connection,
    )
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> IssuePersistenceError {
    IssuePersistenceError::query(format!("stored issue {column} invalid: {detail}"))
}

/// Convert a database row into a validated domain issue.
fn row_to_issue(row: IssueRow) -> Result<Issue, IssuePersistenceError> {
    let IssueRow {
        id,
        title,
        description,
        status,
        priority,
        user_id,
        created_at,
        updated_at,
    } = row;

    Ok(Issue {
        id: IssueId::new(id),
        title: IssueTitle::new(title).map_err(|err| corrupt("title", err))?,
        description,
        status: status.parse().map_err(|err| corrupt("status", err))?,
        priority: priority.parse().map_err(|err| corrupt("priority", err))?,
        user_id: OwnerId::new(user_id).map_err(|message| corrupt("user_id", message))?,
        created_at,
        updated_at,
    })
}

fn changeset(patch: &IssuePatch) -> IssueChangeset<'_> {
    IssueChangeset {
        title: patch.title.as_ref().map(|title| title.as_ref()),
        description: patch.description.as_ref().map(Option::as_deref),
        status: patch.status.map(|status| status.as_str()),
        priority: patch.priority.map(|priority| priority.as_str()),
    }
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn list(&self) -> Result<Vec<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IssueRow> = issues::table
            .order(issues::id.asc())
            .select(IssueRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_issue).collect()
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = issues::table
            .find(id.get())
            .select(IssueRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_issue).transpose()
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewIssueRow {
            title: issue.title.as_ref(),
            description: issue.description.as_deref(),
            status: issue.status.as_str(),
            priority: issue.priority.as_str(),
            user_id: issue.user_id.as_ref(),
        };

        let stored: IssueRow = diesel::insert_into(issues::table)
            .values(&row)
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_issue(stored)
    }

    async fn update(
        &self,
        id: IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored = diesel::update(issues::table.find(id.get()))
            .set((changeset(patch), issues::updated_at.eq(diesel::dsl::now)))
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        stored.map(row_to_issue).transpose()
    }

    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(issues::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
